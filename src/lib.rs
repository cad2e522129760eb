//! # planact
//!
//! A small plan-and-act agent over a fixed set of tools.
//!
//! This library provides:
//! - A three-stage agent: plan with the model, run the tools the plan names,
//!   synthesize an answer with the model
//! - A permissive plan-line parser that matches tool names anywhere in a line
//! - Built-in tools for Wikipedia summaries, SQLite queries and Wolfram|Alpha
//!
//! ## Architecture
//!
//! 1. The planner prompt lists the registered tools and the user's query
//! 2. Each line of the returned plan is scanned for tool names
//! 3. Every referenced tool runs with the rest of the line as its argument
//! 4. The labelled outputs go back to the model for the final answer
//!
//! ## Example
//!
//! ```rust,ignore
//! use planact::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config)?;
//! let answer = agent.answer("What is the capital of France?").await?;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
