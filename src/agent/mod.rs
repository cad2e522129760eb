//! Agent module - the plan → execute → finish loop.
//!
//! 1. Ask the model for a free-text plan naming the available tools
//! 2. Scan the plan line by line and invoke every tool it mentions
//! 3. Ask the model to answer the query from the labelled tool outputs

mod agent_loop;
mod dispatch;
mod plan;
mod prompt;
mod state;

pub use agent_loop::{Agent, AgentError, Stage};
pub use dispatch::execute_plan;
pub use plan::{classify_line, extract_argument, parse_plan, PlanStep};
pub use prompt::{build_finish_prompt, build_plan_prompt};
pub use state::{AgentState, ResultEntry};
