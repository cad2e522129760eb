//! Tool registry and the built-in tools.
//!
//! A tool is a `string -> string` capability. Tools never fail through the
//! call channel: internal problems come back as human-readable text, which the
//! dispatcher forwards to the synthesis stage like any other output.
//!
//! The registry is built once at startup and keeps registration order; the
//! dispatcher relies on that order when a single plan line names several
//! tools.

mod sql;
mod wikipedia;
mod wolfram;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ToolsConfig;

pub use sql::{render_rows, SqlQuery, SQL_ERROR_PREFIX};
pub use wikipedia::{WikipediaSearch, WIKIPEDIA_ERROR, WIKIPEDIA_NOT_FOUND};
pub use wolfram::{WolframQuery, WOLFRAM_ERROR};

/// A capability the plan can reference by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name matched (case-insensitively) against plan lines.
    fn name(&self) -> &str;

    /// One-line description shown to the planner.
    fn description(&self) -> &str;

    /// Run the tool. Failures are reported in the returned text.
    async fn invoke(&self, argument: &str) -> String;
}

/// Information about a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum ToolRegistryError {
    #[error("tool already registered: {0}")]
    Duplicate(String),
}

/// Ordered, append-only table of tools.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in tools in their canonical order:
    /// `Wikipedia`, `SQL`, `Wolfram`.
    pub fn with_defaults(config: &ToolsConfig) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .user_agent("planact/0.1 (tool client)")
            .build()?;

        let mut registry = Self::new();
        registry.register(Arc::new(WikipediaSearch::new(
            client.clone(),
            &config.wikipedia_api_url,
        )))?;
        registry.register(Arc::new(SqlQuery::new(&config.sqlite_path)))?;
        registry.register(Arc::new(WolframQuery::new(
            client,
            &config.wolfram_api_url,
            &config.wolfram_app_id,
        )))?;
        Ok(registry)
    }

    /// Append a tool. Names are unique (compared exactly, as registered).
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolRegistryError> {
        if self.tools.iter().any(|t| t.name() == tool.name()) {
            return Err(ToolRegistryError::Duplicate(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Look up a tool by its exact registered name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Name and description of every tool, in registration order.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
