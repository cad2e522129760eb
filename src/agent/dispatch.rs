//! Walk a plan and run the tools it references.

use tracing::{debug, error, info};

use super::plan::{parse_plan, PlanStep};
use super::state::ResultEntry;
use crate::tools::ToolRegistry;

/// Execute every tool invocation found in `plan`, one at a time, in plan-line
/// order and then registry order within a line.
///
/// Lines naming no tool produce nothing. Tool failures arrive as ordinary
/// output text and are recorded like any other result.
pub async fn execute_plan(plan: &str, tools: &ToolRegistry) -> Vec<ResultEntry> {
    let names = tools.names();
    let mut results = Vec::new();

    for step in parse_plan(plan, &names) {
        let (tool_name, argument) = match step {
            PlanStep::ToolInvocation { tool, argument } => (tool, argument),
            PlanStep::Unmatched(line) => {
                debug!(line = %line, "Plan line references no tool");
                continue;
            }
        };

        let Some(tool) = tools.get(&tool_name) else {
            error!(tool = %tool_name, "Classified tool is missing from the registry");
            continue;
        };

        info!(tool = %tool_name, argument = %argument, "Invoking tool");
        let output = tool.invoke(&argument).await;
        debug!(tool = %tool_name, output_len = output.len(), "Tool finished");

        results.push(ResultEntry::new(tool_name, output));
    }

    results
}
