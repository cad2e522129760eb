//! Prompt templates for the planning and synthesis stages.

use super::state::ResultEntry;
use crate::tools::ToolRegistry;

/// Build the planning prompt: the user's query plus the available tools, in
/// registry order.
pub fn build_plan_prompt(query: &str, tools: &ToolRegistry) -> String {
    let tool_names = tools
        .names()
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ");

    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are the planning module of an agent. The user's query is: "{query}".
Write a clear step-by-step plan of which tools to use and in what order.
Available tools: [{tool_names}]
{tool_descriptions}
Format: a list of steps, one per line. Put the tool name at the start of each step, followed by a colon and the tool input, e.g. `Wikipedia: capital of France`."#,
        query = query,
        tool_names = tool_names,
        tool_descriptions = tool_descriptions
    )
}

/// Build the synthesis prompt from the query and the rendered results.
pub fn build_finish_prompt(query: &str, results: &[ResultEntry]) -> String {
    let rendered = results
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Answer the user's original query based on these results.
Query: {query}
Step results:
{rendered}"#,
        query = query,
        rendered = rendered
    )
}
