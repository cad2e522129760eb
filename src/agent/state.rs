//! The record threaded through the three stages of one invocation.

use std::fmt;

/// Output of one tool invocation, labelled with the tool's registered name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub tool: String,
    pub output: String,
}

impl ResultEntry {
    pub fn new(tool: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            output: output.into(),
        }
    }
}

impl fmt::Display for ResultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.tool, self.output)
    }
}

/// Per-query agent state.
///
/// Fields fill in as stages complete and are never reset within one
/// invocation: `plan` after planning, `results` after execution, `answer`
/// after synthesis.
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    query: String,
    plan: String,
    results: Vec<ResultEntry>,
    answer: String,
}

impl AgentState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn plan(&self) -> &str {
        &self.plan
    }

    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Results in their display form, `"<tool> → <output>"`.
    pub fn rendered_results(&self) -> Vec<String> {
        self.results.iter().map(ToString::to_string).collect()
    }

    pub fn into_answer(self) -> String {
        self.answer
    }

    pub(super) fn set_plan(&mut self, plan: String) {
        self.plan = plan;
    }

    pub(super) fn set_results(&mut self, results: Vec<ResultEntry>) {
        self.results = results;
    }

    pub(super) fn set_answer(&mut self, answer: String) {
        self.answer = answer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_renders_with_arrow() {
        let entry = ResultEntry::new("Wikipedia", "Paris is the capital of France.");
        assert_eq!(
            entry.to_string(),
            "Wikipedia → Paris is the capital of France."
        );
    }

    #[test]
    fn fresh_state_only_has_query() {
        let state = AgentState::new("What is 2+2?");
        assert_eq!(state.query(), "What is 2+2?");
        assert!(state.plan().is_empty());
        assert!(state.results().is_empty());
        assert!(state.answer().is_empty());
    }
}
