//! The plan → execute → finish state machine.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::Config;
use crate::llm::{LlmClient, LlmError, OpenAiClient};
use crate::tools::ToolRegistry;

use super::dispatch::execute_plan;
use super::prompt::{build_finish_prompt, build_plan_prompt};
use super::state::AgentState;

/// Stage of one invocation. Transitions are unconditional and strictly
/// forward; a failure aborts the invocation instead of transitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Plan,
    Execute,
    Finish,
    Terminal,
}

impl Stage {
    /// The stage that follows this one.
    pub fn next(self) -> Self {
        match self {
            Self::Plan => Self::Execute,
            Self::Execute => Self::Finish,
            Self::Finish | Self::Terminal => Self::Terminal,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Execute => write!(f, "execute"),
            Self::Finish => write!(f, "finish"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    /// The model could not be reached or answered unusably.
    #[error("upstream model unavailable during {stage} stage: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: LlmError,
    },
}

/// The three-stage agent.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
}

impl Agent {
    /// Create an agent backed by the configured model endpoint and the
    /// built-in tools.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let llm = Arc::new(OpenAiClient::new(&config.llm)?);
        let tools = Arc::new(ToolRegistry::with_defaults(&config.tools)?);
        Ok(Self::with_parts(llm, tools))
    }

    /// Create an agent from an existing model client and tool registry.
    pub fn with_parts(llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        Self { llm, tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run one query through all stages and return the final state.
    pub async fn run(&self, query: &str) -> Result<AgentState, AgentError> {
        let span = tracing::info_span!("invocation", id = %Uuid::new_v4());

        async move {
            let mut state = AgentState::new(query);
            let mut stage = Stage::Plan;

            while stage != Stage::Terminal {
                tracing::debug!(%stage, "Entering stage");
                self.step(stage, &mut state).await?;
                stage = stage.next();
            }

            tracing::debug!(results = state.results().len(), "Invocation complete");
            Ok::<_, AgentError>(state)
        }
        .instrument(span)
        .await
    }

    /// Run one query and return only the answer.
    pub async fn answer(&self, query: &str) -> Result<String, AgentError> {
        Ok(self.run(query).await?.into_answer())
    }

    async fn step(&self, stage: Stage, state: &mut AgentState) -> Result<(), AgentError> {
        match stage {
            Stage::Plan => {
                let prompt = build_plan_prompt(state.query(), &self.tools);
                let plan = self.complete(stage, &prompt).await?;
                tracing::debug!(plan = %plan, "Plan received");
                state.set_plan(plan);
            }
            Stage::Execute => {
                let results = execute_plan(state.plan(), &self.tools).await;
                state.set_results(results);
            }
            Stage::Finish => {
                let prompt = build_finish_prompt(state.query(), state.results());
                let answer = self.complete(stage, &prompt).await?;
                state.set_answer(answer);
            }
            Stage::Terminal => {}
        }
        Ok(())
    }

    async fn complete(&self, stage: Stage, prompt: &str) -> Result<String, AgentError> {
        self.llm.complete(prompt).await.map_err(|source| {
            tracing::warn!(%stage, model = %self.llm.model(), error = %source, "Model call failed");
            AgentError::Upstream { stage, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::agent::ResultEntry;
    use crate::tools::Tool;

    /// Replays canned completions and records the prompts it was given.
    struct ScriptedLlm {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyResponse))
        }
    }

    struct Fixed {
        name: &'static str,
        output: &'static str,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Tool for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "returns a fixed string"
        }

        async fn invoke(&self, argument: &str) -> String {
            self.calls.lock().unwrap().push(argument.to_string());
            self.output.to_string()
        }
    }

    fn wikipedia() -> Arc<Fixed> {
        Arc::new(Fixed {
            name: "Wikipedia",
            output: "Paris is the capital of France.",
            calls: Mutex::new(Vec::new()),
        })
    }

    fn registry_with(tool: Arc<Fixed>) -> Arc<ToolRegistry> {
        let mut tools = ToolRegistry::new();
        tools.register(tool).unwrap();
        Arc::new(tools)
    }

    #[tokio::test]
    async fn stages_fill_state_in_order() {
        let tool = wikipedia();
        let llm = ScriptedLlm::new(vec![
            Ok("Wikipedia: capital of France".to_string()),
            Ok("The capital of France is Paris.".to_string()),
        ]);
        let agent = Agent::with_parts(llm.clone(), registry_with(tool.clone()));

        let state = agent.run("What is the capital of France?").await.unwrap();

        assert_eq!(state.query(), "What is the capital of France?");
        assert_eq!(state.plan(), "Wikipedia: capital of France");
        assert_eq!(
            state.results(),
            &[ResultEntry::new("Wikipedia", "Paris is the capital of France.")]
        );
        assert_eq!(state.answer(), "The capital of France is Paris.");
        assert_eq!(*tool.calls.lock().unwrap(), vec!["capital of France"]);

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("What is the capital of France?"));
        assert!(prompts[0].contains("['Wikipedia']"));
        assert!(prompts[1].contains("Query: What is the capital of France?"));
        assert!(prompts[1].contains("Wikipedia → Paris is the capital of France."));
    }

    #[tokio::test]
    async fn planning_failure_aborts_before_tools_run() {
        let tool = wikipedia();
        let llm = ScriptedLlm::new(vec![Err(LlmError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })]);
        let agent = Agent::with_parts(llm.clone(), registry_with(tool.clone()));

        let err = agent.run("anything").await.unwrap_err();

        assert!(matches!(
            err,
            AgentError::Upstream {
                stage: Stage::Plan,
                ..
            }
        ));
        assert!(tool.calls.lock().unwrap().is_empty());
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn synthesis_failure_is_reported_after_tools_ran() {
        let tool = wikipedia();
        let llm = ScriptedLlm::new(vec![
            Ok("Wikipedia: Paris".to_string()),
            Err(LlmError::EmptyResponse),
        ]);
        let agent = Agent::with_parts(llm, registry_with(tool.clone()));

        let err = agent.answer("capital?").await.unwrap_err();

        assert!(matches!(
            err,
            AgentError::Upstream {
                stage: Stage::Finish,
                source: LlmError::EmptyResponse
            }
        ));
        assert_eq!(*tool.calls.lock().unwrap(), vec!["Paris"]);
        assert!(err.to_string().contains("finish stage"));
    }

    #[tokio::test]
    async fn plan_without_tools_still_reaches_synthesis() {
        let llm = ScriptedLlm::new(vec![
            Ok("Just answer from memory.".to_string()),
            Ok("42".to_string()),
        ]);
        let agent = Agent::with_parts(llm.clone(), registry_with(wikipedia()));

        let state = agent.run("meaning of life").await.unwrap();

        assert!(state.results().is_empty());
        assert_eq!(state.answer(), "42");
        assert!(llm.prompts()[1].ends_with("Step results:\n"));
    }

    #[test]
    fn stages_advance_strictly_forward() {
        assert_eq!(Stage::Plan.next(), Stage::Execute);
        assert_eq!(Stage::Execute.next(), Stage::Finish);
        assert_eq!(Stage::Finish.next(), Stage::Terminal);
        assert_eq!(Stage::Terminal.next(), Stage::Terminal);
    }
}
