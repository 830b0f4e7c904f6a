//! Plan → execute → verify pipeline.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::executor::execute_plan;
use super::planner::{PlanError, Planner};
use super::verifier::verify_execution;
use crate::config::Config;
use crate::llm::{GeminiClient, LlmClient};
use crate::tools::ToolRegistry;
use crate::types::{ExecutionResult, FinalResponse, Plan};

/// Output of every stage of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub plan: Plan,
    pub execution: ExecutionResult,
    #[serde(rename = "final")]
    pub final_response: FinalResponse,
}

/// The assistant: a planner and the tool registry it plans against.
pub struct Agent {
    planner: Planner,
    tools: Arc<ToolRegistry>,
}

impl Agent {
    /// Create an agent using Gemini for planning and the built-in tools.
    pub fn new(config: &Config) -> Self {
        let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(config.llm.clone()));
        let tools = Arc::new(ToolRegistry::with_defaults(config));
        Self::with_parts(llm, tools)
    }

    /// Create an agent from an explicit model client and registry.
    pub fn with_parts(llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        let planner = Planner::new(llm, Arc::clone(&tools));
        Self { planner, tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run a task through all three stages.
    ///
    /// Only planning can fail; execution and verification always complete and
    /// report per-step failures in the result.
    pub async fn run_task(&self, task: &str) -> Result<RunReport, PlanError> {
        info!("Planning task");
        let plan = self.planner.generate_plan(task).await?;

        info!(steps = plan.len(), "Executing plan");
        let execution = execute_plan(&self.tools, &plan).await;

        let final_response = verify_execution(&execution);
        info!(status = %final_response.status, "Run verified");

        Ok(RunReport {
            plan,
            execution,
            final_response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::fallback::{NEWS_ACTION, WEATHER_ACTION};
    use crate::llm::testing::ScriptedLlm;
    use crate::tools::testing::{EchoTool, FailingTool};
    use crate::types::RunStatus;
    use serde_json::json;

    fn agent(llm: ScriptedLlm, news_works: bool) -> Agent {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool(WEATHER_ACTION)));
        if news_works {
            registry.register(Arc::new(EchoTool(NEWS_ACTION)));
        } else {
            registry.register(Arc::new(FailingTool(NEWS_ACTION, "rate limited")));
        }
        Agent::with_parts(Arc::new(llm), Arc::new(registry))
    }

    #[tokio::test]
    async fn full_run_succeeds() {
        let agent = agent(ScriptedLlm::quota_exhausted(), true);
        let report = agent
            .run_task("weather in Pune and news about electric vehicles")
            .await
            .unwrap();

        assert_eq!(report.plan.len(), 2);
        assert_eq!(report.execution.results.len(), 2);
        assert_eq!(report.final_response.status, RunStatus::Success);
        assert_eq!(report.final_response.verified_output.len(), 2);
    }

    #[tokio::test]
    async fn failed_step_gives_partial_success() {
        let agent = agent(ScriptedLlm::quota_exhausted(), false);
        let report = agent
            .run_task("weather in Pune and news about electric vehicles")
            .await
            .unwrap();

        assert_eq!(report.final_response.status, RunStatus::PartialSuccess);
        assert_eq!(
            report.final_response.issues,
            Some(vec!["news_tool failed: rate limited".to_string()])
        );
    }

    #[tokio::test]
    async fn unknown_model_action_is_reported_not_fatal() {
        let raw = r#"{"steps": [
            {"action": "stock_tool", "input": {"ticker": "ACME"}},
            {"action": "weather_tool", "input": {"city": "Delhi"}}
        ]}"#;
        let agent = agent(ScriptedLlm::replying(raw), true);
        let report = agent.run_task("stock and weather").await.unwrap();

        assert_eq!(report.final_response.status, RunStatus::PartialSuccess);
        assert_eq!(report.final_response.verified_output.len(), 1);
        assert_eq!(report.final_response.issues.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let agent = agent(ScriptedLlm::quota_exhausted(), false);
        let first = agent.run_task("news about chips in Bangalore").await.unwrap();
        let second = agent.run_task("news about chips in Bangalore").await.unwrap();
        assert_eq!(first.final_response, second.final_response);
    }

    #[tokio::test]
    async fn backend_failure_aborts_run() {
        let agent = agent(ScriptedLlm::failing("invalid api key"), true);
        assert!(agent.run_task("weather in Pune").await.is_err());
    }

    #[test]
    fn report_serializes_final_key() {
        let report = RunReport {
            plan: Plan::default(),
            execution: ExecutionResult::default(),
            final_response: verify_execution(&ExecutionResult::default()),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["final"]["status"], json!("success"));
        assert_eq!(value["plan"], json!({"steps": []}));
    }
}
