//! Turns a free-text request into a [`Plan`].
//!
//! The model is asked for a JSON plan first. Quota exhaustion, unparseable
//! output, and plans that under-deliver all resolve to the rule-based
//! fallback; only a hard backend failure is reported to the caller.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::fallback::{rule_based_plan, KeywordExtractor, TaskExtractor};
use super::prompt::build_planner_prompt;
use crate::llm::{LlmClient, LlmError};
use crate::tools::ToolRegistry;
use crate::types::Plan;

/// Planning failures that cannot be recovered locally.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("LLM error: {0}")]
    Backend(String),
}

/// Plan generator backed by a language model with a rule-based fallback.
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    extractor: Box<dyn TaskExtractor>,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            llm,
            tools,
            extractor: Box::new(KeywordExtractor),
        }
    }

    /// Replace the heuristic used by the fallback path.
    pub fn with_extractor(mut self, extractor: Box<dyn TaskExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Produce a plan with at least one step for `user_task`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Backend` when the model backend reports a hard
    /// failure. Every other problem falls back to the rule-based planner.
    pub async fn generate_plan(&self, user_task: &str) -> Result<Plan, PlanError> {
        let prompt = build_planner_prompt(user_task, &self.tools.list_tools());

        let raw = match self.llm.complete(&prompt).await {
            Ok(raw) => raw,
            Err(LlmError::QuotaExhausted) => {
                warn!("Model quota exhausted, using rule-based planner");
                return Ok(self.fallback(user_task));
            }
            Err(LlmError::Backend(message)) => {
                return Err(PlanError::Backend(message));
            }
        };

        debug!(raw = %raw, "Planner model output");

        match parse_plan(&raw) {
            Ok(plan) if plan.len() == 1 => {
                warn!("Model returned a single step, using rule-based planner to catch missed intents");
                Ok(self.fallback(user_task))
            }
            Ok(plan) if plan.is_empty() => {
                warn!("Model returned no steps, using rule-based planner");
                Ok(self.fallback(user_task))
            }
            Ok(plan) => {
                info!(steps = plan.len(), "Planner produced model plan");
                Ok(plan)
            }
            Err(e) => {
                warn!("Planner parsing failed, fallback used: {}", e);
                Ok(self.fallback(user_task))
            }
        }
    }

    fn fallback(&self, user_task: &str) -> Plan {
        let plan = rule_based_plan(self.extractor.as_ref(), user_task);
        info!(steps = plan.len(), "Planner produced rule-based plan");
        plan
    }
}

/// Slice from the first `{` to the last `}`, tolerating prose or code fences
/// around the JSON.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

fn parse_plan(raw: &str) -> anyhow::Result<Plan> {
    let json = extract_json(raw).ok_or_else(|| anyhow::anyhow!("No JSON found in LLM response"))?;
    Ok(serde_json::from_str(json)?)
}
