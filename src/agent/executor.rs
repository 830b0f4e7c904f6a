//! Runs a plan against the tool registry, one step at a time.

use tracing::{debug, warn};

use crate::tools::ToolRegistry;
use crate::types::{ExecutionResult, Plan, ToolResult};

/// Execute every step of `plan` in order.
///
/// A failing step (unknown tool, bad arguments, tool error) becomes a failed
/// [`ToolResult`] and never stops the remaining steps. The returned results
/// line up one-to-one with `plan.steps`.
pub async fn execute_plan(tools: &ToolRegistry, plan: &Plan) -> ExecutionResult {
    let mut results = Vec::with_capacity(plan.len());

    for (idx, step) in plan.steps.iter().enumerate() {
        debug!(step = idx + 1, action = %step.action, input = ?step.input, "Running step");

        let outcome = tools.execute(&step.action, &step.input).await;
        if let Err(e) = &outcome {
            warn!(step = idx + 1, action = %step.action, "Step failed: {}", e);
        }

        results.push(ToolResult::from_outcome(step.action.as_str(), outcome));
    }

    ExecutionResult { results }
}
