//! Classifies an execution and builds the final report.

use serde_json::Map;

use crate::types::{ExecutionResult, FinalResponse, RunStatus};

/// Split results into verified output and issues.
///
/// The status is `Success` only when no step failed. A run where every step
/// failed is still `PartialSuccess`, with empty `verified_output`.
pub fn verify_execution(execution: &ExecutionResult) -> FinalResponse {
    let mut issues = Vec::new();
    let mut verified_output = Vec::new();

    for result in &execution.results {
        match result.data() {
            Some(data) if result.success() => {
                let mut entry = Map::new();
                entry.insert(result.tool().to_string(), data.clone());
                verified_output.push(entry);
            }
            _ => issues.push(format!(
                "{} failed: {}",
                result.tool(),
                result.error().unwrap_or("unknown error")
            )),
        }
    }

    let status = if issues.is_empty() {
        RunStatus::Success
    } else {
        RunStatus::PartialSuccess
    };

    FinalResponse {
        status,
        verified_output,
        issues: (!issues.is_empty()).then_some(issues),
    }
}
