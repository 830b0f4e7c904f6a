//! API request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::RunReport;
use crate::tools::ToolInfo;

/// Request to run a task.
#[derive(Debug, Clone, Deserialize)]
pub struct RunTaskRequest {
    /// The task description / user prompt
    pub task: String,
}

/// Every stage's output for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunTaskResponse {
    /// Unique run identifier
    pub id: Uuid,

    #[serde(flatten)]
    pub report: RunReport,
}

/// Registered tools, in registration order.
#[derive(Debug, Clone, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolInfo>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Error body returned for rejected or failed runs.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
