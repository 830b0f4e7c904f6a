//! Data model shared by the planner, executor and verifier.
//!
//! Every value here lives for a single pipeline run. Nothing is persisted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One planned tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Name of the tool to call. Checked against the registry only at execution time.
    pub action: String,

    /// Named parameters passed verbatim to the tool.
    pub input: Map<String, Value>,
}

impl Step {
    pub fn new(action: impl Into<String>, input: Map<String, Value>) -> Self {
        Self {
            action: action.into(),
            input,
        }
    }

    /// Convenience constructor for the common single-parameter case.
    pub fn with_param(action: impl Into<String>, key: &str, value: impl Into<Value>) -> Self {
        let mut input = Map::new();
        input.insert(key.to_string(), value.into());
        Self::new(action, input)
    }
}

/// Ordered sequence of steps derived from a user request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Outcome of a single step.
///
/// Fields are private and the type is serialize-only, so `data` and `error` can
/// never both be set. Build one with [`ToolResult::ok`], [`ToolResult::failed`]
/// or [`ToolResult::from_outcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    tool: String,
    success: bool,
    data: Option<Value>,
    error: Option<String>,
}

impl ToolResult {
    pub fn ok(tool: impl Into<String>, data: Value) -> Self {
        Self {
            tool: tool.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(tool: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Convert a tool outcome, keeping only the error's display text on failure.
    pub fn from_outcome<E: std::fmt::Display>(
        tool: impl Into<String>,
        outcome: Result<Value, E>,
    ) -> Self {
        match outcome {
            Ok(data) => Self::ok(tool, data),
            Err(e) => Self::failed(tool, e.to_string()),
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Per-step outcomes, in the same order as the plan's steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub results: Vec<ToolResult>,
}

/// Overall classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every step succeeded
    Success,
    /// At least one step failed (including the case where all of them did)
    PartialSuccess,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::PartialSuccess => write!(f, "partial_success"),
        }
    }
}

/// Aggregated report handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalResponse {
    pub status: RunStatus,

    /// One single-key object per successful step: `{tool_name: data}`.
    pub verified_output: Vec<Map<String, Value>>,

    /// One line per failed step, `None` when nothing failed.
    pub issues: Option<Vec<String>>,
}
