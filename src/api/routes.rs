//! HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::types::{
    ErrorResponse, HealthResponse, RunTaskRequest, RunTaskResponse, ToolsResponse,
};
use crate::agent::Agent;

/// Shared application state.
pub struct AppState {
    pub agent: Agent,
}

/// Build the router for all API endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/tools", get(list_tools))
        .route("/api/run", post(run_task))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: state.agent.tools().describe_tools(),
    })
}

async fn run_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RunTaskRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Rejected run request: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let task = req.task.trim();
    if task.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Please enter a task first.".to_string(),
        );
    }

    let id = Uuid::new_v4();
    tracing::info!(run_id = %id, "Received task");

    match state.agent.run_task(task).await {
        Ok(report) => Json(RunTaskResponse { id, report }).into_response(),
        Err(e) => {
            tracing::error!(run_id = %id, "Planner failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, format!("Planner failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use crate::llm::testing::ScriptedLlm;
    use crate::tools::testing::EchoTool;
    use crate::tools::ToolRegistry;
    use serde_json::{json, Value};

    fn state(llm: ScriptedLlm) -> Arc<AppState> {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool("weather_tool")));
        registry.register(Arc::new(EchoTool("news_tool")));
        Arc::new(AppState {
            agent: Agent::with_parts(Arc::new(llm), Arc::new(registry)),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn blank_task_is_rejected() {
        let response = run_task(
            State(state(ScriptedLlm::quota_exhausted())),
            Ok(Json(RunTaskRequest {
                task: "   ".to_string(),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Please enter a task first."})
        );
    }

    #[tokio::test]
    async fn run_returns_every_stage() {
        let response = run_task(
            State(state(ScriptedLlm::quota_exhausted())),
            Ok(Json(RunTaskRequest {
                task: "weather in Mumbai".to_string(),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["id"].is_string());
        assert_eq!(
            body["plan"],
            json!({"steps": [{"action": "weather_tool", "input": {"city": "Mumbai"}}]})
        );
        assert_eq!(body["execution"]["results"][0]["success"], json!(true));
        assert_eq!(body["final"]["status"], json!("success"));
        assert!(body["final"]["issues"].is_null());
    }

    #[tokio::test]
    async fn backend_failure_is_bad_gateway() {
        let response = run_task(
            State(state(ScriptedLlm::failing("401 unauthorized"))),
            Ok(Json(RunTaskRequest {
                task: "weather in Mumbai".to_string(),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"], json!("Planner failed: LLM error: 401 unauthorized"));
    }

    async fn parse_body(
        content_type: &str,
        body: &'static str,
    ) -> Result<Json<RunTaskRequest>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/run")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        Json::<RunTaskRequest>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let payload = parse_body("application/json", "not json").await;
        assert!(payload.is_err());

        let response = run_task(State(state(ScriptedLlm::quota_exhausted())), payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn body_without_task_is_json_error() {
        let payload = parse_body("application/json", r#"{"query": "weather"}"#).await;

        let response = run_task(State(state(ScriptedLlm::quota_exhausted())), payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("task"));
    }

    #[tokio::test]
    async fn tools_are_listed_in_order() {
        let Json(body) = list_tools(State(state(ScriptedLlm::quota_exhausted()))).await;
        let names: Vec<_> = body.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["weather_tool", "news_tool"]);
    }
}
