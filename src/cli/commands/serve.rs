//! HTTP query endpoint.
//!
//! Accepts a free-text football question, hands it to the agent and returns
//! the answer.

use crate::agent::{tool_definitions, Agent, QueryResolver};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;

/// Shared application state.
struct AppState {
    resolver: Arc<dyn QueryResolver>,
}

/// Build the router around a query resolver.
pub fn router(resolver: Arc<dyn QueryResolver>) -> Router {
    let state = Arc::new(AppState { resolver });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/tools", get(list_tools))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'matchday doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let agent = Agent::from_settings(&settings)?;
    let app = router(Arc::new(agent));

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Matchday API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Query", "POST /query");
    Output::kv("Tools", "GET  /tools");
    println!();
    Output::info(&format!("Model: {}", settings.agent.model));
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QueryRequest {
    query: String,
}

#[derive(Serialize)]
struct QueryResponse {
    id: Uuid,
    answer: String,
    tool_calls: Vec<ToolCallInfo>,
    iterations: usize,
}

#[derive(Serialize)]
struct ToolCallInfo {
    name: String,
    arguments: String,
    succeeded: bool,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    description: Option<String>,
    parameters: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    let id = Uuid::new_v4();
    info!(%id, "Received query: {}", req.query);

    match state.resolver.resolve(&req.query).await {
        Ok(response) => {
            info!(%id, "Answered after {} iteration(s)", response.iterations);
            Json(QueryResponse {
                id,
                answer: response.content,
                tool_calls: response
                    .tool_calls
                    .into_iter()
                    .map(|c| ToolCallInfo {
                        name: c.name,
                        arguments: c.arguments,
                        succeeded: c.succeeded,
                    })
                    .collect(),
                iterations: response.iterations,
            })
            .into_response()
        }
        Err(e) => {
            error!(%id, "Query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to process query".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn list_tools() -> impl IntoResponse {
    Json(
        tool_definitions()
            .into_iter()
            .map(|t| ToolInfo {
                name: t.function.name,
                description: t.function.description,
                parameters: t.function.parameters,
            })
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentResponse, ToolCallRecord};
    use crate::error::{MatchdayError, Result};
    use async_trait::async_trait;
    use serde_json::json;

    struct CannedResolver;

    #[async_trait]
    impl QueryResolver for CannedResolver {
        async fn resolve(&self, query: &str) -> Result<AgentResponse> {
            if query.contains("fail") {
                return Err(MatchdayError::OpenAI("Incorrect API key provided".to_string()));
            }
            Ok(AgentResponse {
                content: format!("You asked: {}", query),
                tool_calls: vec![ToolCallRecord {
                    name: "get_league_standings".to_string(),
                    arguments: r#"{"league":"mls","season":2024}"#.to_string(),
                    result: "[]".to_string(),
                    succeeded: true,
                }],
                iterations: 2,
            })
        }
    }

    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(Arc::new(CannedResolver)))
                .await
                .unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_query_returns_answer() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{}/query", base))
            .json(&json!({"query": "Who leads MLS?"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["answer"], "You asked: Who leads MLS?");
        assert_eq!(body["iterations"], 2);
        assert_eq!(body["tool_calls"][0]["name"], "get_league_standings");
        assert!(body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_empty_query_is_forwarded() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{}/query", base))
            .json(&json!({"query": ""}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["answer"], "You asked: ");
    }

    #[tokio::test]
    async fn test_resolver_failure_is_generic_500() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{}/query", base))
            .json(&json!({"query": "please fail"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Failed to process query");
    }

    #[tokio::test]
    async fn test_health_and_tools() {
        let base = spawn_server().await;
        let client = reqwest::Client::new();

        let health: serde_json::Value = client
            .get(format!("{}/health", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["status"], "ok");

        let tools: Vec<serde_json::Value> = client
            .get(format!("{}/tools", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert!(names.contains(&"get_league_standings"));
        assert!(names.contains(&"get_fixture_events"));
    }
}
