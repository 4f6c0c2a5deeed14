//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::config::{Prompts, Settings};
use crate::error::{MatchdayError, Result};
use crate::football::FootballClient;
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves a natural-language query into an answer, using whatever tools
/// the implementation has at hand.
#[async_trait]
pub trait QueryResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<AgentResponse>;
}

/// Agent that answers football questions by calling the statistics tools.
pub struct Agent {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with the given tool context, model client and model.
    pub fn new(tools: ToolContext, client: async_openai::Client<OpenAIConfig>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
            tools,
            max_iterations: 10,
            system_prompt: Prompts::default().agent_system(chrono::Local::now().date_naive()),
        }
    }

    /// Build a fully configured agent from settings.
    ///
    /// Fails if either the model key or the football API key is missing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let football = FootballClient::from_settings(settings)?;
        let tools = ToolContext::new(Arc::new(football))
            .with_default_scorer_limit(settings.football.default_scorer_limit);

        let prompts = Prompts::load(
            settings.prompts.custom_file.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let system_prompt = prompts.agent_system(chrono::Local::now().date_naive());

        Ok(Self::new(tools, create_client(&settings.agent)?, &settings.agent.model)
            .with_system_prompt(&system_prompt)
            .with_max_iterations(settings.agent.max_iterations))
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    /// Model used by this agent.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the agent with a user query.
    pub async fn run(&self, query: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| MatchdayError::Agent(e.to_string()))?
                .into(),
        ];

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(query)
                .build()
                .map_err(|e| MatchdayError::Agent(e.to_string()))?
                .into(),
        );

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(MatchdayError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| MatchdayError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| MatchdayError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| MatchdayError::Agent("No response from model".to_string()))?;

            match choice.message.tool_calls {
                Some(ref tool_calls) if !tool_calls.is_empty() => {
                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()
                        .map_err(|e| MatchdayError::Agent(e.to_string()))?;
                    messages.push(assistant_msg.into());

                    for tool_call in tool_calls {
                        let record = self.execute_tool_call(tool_call).await;

                        let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(&tool_call.id)
                            .content(record.result.clone())
                            .build()
                            .map_err(|e| MatchdayError::Agent(e.to_string()))?;
                        messages.push(tool_msg.into());

                        tool_calls_made.push(record);
                    }
                }
                _ => {
                    return Ok(AgentResponse {
                        content: choice.message.content.clone().unwrap_or_default(),
                        tool_calls: tool_calls_made,
                        iterations,
                    });
                }
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Failures are reported back to the model as text so it can retry
    /// with different arguments or explain the problem.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let (result, succeeded) = match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => (output, true),
                Err(e) => {
                    warn!("Tool {} failed: {}", name, e);
                    (format!("Tool error: {}", e), false)
                }
            },
            Err(e) => (format!("Failed to parse tool call: {}", e), false),
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
            succeeded,
        }
    }
}

#[async_trait]
impl QueryResolver for Agent {
    async fn resolve(&self, query: &str) -> Result<AgentResponse> {
        self.run(query).await
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
    /// Whether the tool produced data rather than an error.
    pub succeeded: bool,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::create_client_with_config;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn completion(message: serde_json::Value, finish_reason: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1_720_000_000u32,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": message,
                "finish_reason": finish_reason,
                "logprobs": null
            }]
        })
    }

    fn tool_call_message(name: &str, arguments: &str) -> serde_json::Value {
        json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": name, "arguments": arguments}
            }]
        })
    }

    fn answer_message(content: &str) -> serde_json::Value {
        json!({"role": "assistant", "content": content})
    }

    async fn agent_for(model_server: &MockServer, football_uri: &str) -> Agent {
        let config = OpenAIConfig::new()
            .with_api_key("sk-test")
            .with_api_base(model_server.uri());
        let client = create_client_with_config(config, Duration::from_secs(5)).unwrap();
        let football = FootballClient::new(football_uri, "key", Duration::from_secs(5)).unwrap();
        Agent::new(ToolContext::new(Arc::new(football)), client, "gpt-4o-mini")
    }

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "get_league_standings".to_string(),
            arguments: r#"{"league": "mls"}"#.to_string(),
            result: "[]".to_string(),
            succeeded: true,
        };
        assert_eq!(format!("{}", record), r#"get_league_standings({"league": "mls"})"#);
    }

    #[tokio::test]
    async fn test_answer_without_tools() {
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(answer_message("Hello, ask me about football."), "stop")),
            )
            .mount(&model)
            .await;

        let agent = agent_for(&model, "http://127.0.0.1:9").await;
        let response = agent.resolve("hi").await.unwrap();
        assert_eq!(response.content, "Hello, ask me about football.");
        assert!(response.tool_calls.is_empty());
        assert_eq!(response.iterations, 1);
    }

    #[tokio::test]
    async fn test_query_is_sent_verbatim() {
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains(r#""content":"Who leads MLS?""#))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion(answer_message("Inter Miami."), "stop")),
            )
            .expect(1)
            .mount(&model)
            .await;

        let agent = agent_for(&model, "http://127.0.0.1:9").await;
        let response = agent.run("Who leads MLS?").await.unwrap();
        assert_eq!(response.content, "Inter Miami.");
    }

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let football = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [],
                "response": [{"league": {"standings": [[
                    {"rank": 1, "team": {"name": "Manchester City"}, "points": 91, "goalsDiff": 62,
                     "all": {"played": 38, "win": 28, "draw": 7, "lose": 3,
                             "goals": {"for": 96, "against": 34}}}
                ]]}}]
            })))
            .mount(&football)
            .await;

        let model = MockServer::start().await;
        // Second round trip carries the tool result.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("\"role\":\"tool\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                answer_message("Manchester City won the 2023/24 league with 91 points."),
                "stop",
            )))
            .with_priority(1)
            .mount(&model)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                tool_call_message(
                    "get_league_standings",
                    r#"{"league":"premier league","season":2023}"#,
                ),
                "tool_calls",
            )))
            .mount(&model)
            .await;

        let agent = agent_for(&model, &football.uri()).await;
        let response = agent.resolve("Who won the Premier League in 2023/24?").await.unwrap();

        assert_eq!(
            response.content,
            "Manchester City won the 2023/24 league with 91 points."
        );
        assert_eq!(response.iterations, 2);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "get_league_standings");
        assert!(response.tool_calls[0].succeeded);
        assert!(response.tool_calls[0].result.contains("Manchester City"));
    }

    #[tokio::test]
    async fn test_tool_error_is_fed_back_to_model() {
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Tool error"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                answer_message("I don't know that league."),
                "stop",
            )))
            .with_priority(1)
            .mount(&model)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                tool_call_message("get_league_standings", r#"{"league":"Narnia","season":2024}"#),
                "tool_calls",
            )))
            .mount(&model)
            .await;

        let agent = agent_for(&model, "http://127.0.0.1:9").await;
        let response = agent.resolve("Narnia table?").await.unwrap();
        assert_eq!(response.content, "I don't know that league.");
        assert!(!response.tool_calls[0].succeeded);
        assert!(response.tool_calls[0].result.starts_with("Tool error: Unknown league"));
    }

    #[tokio::test]
    async fn test_max_iterations_exceeded() {
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                tool_call_message("list_leagues", "{}"),
                "tool_calls",
            )))
            .mount(&model)
            .await;

        let agent = agent_for(&model, "http://127.0.0.1:9")
            .await
            .with_max_iterations(2);
        let result = agent.resolve("loop forever").await;
        assert!(matches!(result, Err(MatchdayError::Agent(msg)) if msg.contains("maximum iterations")));
    }

    #[tokio::test]
    async fn test_model_failure_is_openai_error() {
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error",
                          "param": null, "code": "invalid_api_key"}
            })))
            .mount(&model)
            .await;

        let agent = agent_for(&model, "http://127.0.0.1:9").await;
        let result = agent.resolve("table?").await;
        assert!(matches!(result, Err(MatchdayError::OpenAI(_))));
    }
}
