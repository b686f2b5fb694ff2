//! Core agent loop implementation.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::api::types::{EntryType, TranscriptEntry};
use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenRouterClient, Role, ToolCall};
use crate::plan::{parse_trip_plan, TripPlan};
use crate::tools::ToolRegistry;

use super::prompt::{build_system_prompt, build_user_request};

/// Result of one planning run.
///
/// Schema conformance is data, not an error: `parsed` is `None` with
/// `parse_error` set when the final text did not validate, and `raw_text`
/// is always preserved for display.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Unique run identifier
    pub id: Uuid,

    /// The agent's final text, verbatim
    pub raw_text: String,

    /// The validated plan, if the final text conformed to the schema
    pub parsed: Option<TripPlan>,

    /// Why validation failed, if it did
    pub parse_error: Option<String>,

    /// Tool calls and results recorded during the run
    pub transcript: Vec<TranscriptEntry>,
}

/// The trip planning agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create a new agent with the given configuration and model credential.
    ///
    /// Callers must check for the credential before constructing: an agent
    /// only exists when planning is actually possible.
    pub fn new(config: Config, api_key: String) -> Self {
        let llm = Arc::new(OpenRouterClient::with_timeout(
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        ));
        let tools = ToolRegistry::new(&config);

        Self { config, llm, tools }
    }

    /// Create an agent with an explicit client and tool set (used by tests).
    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    /// Plan a trip: run the tool-calling loop until the model produces a
    /// final answer or the step budget runs out, then validate the answer.
    ///
    /// Model/client failures propagate as errors; exhausting the step budget
    /// does not, and whatever text exists is returned for display.
    pub async fn plan_trip(&self, city: &str, days: u32) -> anyhow::Result<PlanResult> {
        let mut transcript = Vec::new();

        let system_prompt = build_system_prompt(&self.tools);
        let mut messages = vec![
            ChatMessage {
                role: Role::System,
                content: Some(system_prompt),
                tool_calls: None,
                tool_call_id: None,
            },
            ChatMessage {
                role: Role::User,
                content: Some(build_user_request(city, days)),
                tool_calls: None,
                tool_call_id: None,
            },
        ];

        let tool_schemas = self.tools.get_tool_schemas();

        // Latest assistant text, kept so budget exhaustion still has
        // something to return.
        let mut last_text = String::new();

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(&self.config.default_model, &messages, Some(&tool_schemas))
                .await?;

            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    if let Some(content) = &response.content {
                        last_text = content.clone();
                    }

                    // Add assistant message with tool calls
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content.clone(),
                        tool_calls: Some(tool_calls.clone()),
                        tool_call_id: None,
                    });

                    // Execute each tool call
                    for tool_call in tool_calls {
                        transcript.push(TranscriptEntry {
                            timestamp: now_string(),
                            entry_type: EntryType::ToolCall,
                            content: format!(
                                "Calling tool: {} with args: {}",
                                tool_call.function.name, tool_call.function.arguments
                            ),
                        });

                        let result = self.execute_tool_call(tool_call).await;

                        let result_str = match &result {
                            Ok(output) => output.clone(),
                            Err(e) => format!("Error: {}", e),
                        };

                        transcript.push(TranscriptEntry {
                            timestamp: now_string(),
                            entry_type: EntryType::ToolResult,
                            content: truncate_for_transcript(&result_str, 1000),
                        });

                        // Add tool result message
                        messages.push(ChatMessage {
                            role: Role::Tool,
                            content: Some(result_str),
                            tool_calls: None,
                            tool_call_id: Some(tool_call.id.clone()),
                        });
                    }

                    continue;
                }
            }

            // No tool calls - this is the final response
            if let Some(content) = response.content {
                transcript.push(TranscriptEntry {
                    timestamp: now_string(),
                    entry_type: EntryType::Response,
                    content: truncate_for_transcript(&content, 2000),
                });
                return Ok(finalize(content, transcript));
            }

            // Empty response - shouldn't happen but handle gracefully
            return Err(anyhow::anyhow!("LLM returned empty response"));
        }

        // Step budget exhausted: a non-fatal stop. Return whatever text the
        // model produced along the way and let validation report the rest.
        tracing::warn!(
            "Step budget ({}) exhausted before a final answer",
            self.config.max_iterations
        );
        transcript.push(TranscriptEntry {
            timestamp: now_string(),
            entry_type: EntryType::Error,
            content: format!(
                "Step budget ({}) exhausted before a final answer",
                self.config.max_iterations
            ),
        });

        Ok(finalize(last_text, transcript))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value =
            serde_json::from_str(&tool_call.function.arguments).unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

/// Validate the final text and assemble the run result.
fn finalize(raw_text: String, transcript: Vec<TranscriptEntry>) -> PlanResult {
    let (parsed, parse_error) = match parse_trip_plan(&raw_text) {
        Ok(plan) => (Some(plan), None),
        Err(e) => (None, Some(e)),
    };

    PlanResult {
        id: Uuid::new_v4(),
        raw_text,
        parsed,
        parse_error,
        transcript,
    }
}

/// Get current timestamp as RFC 3339 string.
fn now_string() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Truncate a string for the transcript, respecting char boundaries.
fn truncate_for_transcript(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut idx = max_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    format!("{}... [truncated]", &s[..idx])
}
