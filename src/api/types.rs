//! API request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::TripPlan;

/// Request to plan a trip.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanTripRequest {
    /// Destination city (free text, required)
    pub city: String,

    /// Number of days (positive integer, required)
    pub days: u32,
}

/// Terminal state of one planning request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    /// The agent's answer parsed against the plan schema
    Rendered,
    /// The agent answered, but the text was not a valid plan
    ParseFailed,
    /// The agent run itself failed
    AgentFailed,
}

/// Full result of one planning request.
#[derive(Debug, Clone, Serialize)]
pub struct PlanTripResponse {
    /// Unique request identifier
    pub id: Uuid,

    /// Terminal state
    pub outcome: PlanOutcome,

    /// The validated plan, when `outcome` is `rendered`
    pub plan: Option<TripPlan>,

    /// The agent's final text, verbatim. Always preserved, including on
    /// parse failure.
    pub raw_text: String,

    /// Parse error detail, when `outcome` is `parse_failed`
    pub parse_error: Option<String>,

    /// Tool calls and responses recorded during the run
    pub transcript: Vec<TranscriptEntry>,
}

/// A single entry in the agent run transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// Timestamp (RFC 3339)
    pub timestamp: String,

    /// Entry type
    pub entry_type: EntryType,

    /// Content of the entry
    pub content: String,
}

/// Types of transcript entries.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Tool is being called
    ToolCall,
    /// Tool returned a result
    ToolResult,
    /// Agent produced final response
    Response,
    /// An error occurred
    Error,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Error envelope for API failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Stable error kind: `configuration_missing`, `invalid_request`,
    /// or `agent_failed`
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(PlanOutcome::ParseFailed).unwrap(),
            "parse_failed"
        );
        assert_eq!(
            serde_json::to_value(PlanOutcome::AgentFailed).unwrap(),
            "agent_failed"
        );
    }

    #[test]
    fn test_entry_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(EntryType::ToolCall).unwrap(),
            "tool_call"
        );
    }
}
