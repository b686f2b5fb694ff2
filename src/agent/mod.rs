//! Agent module - the trip planning agent logic.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with system prompt and the user's trip request
//! 2. Call LLM with the weather, flight, and hotel tools
//! 3. If LLM requests a tool call, execute it and feed the result back
//! 4. Repeat until LLM produces a final answer or the step budget runs out,
//!    then validate the answer against the trip plan schema

mod agent_loop;
mod prompt;

pub use agent_loop::{Agent, PlanResult};
pub use prompt::{build_system_prompt, build_user_request};
