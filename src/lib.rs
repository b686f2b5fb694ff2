//! # Trip Planner
//!
//! A small demonstration service that plans trips with an LLM agent.
//!
//! This library provides:
//! - An HTTP form and JSON API for submitting a destination and trip length
//! - A tool-based agent loop that gathers weather, flight, and hotel data
//! - Strict parsing of the agent's JSON answer into a six-section trip plan
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a city and day count via the API
//! 2. Build context with system prompt and available tools
//! 3. Call LLM, parse response, execute any tool calls
//! 4. Feed results back to LLM, repeat until a final answer or the step
//!    budget runs out, then validate the answer against the plan schema
//!
//! ## Example
//!
//! ```rust,ignore
//! use trip_planner::{config::Config, agent::Agent};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config, api_key);
//! let result = agent.plan_trip("Paris", 3).await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod plan;
pub mod render;
pub mod tools;

pub use config::Config;
