//! # Ops Assistant
//!
//! A minimal agentic task runner: turn a free-text request into a plan of
//! tool calls, run them, and report what worked.
//!
//! This library provides:
//! - A planner that asks a language model for a JSON plan and falls back to
//!   keyword rules when the model is rate limited or returns unusable output
//! - An executor that runs each step against a tool registry, containing failures
//! - A verifier that aggregates results into a final report
//! - An HTTP API exposing the whole pipeline
//!
//! ## Example
//!
//! ```rust,ignore
//! use ops_assistant::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config);
//! let report = agent.run_task("weather in Pune and news about electric vehicles").await?;
//! println!("{}", serde_json::to_string_pretty(&report.final_response)?);
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;
pub mod types;

pub use config::Config;
