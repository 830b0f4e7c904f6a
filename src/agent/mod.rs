//! Agent module - the plan, execute, verify pipeline.
//!
//! A run goes through three stages, each finishing before the next starts:
//! 1. Plan: ask the model for a JSON plan, falling back to keyword rules
//! 2. Execute: run each step against the tool registry, containing failures
//! 3. Verify: classify the results and build the final report

mod agent_loop;
mod executor;
mod fallback;
mod planner;
mod prompt;
mod verifier;

pub use agent_loop::{Agent, RunReport};
pub use executor::execute_plan;
pub use fallback::{rule_based_plan, KeywordExtractor, TaskExtractor};
pub use planner::{PlanError, Planner};
pub use prompt::build_planner_prompt;
pub use verifier::verify_execution;
