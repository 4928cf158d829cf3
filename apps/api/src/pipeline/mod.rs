// The tailoring pipeline: extractor → planner → executor, plus the HTTP
// handlers that drive it. All model calls go through llm_client, no direct
// API calls here.

pub mod coerce;
pub mod executor;
pub mod extractor;
pub mod handlers;
pub mod orchestrator;
pub mod planner;
pub mod prompts;
pub mod template;
