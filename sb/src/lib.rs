//! Snowball - micro-step task initiation coach
//!
//! Snowball helps a user overcome task-initiation inertia: it sends the
//! stated intent ("doing now" / "want to do") to an LLM that decomposes it
//! into 5-7 tiny micro-steps, walks the user through them one at a time
//! while timing each step, offers an LLM re-plan when the user gets stuck,
//! collects a post-task reflection, and keeps an in-session archive of
//! completed routes.
//!
//! # Modules
//!
//! - [`domain`] - Step, Route, and Reflection types
//! - [`llm`] - LLM client trait and provider implementations
//! - [`planner`] - the breakdown and re-plan calls (with static fallbacks)
//! - [`session`] - stage machine and execution walker
//! - [`archive`] - in-memory route library
//! - [`prompts`] - Handlebars prompt templates
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//! - [`tui`] - terminal UI, one screen per stage

pub mod archive;
pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use archive::Archive;
pub use config::{Config, LlmConfig, PlannerConfig, UiConfig};
pub use domain::{Reflection, Route, Step, StepKind, format_secs};
pub use llm::{
    AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client,
};
pub use planner::{Planner, fallback_breakdown, fallback_replan};
pub use prompts::{PromptLoader, ReplanContext};
pub use session::{STUCK_REASONS, Stage, WalkStatus, Walker};
