//! Planner - LLM-driven breakdown and re-plan calls
//!
//! Sends the user's intent to the LLM and parses the ordered micro-step
//! list out of a forced tool call. Output is trusted as far as its declared
//! JSON shape and no further: the only failure mode is a parse/transport
//! error, which the `*_or_fallback` wrappers absorb with static step lists.

use std::sync::Arc;

use eyre::{Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::domain::{Step, StepKind};
use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, Message, ToolDefinition};
use crate::prompts::{PromptLoader, ReplanContext};

mod fallback;

pub use fallback::{fallback_breakdown, fallback_replan};

/// Tool name both planner calls force their output through
const SUBMIT_TOOL: &str = "submit_breakdown";

/// LLM output schema for one step
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StepOutput {
    /// The micro-step instruction
    instruction: String,
    /// The category of the step
    #[serde(rename = "type")]
    kind: StepKind,
}

/// Full breakdown output from the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BreakdownOutput {
    steps: Vec<StepOutput>,
}

/// Drives the two outbound LLM calls: breakdown and re-plan
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    config: PlannerConfig,
}

impl Planner {
    /// Create a new planner
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, config: PlannerConfig) -> Self {
        Self { llm, prompts, config }
    }

    /// Break the stated goal into micro-steps
    pub async fn breakdown(&self, current_status: &str, target_goal: &str) -> Result<Vec<Step>> {
        info!(%target_goal, "Requesting breakdown");

        let request = CompletionRequest {
            system_prompt: self.prompts.breakdown_prompt()?,
            messages: vec![Message::user(format!(
                "Current State: {}. Target Goal: {}.",
                current_status, target_goal
            ))],
            tools: vec![self.submit_tool()],
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
        };

        let response = self.llm.complete(request).await?;
        let output = self.parse_output(response)?;

        Ok(output
            .steps
            .into_iter()
            .map(|s| Step::new(s.instruction, s.kind))
            .collect())
    }

    /// Breakdown with static fallback on any error
    pub async fn breakdown_or_fallback(&self, current_status: &str, target_goal: &str) -> Vec<Step> {
        match self.breakdown(current_status, target_goal).await {
            Ok(steps) => steps,
            Err(e) => {
                warn!(error = %e, "Breakdown failed, using fallback steps");
                fallback_breakdown()
            }
        }
    }

    /// Re-plan the remaining route after the user reported being stuck
    ///
    /// Returns the replacement tail: it replaces the stuck step and
    /// everything after it. All returned steps are marked emergency.
    pub async fn replan(&self, current_step: &str, barrier: &str, target_goal: &str) -> Result<Vec<Step>> {
        info!(%barrier, "Requesting re-plan");

        let context = ReplanContext {
            step: current_step.to_string(),
            barrier: barrier.to_string(),
            goal: target_goal.to_string(),
        };

        let request = CompletionRequest {
            system_prompt: self.prompts.replan_prompt()?,
            messages: vec![Message::user(self.prompts.replan_request(&context)?)],
            tools: vec![self.submit_tool()],
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
        };

        let response = self.llm.complete(request).await?;
        let output = self.parse_output(response)?;

        Ok(output
            .steps
            .into_iter()
            .map(|s| Step::emergency(s.instruction, s.kind))
            .collect())
    }

    /// Re-plan with static fallback on any error
    pub async fn replan_or_fallback(&self, current_step: &str, barrier: &str, target_goal: &str) -> Vec<Step> {
        match self.replan(current_step, barrier, target_goal).await {
            Ok(steps) => steps,
            Err(e) => {
                warn!(error = %e, "Re-plan failed, using fallback steps");
                fallback_replan()
            }
        }
    }

    /// Tool definition shared by both calls
    fn submit_tool(&self) -> ToolDefinition {
        ToolDefinition::new(
            SUBMIT_TOOL,
            "Submit the micro-step breakdown. Call this once with all steps in order.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "steps": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "instruction": {
                                    "type": "string",
                                    "description": "The micro-step instruction in Simplified Chinese"
                                },
                                "type": {
                                    "type": "string",
                                    "enum": [
                                        "PHYSICAL_RESET",
                                        "PHYSIOLOGICAL_RESET",
                                        "PHYSICAL_START",
                                        "ACTION"
                                    ],
                                    "description": "The category of the step"
                                }
                            },
                            "required": ["instruction", "type"]
                        }
                    }
                },
                "required": ["steps"]
            }),
        )
    }

    /// Parse the step list out of a completion response
    ///
    /// Prefers the forced tool call; falls back to parsing the text content
    /// as JSON (either `{"steps": [...]}` or a bare array).
    fn parse_output(&self, response: CompletionResponse) -> Result<BreakdownOutput> {
        for tool_call in &response.tool_calls {
            if tool_call.name == SUBMIT_TOOL {
                let output: BreakdownOutput = serde_json::from_value(tool_call.input.clone())?;
                if output.steps.is_empty() {
                    bail!("Planner produced zero steps");
                }
                return Ok(output);
            }
        }

        if let Some(content) = &response.content {
            if let Ok(output) = serde_json::from_str::<BreakdownOutput>(content) {
                if !output.steps.is_empty() {
                    return Ok(output);
                }
            }
            if let Ok(steps) = serde_json::from_str::<Vec<StepOutput>>(content) {
                if !steps.is_empty() {
                    return Ok(BreakdownOutput { steps });
                }
            }
        }

        bail!("LLM did not produce a valid breakdown")
    }
}
