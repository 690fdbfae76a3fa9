//! Micro-step type and categories

use serde::{Deserialize, Serialize};

use super::generate_id;

/// Category of a micro-step
///
/// The breakdown sequence runs reset -> reset -> start -> actions; the
/// category drives the icon and color shown during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    /// Tiny change to the environment (put the phone face down)
    PhysicalReset,
    /// Body action (one deep breath, stand up)
    PhysiologicalReset,
    /// Touch the tool needed for the task (open the laptop lid)
    PhysicalStart,
    /// The actual work
    Action,
}

impl StepKind {
    /// Icon shown on the execution card
    pub fn icon(&self) -> &'static str {
        match self {
            Self::PhysicalReset => "🧹",
            Self::PhysiologicalReset => "🧘",
            Self::PhysicalStart => "🚀",
            Self::Action => "⚡",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhysicalReset => write!(f, "physical_reset"),
            Self::PhysiologicalReset => write!(f, "physiological_reset"),
            Self::PhysicalStart => write!(f, "physical_start"),
            Self::Action => write!(f, "action"),
        }
    }
}

/// A single micro-step shown to the user during execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Unique identifier
    pub id: String,

    /// Short imperative instruction
    pub instruction: String,

    /// Step category
    pub kind: StepKind,

    /// Whether the user has completed this step
    #[serde(default)]
    pub completed: bool,

    /// Recorded wall-clock time spent on this step
    #[serde(default)]
    pub time_spent_secs: u64,

    /// True when this step came from a re-plan after the user got stuck
    #[serde(default)]
    pub emergency: bool,
}

impl Step {
    /// Create a fresh, uncompleted step
    pub fn new(instruction: impl Into<String>, kind: StepKind) -> Self {
        let instruction = instruction.into();
        Self {
            id: generate_id("step", &instruction),
            instruction,
            kind,
            completed: false,
            time_spent_secs: 0,
            emergency: false,
        }
    }

    /// Create a step marked as coming from a re-plan
    pub fn emergency(instruction: impl Into<String>, kind: StepKind) -> Self {
        let mut step = Self::new(instruction, kind);
        step.emergency = true;
        step
    }

    /// Mark the step completed, recording the measured time
    pub fn complete(&mut self, time_spent_secs: u64) {
        self.completed = true;
        self.time_spent_secs = time_spent_secs;
    }

    /// Clear execution progress (for route reuse)
    pub fn reset(&mut self) {
        self.completed = false;
        self.time_spent_secs = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_new() {
        let step = Step::new("打开笔记本", StepKind::PhysicalStart);
        assert!(step.id.contains("-step-"));
        assert!(!step.completed);
        assert_eq!(step.time_spent_secs, 0);
        assert!(!step.emergency);
    }

    #[test]
    fn test_step_complete_and_reset() {
        let mut step = Step::new("深呼吸", StepKind::PhysiologicalReset);
        step.complete(42);
        assert!(step.completed);
        assert_eq!(step.time_spent_secs, 42);

        step.reset();
        assert!(!step.completed);
        assert_eq!(step.time_spent_secs, 0);
    }

    #[test]
    fn test_step_kind_wire_format() {
        let json = serde_json::to_string(&StepKind::PhysicalReset).unwrap();
        assert_eq!(json, "\"PHYSICAL_RESET\"");

        let kind: StepKind = serde_json::from_str("\"PHYSIOLOGICAL_RESET\"").unwrap();
        assert_eq!(kind, StepKind::PhysiologicalReset);
    }

    #[test]
    fn test_step_kind_unknown_rejected() {
        let result = serde_json::from_str::<StepKind>("\"MENTAL_RESET\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_step_serde_roundtrip() {
        let mut step = Step::emergency("喝杯水", StepKind::PhysiologicalReset);
        step.complete(7);

        let json = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, step.id);
        assert_eq!(back.kind, StepKind::PhysiologicalReset);
        assert!(back.emergency);
        assert_eq!(back.time_spent_secs, 7);
    }
}
