//! Session stage machine
//!
//! One stage is active at a time; the TUI renders whatever the current
//! stage is. Transitions are linear with a few explicit escape hatches
//! (back to intent, archive reuse).

use serde::{Deserialize, Serialize};

/// The screen/phase the session is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Collecting the two intent strings
    #[default]
    Intent,
    /// Breakdown request in flight
    BreakdownLoading,
    /// Showing the generated route before execution
    RoutePreview,
    /// Walking steps one at a time
    Execution,
    /// Objective recap: per-step and total time
    Summary,
    /// Collecting the three scores and self-talk
    Reflection,
    /// Browsing saved routes
    Archive,
}

impl Stage {
    /// Whether moving from `self` to `to` is a legal transition
    pub fn can_transition(self, to: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, to),
            (Intent, BreakdownLoading)
                | (Intent, Archive)
                | (BreakdownLoading, RoutePreview)
                | (BreakdownLoading, Intent)
                | (RoutePreview, Execution)
                | (RoutePreview, BreakdownLoading) // regenerate
                | (RoutePreview, Intent)
                | (Execution, Summary)
                | (Execution, Intent) // abandon
                | (Summary, Reflection)
                | (Summary, Intent)
                | (Reflection, Archive)
                | (Archive, Intent)
                | (Archive, RoutePreview) // reuse
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Intent => "intent",
            Self::BreakdownLoading => "breakdown_loading",
            Self::RoutePreview => "route_preview",
            Self::Execution => "execution",
            Self::Summary => "summary",
            Self::Reflection => "reflection",
            Self::Archive => "archive",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stage_is_intent() {
        assert_eq!(Stage::default(), Stage::Intent);
    }

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            Stage::Intent,
            Stage::BreakdownLoading,
            Stage::RoutePreview,
            Stage::Execution,
            Stage::Summary,
            Stage::Reflection,
            Stage::Archive,
            Stage::Intent,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition(pair[1]), "{} -> {} should be legal", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_regenerate_and_reuse() {
        assert!(Stage::RoutePreview.can_transition(Stage::BreakdownLoading));
        assert!(Stage::Archive.can_transition(Stage::RoutePreview));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!Stage::Intent.can_transition(Stage::Execution));
        assert!(!Stage::Execution.can_transition(Stage::Reflection));
        assert!(!Stage::Reflection.can_transition(Stage::Intent));
        assert!(!Stage::Summary.can_transition(Stage::Execution));
    }

    #[test]
    fn test_stage_serde() {
        let json = serde_json::to_string(&Stage::RoutePreview).unwrap();
        assert_eq!(json, "\"route_preview\"");
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stage::RoutePreview);
    }
}
