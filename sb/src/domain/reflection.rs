//! Post-task reflection

use serde::{Deserialize, Serialize};

/// Highest value the reflection sliders can report
pub const SCORE_MAX: u8 = 100;

/// Post-task reflection: three 0-100 scores plus a free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    /// Mental clarity (0 = foggy, 100 = sharp)
    pub focus: u8,

    /// Emotional state (0 = awful, 100 = pleasant)
    pub mood: u8,

    /// Energy level (0 = drained, 100 = energized)
    pub energy: u8,

    /// A sentence the user tells themself
    pub self_talk: String,
}

impl Reflection {
    /// Create a reflection, clamping each score to 0-100
    pub fn new(focus: u8, mood: u8, energy: u8, self_talk: impl Into<String>) -> Self {
        Self {
            focus: focus.min(SCORE_MAX),
            mood: mood.min(SCORE_MAX),
            energy: energy.min(SCORE_MAX),
            self_talk: self_talk.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflection_clamps_scores() {
        let r = Reflection::new(255, 100, 0, "note");
        assert_eq!(r.focus, 100);
        assert_eq!(r.mood, 100);
        assert_eq!(r.energy, 0);
    }

    #[test]
    fn test_reflection_serde() {
        let r = Reflection::new(80, 60, 40, "开始之后其实没那么难");
        let json = serde_json::to_string(&r).unwrap();
        let back: Reflection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
