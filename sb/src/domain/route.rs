//! Route - one named session of intent, steps, and reflection

use serde::{Deserialize, Serialize};

use super::{Reflection, Step, generate_id, now_ms};

/// A named session record: the stated intent, its micro-steps, and the
/// eventual reflection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Unique identifier
    pub id: String,

    /// The target goal ("Want to do")
    pub name: String,

    /// What the user is doing right now ("Doing now")
    pub current_status: String,

    /// Ordered micro-steps
    pub steps: Vec<Step>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Completion timestamp, set when the reflection is submitted
    #[serde(default)]
    pub completed_at: Option<i64>,

    /// Post-task reflection
    #[serde(default)]
    pub reflection: Option<Reflection>,
}

impl Route {
    /// Create a new route from the intent inputs and a generated breakdown
    pub fn new(current_status: impl Into<String>, name: impl Into<String>, steps: Vec<Step>) -> Self {
        let name = name.into();
        Self {
            id: generate_id("route", &name),
            name,
            current_status: current_status.into(),
            steps,
            created_at: now_ms(),
            completed_at: None,
            reflection: None,
        }
    }

    /// Attach the reflection and stamp completion time
    pub fn finish(&mut self, reflection: Reflection) {
        self.reflection = Some(reflection);
        self.completed_at = Some(now_ms());
    }

    /// Total wall-clock seconds recorded across all steps
    pub fn total_time_secs(&self) -> u64 {
        self.steps.iter().map(|s| s.time_spent_secs).sum()
    }

    /// Number of completed steps
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Produce a fresh copy for re-running this route.
    ///
    /// Emergency steps are dropped, per-step progress is cleared, and the
    /// copy gets a new id and creation time. Reflection and completion
    /// stamps do not carry over.
    pub fn reset_for_reuse(&self) -> Self {
        let steps = self
            .steps
            .iter()
            .filter(|s| !s.emergency)
            .map(|s| {
                let mut step = s.clone();
                step.reset();
                step
            })
            .collect();

        Self {
            id: generate_id("route", &self.name),
            name: self.name.clone(),
            current_status: self.current_status.clone(),
            steps,
            created_at: now_ms(),
            completed_at: None,
            reflection: None,
        }
    }
}

/// Format seconds the way the summary screen shows them: `42秒` or `3分 20秒`
pub fn format_secs(total: u64) -> String {
    if total < 60 {
        format!("{}秒", total)
    } else {
        format!("{}分 {}秒", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StepKind;

    fn sample_route() -> Route {
        Route::new(
            "刷抖音",
            "写数学作业",
            vec![
                Step::new("把手机扣在桌上", StepKind::PhysicalReset),
                Step::new("深呼吸三次", StepKind::PhysiologicalReset),
                Step::new("打开作业本", StepKind::PhysicalStart),
                Step::new("写下第一行", StepKind::Action),
            ],
        )
    }

    #[test]
    fn test_route_new() {
        let route = sample_route();
        assert!(route.id.contains("-route-"));
        assert_eq!(route.steps.len(), 4);
        assert!(route.completed_at.is_none());
        assert!(route.reflection.is_none());
    }

    #[test]
    fn test_total_time() {
        let mut route = sample_route();
        route.steps[0].complete(10);
        route.steps[1].complete(5);
        assert_eq!(route.total_time_secs(), 15);
        assert_eq!(route.completed_steps(), 2);
    }

    #[test]
    fn test_finish_sets_reflection_and_timestamp() {
        let mut route = sample_route();
        route.finish(Reflection::new(80, 70, 60, "没那么难"));
        assert!(route.reflection.is_some());
        assert!(route.completed_at.is_some());
    }

    #[test]
    fn test_reset_for_reuse_clears_progress() {
        let mut route = sample_route();
        route.steps[0].complete(30);
        route.steps.push(Step::emergency("先休息一下", StepKind::PhysiologicalReset));
        route.finish(Reflection::new(50, 50, 50, ""));

        let fresh = route.reset_for_reuse();

        assert_ne!(fresh.id, route.id);
        assert_eq!(fresh.name, route.name);
        // Emergency step dropped
        assert_eq!(fresh.steps.len(), 4);
        assert!(fresh.steps.iter().all(|s| !s.completed && s.time_spent_secs == 0));
        assert!(fresh.reflection.is_none());
        assert!(fresh.completed_at.is_none());
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(0), "0秒");
        assert_eq!(format_secs(59), "59秒");
        assert_eq!(format_secs(60), "1分 0秒");
        assert_eq!(format_secs(200), "3分 20秒");
    }
}
