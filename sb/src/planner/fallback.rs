//! Static fallback step lists
//!
//! Used when an LLM call errors. The route must always be walkable, so a
//! failed breakdown degrades to a generic five-step starter and a failed
//! re-plan degrades to a three-step regulation sequence.

use crate::domain::{Step, StepKind};

/// Generic starter route used when the breakdown call fails
pub fn fallback_breakdown() -> Vec<Step> {
    vec![
        Step::new("把手机屏幕扣在桌面上。", StepKind::PhysicalReset),
        Step::new("深呼吸，屏住呼吸3秒钟。", StepKind::PhysiologicalReset),
        Step::new("坐在你的工作台前。", StepKind::PhysicalStart),
        Step::new("打开需要的APP或笔记本。", StepKind::Action),
        Step::new("写下第一句话或画出第一笔。", StepKind::Action),
    ]
}

/// Regulation sequence used when the re-plan call fails
pub fn fallback_replan() -> Vec<Step> {
    vec![
        Step::emergency("先停下来，喝杯水休息一下。", StepKind::PhysiologicalReset),
        Step::emergency("深呼吸三次。", StepKind::PhysiologicalReset),
        Step::emergency("回到座位上。", StepKind::PhysicalStart),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_breakdown_shape() {
        let steps = fallback_breakdown();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].kind, StepKind::PhysicalReset);
        assert_eq!(steps[1].kind, StepKind::PhysiologicalReset);
        assert_eq!(steps[2].kind, StepKind::PhysicalStart);
        assert!(steps.iter().all(|s| !s.emergency));
    }

    #[test]
    fn test_fallback_replan_marked_emergency() {
        let steps = fallback_replan();
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.emergency));
    }
}
