//! Session state: the stage machine and the execution walker.

mod stage;
mod walker;

pub use stage::Stage;
pub use walker::{WalkStatus, Walker};

/// Preset barrier reasons offered in the stuck overlay
pub const STUCK_REASONS: &[&str] = &[
    "太难了/步骤太大",
    "单纯不想动",
    "很焦虑/抗拒",
    "被别的事分心了",
    "身体不舒服/太累",
    "缺少必要工具",
];
