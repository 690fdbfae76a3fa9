//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.

use std::time::Instant;

use rand::Rng;

use crate::archive::Archive;
use crate::domain::{Reflection, Route};
use crate::session::{STUCK_REASONS, Stage, Walker};

/// Tips rotated on the loading screen while the breakdown request is in flight
pub const LOADING_TIPS: &[&str] = &[
    "正在把大象切成一口大小的块...",
    "正在寻找丢失的多巴胺...",
    "正在与你的前额叶皮层谈判...",
    "正在把珠穆朗玛峰变成小土坡...",
    "别急，慢就是快...",
    "正在给你的执行功能充电...",
    "正在把'不可能'变成'稍微动一下'...",
    "正在清理大脑缓存...",
    "正在给你的大脑发糖...",
    "任务正在解压缩...",
    "正在把'拖延'赶出房间...",
    "深呼吸，马上就好...",
];

/// Which intent input currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntentField {
    #[default]
    Current,
    Target,
}

/// The intent form: two short text inputs
#[derive(Debug, Clone, Default)]
pub struct IntentForm {
    /// What the user is doing right now
    pub current: String,
    /// What they want to do instead
    pub target: String,
    /// Focused input
    pub field: IntentField,
}

impl IntentForm {
    /// Both inputs long enough to submit (matches the original's > 2 rule)
    pub fn is_ready(&self) -> bool {
        self.current.chars().count() > 2 && self.target.chars().count() > 2
    }

    /// Mutable access to the focused input buffer
    pub fn focused_mut(&mut self) -> &mut String {
        match self.field {
            IntentField::Current => &mut self.current,
            IntentField::Target => &mut self.target,
        }
    }

    /// Move focus to the other input
    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            IntentField::Current => IntentField::Target,
            IntentField::Target => IntentField::Current,
        };
    }
}

/// Stuck overlay state during execution
#[derive(Debug, Clone)]
pub struct StuckOverlay {
    /// Selected preset reason index
    pub selected: usize,
    /// Free-text reason; overrides the preset when non-empty
    pub custom: String,
    /// Re-plan request in flight
    pub loading: bool,
}

impl StuckOverlay {
    pub fn new() -> Self {
        Self {
            selected: 0,
            custom: String::new(),
            loading: false,
        }
    }

    /// The barrier string a re-plan request would carry
    pub fn barrier(&self) -> &str {
        if self.custom.is_empty() {
            STUCK_REASONS[self.selected]
        } else {
            &self.custom
        }
    }
}

impl Default for StuckOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Which reflection field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReflectionField {
    #[default]
    Focus,
    Mood,
    Energy,
    SelfTalk,
}

impl ReflectionField {
    pub fn next(self) -> Self {
        match self {
            Self::Focus => Self::Mood,
            Self::Mood => Self::Energy,
            Self::Energy => Self::SelfTalk,
            Self::SelfTalk => Self::Focus,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Focus => Self::SelfTalk,
            Self::Mood => Self::Focus,
            Self::Energy => Self::Mood,
            Self::SelfTalk => Self::Energy,
        }
    }
}

/// The reflection form: three sliders plus a note
#[derive(Debug, Clone)]
pub struct ReflectionForm {
    pub focus: u8,
    pub mood: u8,
    pub energy: u8,
    pub self_talk: String,
    pub field: ReflectionField,
}

impl ReflectionForm {
    pub fn new() -> Self {
        Self {
            focus: 50,
            mood: 50,
            energy: 50,
            self_talk: String::new(),
            field: ReflectionField::default(),
        }
    }

    /// Adjust the focused slider by the given delta (no-op on the note)
    pub fn adjust(&mut self, delta: i16) {
        let slot = match self.field {
            ReflectionField::Focus => &mut self.focus,
            ReflectionField::Mood => &mut self.mood,
            ReflectionField::Energy => &mut self.energy,
            ReflectionField::SelfTalk => return,
        };
        *slot = (*slot as i16 + delta).clamp(0, 100) as u8;
    }

    /// Build the domain reflection from the form
    pub fn to_reflection(&self) -> Reflection {
        Reflection::new(self.focus, self.mood, self.energy, self.self_talk.clone())
    }
}

impl Default for ReflectionForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Work the runner must kick off on behalf of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Request a breakdown for the intent inputs
    Breakdown { current: String, target: String },
    /// Request a re-plan of the remaining steps
    Replan {
        step: String,
        barrier: String,
        goal: String,
    },
}

/// Confirmation dialog for destructive actions
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub message: String,
    pub action: ConfirmAction,
    pub selected_yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Delete an archived route
    DeleteRoute(String),
    /// Abandon the route mid-execution
    Abandon,
}

impl ConfirmDialog {
    pub fn delete_route(id: impl Into<String>) -> Self {
        Self {
            message: "确定要删除这条路线记录吗？".to_string(),
            action: ConfirmAction::DeleteRoute(id.into()),
            selected_yes: false,
        }
    }

    pub fn abandon() -> Self {
        Self {
            message: "要放弃当前路线回到开始吗？".to_string(),
            action: ConfirmAction::Abandon,
            selected_yes: false,
        }
    }
}

/// Application state - everything the views render from
pub struct AppState {
    /// Current session stage
    pub stage: Stage,

    /// Intent form inputs
    pub intent: IntentForm,

    /// The generated route awaiting execution (preview stage)
    pub route: Option<Route>,

    /// Execution walker (execution stage onwards)
    pub walker: Option<Walker>,

    /// When the active step started (execution timing)
    pub step_started: Option<Instant>,

    /// Finished route carried from summary into reflection
    pub finished_route: Option<Route>,

    /// Stuck overlay, when open
    pub stuck: Option<StuckOverlay>,

    /// Reflection form
    pub reflection: ReflectionForm,

    /// Saved routes for this session
    pub archive: Archive,

    /// Selected row in the archive list
    pub archive_selected: usize,

    /// Index of the currently shown loading tip
    pub tip_index: usize,

    /// Scroll offset in the route preview
    pub preview_scroll: usize,

    /// Work for the runner to pick up
    pub pending_action: Option<PendingAction>,

    /// Open confirmation dialog
    pub confirm: Option<ConfirmDialog>,

    /// Transient error message (cleared on next key press)
    pub error: Option<String>,

    /// Set when the user asked to quit
    pub should_quit: bool,
}

impl AppState {
    /// Create the initial state: intent stage, random starting tip
    pub fn new() -> Self {
        Self {
            stage: Stage::Intent,
            intent: IntentForm::default(),
            route: None,
            walker: None,
            step_started: None,
            finished_route: None,
            stuck: None,
            reflection: ReflectionForm::new(),
            archive: Archive::new(),
            archive_selected: 0,
            tip_index: rand::rng().random_range(0..LOADING_TIPS.len()),
            preview_scroll: 0,
            pending_action: None,
            confirm: None,
            error: None,
            should_quit: false,
        }
    }

    /// Advance the loading tip to the next one in order
    pub fn rotate_tip(&mut self) {
        self.tip_index = (self.tip_index + 1) % LOADING_TIPS.len();
    }

    /// The currently shown loading tip
    pub fn current_tip(&self) -> &'static str {
        LOADING_TIPS[self.tip_index]
    }

    /// Clear any transient error
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_form_ready() {
        let mut form = IntentForm::default();
        assert!(!form.is_ready());
        form.current = "刷抖音".to_string();
        form.target = "写作业".to_string();
        assert!(form.is_ready());
        form.target = "跑步".to_string();
        assert!(!form.is_ready());
    }

    #[test]
    fn test_intent_form_focus_toggle() {
        let mut form = IntentForm::default();
        assert_eq!(form.field, IntentField::Current);
        form.focused_mut().push('a');
        form.toggle_field();
        form.focused_mut().push('b');
        assert_eq!(form.current, "a");
        assert_eq!(form.target, "b");
    }

    #[test]
    fn test_stuck_overlay_barrier() {
        let mut overlay = StuckOverlay::new();
        assert_eq!(overlay.barrier(), STUCK_REASONS[0]);
        overlay.selected = 2;
        assert_eq!(overlay.barrier(), STUCK_REASONS[2]);
        overlay.custom = "其他原因".to_string();
        assert_eq!(overlay.barrier(), "其他原因");
    }

    #[test]
    fn test_reflection_form_adjust_clamps() {
        let mut form = ReflectionForm::new();
        form.adjust(60);
        assert_eq!(form.focus, 100);
        form.adjust(5);
        assert_eq!(form.focus, 100);
        form.field = ReflectionField::Mood;
        form.adjust(-60);
        assert_eq!(form.mood, 0);
        // Note field ignores adjustment
        form.field = ReflectionField::SelfTalk;
        form.adjust(10);
        assert_eq!(form.focus, 100);
    }

    #[test]
    fn test_tip_rotation_wraps() {
        let mut state = AppState::new();
        state.tip_index = LOADING_TIPS.len() - 1;
        state.rotate_tip();
        assert_eq!(state.tip_index, 0);
    }
}
