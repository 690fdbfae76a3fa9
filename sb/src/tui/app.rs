//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, ConfirmAction, ConfirmDialog, PendingAction, ReflectionField, StuckOverlay};
use crate::session::{STUCK_REASONS, Stage, WalkStatus, Walker};

/// TUI application
pub struct App {
    /// Application state
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self { state: AppState::new() }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit immediately.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C force quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("handle_key: Ctrl+C force quit");
            return true;
        }

        self.state.clear_error();

        if self.state.confirm.is_some() {
            self.handle_confirm_key(key);
            return self.state.should_quit;
        }

        match self.state.stage {
            Stage::Intent => self.handle_intent_key(key),
            Stage::BreakdownLoading => {} // nothing to do but wait
            Stage::RoutePreview => self.handle_preview_key(key),
            Stage::Execution => self.handle_execution_key(key),
            Stage::Summary => self.handle_summary_key(key),
            Stage::Reflection => self.handle_reflection_key(key),
            Stage::Archive => self.handle_archive_key(key),
        }

        self.state.should_quit
    }

    /// Move to a stage, asserting the transition is legal
    fn goto(&mut self, to: Stage) {
        debug_assert!(
            self.state.stage.can_transition(to),
            "illegal stage transition {} -> {}",
            self.state.stage,
            to
        );
        debug!(from = %self.state.stage, to = %to, "stage transition");
        self.state.stage = to;
    }

    // === Intent ===

    fn handle_intent_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.archive_selected = 0;
                self.goto(Stage::Archive);
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                self.state.intent.toggle_field();
            }
            KeyCode::Enter => {
                if self.state.intent.is_ready() {
                    let current = self.state.intent.current.clone();
                    let target = self.state.intent.target.clone();
                    self.state.pending_action = Some(PendingAction::Breakdown { current, target });
                    self.goto(Stage::BreakdownLoading);
                } else {
                    self.state.error = Some("两个输入都需要至少3个字符".to_string());
                }
            }
            KeyCode::Backspace => {
                self.state.intent.focused_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.intent.focused_mut().push(c);
            }
            _ => {}
        }
    }

    // === Route preview ===

    fn handle_preview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some(route) = self.state.route.take() {
                    self.state.walker = Some(Walker::new(route));
                    self.state.step_started = Some(Instant::now());
                    self.state.stuck = None;
                    self.goto(Stage::Execution);
                }
            }
            KeyCode::Char('r') => {
                // Regenerate with the same inputs
                let current = self.state.intent.current.clone();
                let target = self.state.intent.target.clone();
                self.state.route = None;
                self.state.pending_action = Some(PendingAction::Breakdown { current, target });
                self.goto(Stage::BreakdownLoading);
            }
            KeyCode::Esc | KeyCode::Char('b') => {
                self.state.route = None;
                self.goto(Stage::Intent);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.preview_scroll = self.state.preview_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.state.route.as_ref().map(|r| r.steps.len()).unwrap_or(0);
                if self.state.preview_scroll + 1 < len {
                    self.state.preview_scroll += 1;
                }
            }
            KeyCode::Char('q') => {
                self.state.should_quit = true;
            }
            _ => {}
        }
    }

    // === Execution ===

    fn handle_execution_key(&mut self, key: KeyEvent) {
        if self.state.stuck.is_some() {
            self.handle_stuck_key(key);
            return;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.complete_current_step();
            }
            KeyCode::Char('s') => {
                self.state.stuck = Some(StuckOverlay::new());
            }
            KeyCode::Esc => {
                self.state.confirm = Some(ConfirmDialog::abandon());
            }
            _ => {}
        }
    }

    fn complete_current_step(&mut self) {
        let elapsed = self
            .state
            .step_started
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);

        if let Some(walker) = &mut self.state.walker {
            match walker.complete_current(elapsed) {
                WalkStatus::Advanced => {
                    self.state.step_started = Some(Instant::now());
                }
                WalkStatus::Finished => {
                    self.state.step_started = None;
                    self.goto(Stage::Summary);
                }
            }
        }
    }

    fn handle_stuck_key(&mut self, key: KeyEvent) {
        let Some(stuck) = self.state.stuck.as_mut() else {
            return;
        };

        // A re-plan is in flight; only allow waiting
        if stuck.loading {
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.state.stuck = None;
            }
            KeyCode::Up => {
                stuck.selected = stuck.selected.checked_sub(1).unwrap_or(STUCK_REASONS.len() - 1);
                stuck.custom.clear();
            }
            KeyCode::Down => {
                stuck.selected = (stuck.selected + 1) % STUCK_REASONS.len();
                stuck.custom.clear();
            }
            KeyCode::Backspace => {
                stuck.custom.pop();
            }
            KeyCode::Enter => {
                let barrier = stuck.barrier().to_string();
                let (step, goal) = match self.state.walker.as_ref() {
                    Some(walker) => (
                        walker.current_step().map(|s| s.instruction.clone()).unwrap_or_default(),
                        walker.route().name.clone(),
                    ),
                    None => return,
                };
                stuck.loading = true;
                self.state.pending_action = Some(PendingAction::Replan { step, barrier, goal });
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                stuck.custom.push(c);
            }
            _ => {}
        }
    }

    // === Summary ===

    fn handle_summary_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.state.reflection = Default::default();
            self.goto(Stage::Reflection);
        }
    }

    // === Reflection ===

    fn handle_reflection_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.reflection.field = self.state.reflection.field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.reflection.field = self.state.reflection.field.prev();
            }
            KeyCode::Left => {
                self.state.reflection.adjust(-5);
            }
            KeyCode::Right => {
                self.state.reflection.adjust(5);
            }
            KeyCode::Enter => {
                self.submit_reflection();
            }
            KeyCode::Backspace => {
                if self.state.reflection.field == ReflectionField::SelfTalk {
                    self.state.reflection.self_talk.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.state.reflection.field == ReflectionField::SelfTalk {
                    self.state.reflection.self_talk.push(c);
                }
            }
            _ => {}
        }
    }

    fn submit_reflection(&mut self) {
        // The walker was consumed into finished_route when the summary opened
        if let Some(mut route) = self.state.finished_route.take() {
            route.finish(self.state.reflection.to_reflection());
            self.state.archive.save(route);
        }
        self.state.archive_selected = 0;
        self.goto(Stage::Archive);
    }

    // === Archive ===

    fn handle_archive_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.archive_selected = self.state.archive_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.archive_selected + 1 < self.state.archive.len() {
                    self.state.archive_selected += 1;
                }
            }
            KeyCode::Enter => {
                let id = self
                    .state
                    .archive
                    .routes()
                    .get(self.state.archive_selected)
                    .map(|r| r.id.clone());
                if let Some(id) = id
                    && let Some(fresh) = self.state.archive.reuse(&id)
                {
                    self.state.route = Some(fresh);
                    self.state.preview_scroll = 0;
                    self.goto(Stage::RoutePreview);
                }
            }
            KeyCode::Char('d') => {
                let id = self
                    .state
                    .archive
                    .routes()
                    .get(self.state.archive_selected)
                    .map(|r| r.id.clone());
                if let Some(id) = id {
                    self.state.confirm = Some(ConfirmDialog::delete_route(id));
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state.intent = Default::default();
                self.goto(Stage::Intent);
            }
            KeyCode::Char('q') => {
                self.state.should_quit = true;
            }
            _ => {}
        }
    }

    // === Confirm dialog ===

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.state.confirm.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                dialog.selected_yes = !dialog.selected_yes;
            }
            KeyCode::Char('y') => {
                dialog.selected_yes = true;
                self.execute_confirmed();
            }
            KeyCode::Enter => {
                if dialog.selected_yes {
                    self.execute_confirmed();
                } else {
                    self.state.confirm = None;
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                self.state.confirm = None;
            }
            _ => {}
        }
    }

    fn execute_confirmed(&mut self) {
        let Some(dialog) = self.state.confirm.take() else {
            return;
        };

        match dialog.action {
            ConfirmAction::DeleteRoute(id) => {
                self.state.archive.delete(&id);
                if self.state.archive_selected >= self.state.archive.len() {
                    self.state.archive_selected = self.state.archive.len().saturating_sub(1);
                }
            }
            ConfirmAction::Abandon => {
                self.state.walker = None;
                self.state.step_started = None;
                self.state.stuck = None;
                self.goto(Stage::Intent);
            }
        }
    }

    /// Called by the runner when the walker reaches the summary stage:
    /// move the finished route out of the walker for the reflection step.
    pub fn take_finished_route(&mut self) {
        if self.state.stage == Stage::Summary
            && self.state.finished_route.is_none()
            && let Some(walker) = self.state.walker.take()
        {
            self.state.finished_route = Some(walker.into_route());
        }
    }
}
