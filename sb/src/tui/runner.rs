//! TUI Runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Dispatching events to App for handling
//! - Kicking off background planner calls (one in-flight at a time)
//! - Applying planner results back into the app state
//! - Rotating loading tips
//! - Rendering each frame

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEventKind;
use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingAction;
use super::views;
use crate::config::UiConfig;
use crate::domain::Route;
use crate::planner::Planner;
use crate::session::Stage;

/// Result from the background planner task
#[derive(Debug)]
enum PlanOutcome {
    /// Breakdown finished (fallback already applied on error)
    Breakdown {
        current: String,
        target: String,
        steps: Vec<crate::domain::Step>,
    },
    /// Re-plan finished (fallback already applied on error)
    Replan { steps: Vec<crate::domain::Step> },
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state and key handling
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Planner driving the two LLM calls
    planner: Arc<Planner>,
    /// Loading-tip rotation interval
    tip_interval: Duration,
    /// Last tip rotation
    last_tip: Instant,

    // === Single in-flight request slot ===
    /// Receiver for the running planner task's outcome
    plan_rx: Option<mpsc::Receiver<PlanOutcome>>,
    /// Handle to the running planner task
    plan_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    /// Create a new TuiRunner
    pub fn new(terminal: Tui, planner: Arc<Planner>, ui: &UiConfig) -> Self {
        Self {
            app: App::new(),
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(ui.tick_ms)),
            planner,
            tip_interval: Duration::from_millis(ui.tip_interval_ms),
            last_tip: Instant::now(),
            plan_rx: None,
            plan_task: None,
        }
    }

    /// Run the main event loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.apply_plan_outcome();

            match self.event_handler.next().await? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.app.handle_key(key) {
                        break;
                    }
                    self.app.take_finished_route();
                    self.dispatch_pending();
                }
                Event::Key(_) => {}
                Event::Resize(_, _) => {}
                Event::Tick => {
                    self.maybe_rotate_tip();
                }
            }

            if self.app.state().should_quit {
                break;
            }

            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;
        }

        Ok(())
    }

    /// Rotate the loading tip while a request is in flight
    fn maybe_rotate_tip(&mut self) {
        let loading = self.app.state().stage == Stage::BreakdownLoading
            || self.app.state().stuck.as_ref().is_some_and(|s| s.loading);

        if loading && self.last_tip.elapsed() >= self.tip_interval {
            self.app.state_mut().rotate_tip();
            self.last_tip = Instant::now();
        }
    }

    /// Kick off the pending planner request, if any
    ///
    /// Only one request may be in flight; a second request while one is
    /// running is dropped (the stages make this unreachable from the UI).
    fn dispatch_pending(&mut self) {
        let Some(action) = self.app.state_mut().pending_action.take() else {
            return;
        };

        if self.plan_task.is_some() {
            warn!(?action, "Planner request dropped: another request is in flight");
            return;
        }

        debug!(?action, "Dispatching planner request");
        self.last_tip = Instant::now();

        let planner = self.planner.clone();
        let (tx, rx) = mpsc::channel(1);

        let task = match action {
            PendingAction::Breakdown { current, target } => tokio::spawn(async move {
                let steps = planner.breakdown_or_fallback(&current, &target).await;
                let _ = tx.send(PlanOutcome::Breakdown { current, target, steps }).await;
            }),
            PendingAction::Replan { step, barrier, goal } => tokio::spawn(async move {
                let steps = planner.replan_or_fallback(&step, &barrier, &goal).await;
                let _ = tx.send(PlanOutcome::Replan { steps }).await;
            }),
        };

        self.plan_rx = Some(rx);
        self.plan_task = Some(task);
    }

    /// Apply a finished planner task's outcome to the app state
    fn apply_plan_outcome(&mut self) {
        let Some(rx) = self.plan_rx.as_mut() else {
            return;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::error::TryRecvError::Empty) => return,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                // Task died without sending; free the slot
                warn!("Planner task ended without an outcome");
                self.plan_rx = None;
                self.plan_task = None;
                return;
            }
        };

        self.plan_rx = None;
        self.plan_task = None;

        let state = self.app.state_mut();
        match outcome {
            PlanOutcome::Breakdown { current, target, steps } => {
                // Only meaningful if we are still waiting on the preview
                if state.stage == Stage::BreakdownLoading {
                    debug!(step_count = steps.len(), "Breakdown ready");
                    state.route = Some(Route::new(current, target, steps));
                    state.preview_scroll = 0;
                    state.stage = Stage::RoutePreview;
                }
            }
            PlanOutcome::Replan { steps } => {
                if let Some(walker) = state.walker.as_mut() {
                    debug!(step_count = steps.len(), "Re-plan ready");
                    walker.replace_tail(steps);
                    state.step_started = Some(Instant::now());
                }
                state.stuck = None;
            }
        }
    }
}
