//! Execution walker
//!
//! Walks a route's steps strictly forward, one at a time. The caller
//! measures wall-clock time for the active step and hands the seconds in
//! on completion. The stuck path swaps the remaining tail (current step
//! included) for a re-planned sequence without touching completed steps.

use tracing::{debug, info};

use crate::domain::{Route, Step};

/// Outcome of completing the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Moved on to the next step
    Advanced,
    /// That was the last step; the route is done
    Finished,
}

/// Walks a route linearly, tracking the active step index
#[derive(Debug)]
pub struct Walker {
    route: Route,
    current_index: usize,
    finished: bool,
}

impl Walker {
    /// Start walking a route from its first step
    pub fn new(route: Route) -> Self {
        Self {
            route,
            current_index: 0,
            finished: false,
        }
    }

    /// The route being walked
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Consume the walker and return the route with recorded progress
    pub fn into_route(self) -> Route {
        self.route
    }

    /// Index of the active step
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The active step, if the route has one
    pub fn current_step(&self) -> Option<&Step> {
        if self.finished {
            return None;
        }
        self.route.steps.get(self.current_index)
    }

    /// (completed, total) counts for the progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.route.completed_steps(), self.route.steps.len())
    }

    /// Whether every step has been completed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Complete the active step with the measured wall-clock seconds and
    /// advance. Returns whether the walk continues or the route is done.
    pub fn complete_current(&mut self, time_spent_secs: u64) -> WalkStatus {
        if let Some(step) = self.route.steps.get_mut(self.current_index) {
            debug!(index = self.current_index, time_spent_secs, "Step completed");
            step.complete(time_spent_secs);
        }

        if self.current_index + 1 < self.route.steps.len() {
            self.current_index += 1;
            WalkStatus::Advanced
        } else {
            info!(total_secs = self.route.total_time_secs(), "Route finished");
            self.finished = true;
            WalkStatus::Finished
        }
    }

    /// Replace the active step and everything after it with a re-planned
    /// tail. Completed steps before the active one are preserved untouched.
    pub fn replace_tail(&mut self, new_steps: Vec<Step>) {
        debug!(
            keep = self.current_index,
            new_len = new_steps.len(),
            "Replacing remaining steps"
        );
        self.route.steps.truncate(self.current_index);
        self.route.steps.extend(new_steps);
        // An empty tail would leave the index dangling; the planner never
        // returns one (zero-step outputs are rejected upstream).
        self.finished = self.current_index >= self.route.steps.len();
    }
}
