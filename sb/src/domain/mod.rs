//! Core domain types: steps, routes, reflections.

mod id;
mod reflection;
mod route;
mod step;

pub use id::generate_id;
pub use reflection::Reflection;
pub use route::{Route, format_secs};
pub use step::{Step, StepKind};

/// Current time as Unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
