//! Action traits shared by the store, the runtime and the middleware

use std::fmt::Debug;

/// Marker trait for values that can be dispatched to a [`Store`](crate::Store)
///
/// Actions are either intents (something should happen) or outcomes
/// (something happened). They must be:
/// - Clone: middleware sees the action after the reducer consumed it
/// - Debug: for logging
/// - Send + 'static: outcomes are produced on spawned tasks
pub trait Action: Clone + Debug + Send + 'static {
    /// Short, stable name used in logs and filters
    fn name(&self) -> &'static str;
}

/// Human readable one-line description of an action
///
/// The default falls back to `Debug`. Override it for actions that carry
/// large payloads or error details so log lines stay short.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
