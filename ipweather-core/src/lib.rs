//! Core traits and types for ipweather
//!
//! A small Redux/Elm-style runtime for terminal applications whose state is
//! filled in by background requests.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **Store**: Centralized state container with an effect-returning reducer
//! - **Slice**: Four-state request lifecycle with an epoch per request
//! - **TaskManager**: Keyed async work where a new request supersedes the old
//! - **EffectRuntime**: The action loop, watchers and terminal rendering
//! - **Component**: Pure UI elements that render based on props
//!
//! # Request Pattern
//!
//! Requests use a two-phase action pattern:
//!
//! 1. **Intent actions** ask for work (e.g. `RequestLocation`)
//! 2. **Outcome actions** carry the result back, tagged with the epoch the
//!    reducer handed out when the request began
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::RequestLocation => {
//!             let epoch = state.location.begin();
//!             DispatchResult::changed_with(Effect::FetchLocation { epoch })
//!         }
//!         Action::LocationDidLoad { epoch, result } => {
//!             state.location.resolve(epoch, result).into()
//!         }
//!     }
//! }
//!
//! let mut runtime = EffectRuntime::new(AppState::default(), reducer);
//! runtime.enqueue(Action::RequestLocation);
//! ```
//!
//! An outcome carrying an older epoch than the slice's current one is
//! dropped by [`Slice::resolve`], so the latest request always wins.

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod runtime;
pub mod slice;
pub mod store;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionSummary};
pub use component::Component;

// Event exports
pub use event::EventKind;

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Store};

// Effect exports
pub use effect::{DispatchResult, EffectReducer};

// Request lifecycle exports
pub use slice::{Epoch, Phase, Slice};

// Async exports
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};

// Runtime exports
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};

// Testing exports
pub use testing::{buffer_to_string_plain, key, ActionAssertions, RenderHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::component::Component;
    pub use crate::effect::{DispatchResult, EffectReducer};
    pub use crate::event::EventKind;
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome};
    pub use crate::slice::{Epoch, Phase, Slice};
    pub use crate::store::{LoggingMiddleware, Middleware, NoopMiddleware, Store};
    pub use crate::subscriptions::{SubKey, Subscriptions};
    pub use crate::tasks::{TaskKey, TaskManager};

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
