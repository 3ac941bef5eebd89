//! Effects returned by reducers
//!
//! A reducer never performs I/O. When an action needs work done outside the
//! state tree (an HTTP request, a timer) the reducer describes that work as
//! an effect and returns it next to the change flag:
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::Intent(Intent::RequestLocation) => {
//!             let epoch = state.location.begin();
//!             DispatchResult::changed_with(Effect::FetchLocation { epoch })
//!         }
//!         Action::Outcome(outcome) => fold(state, outcome).into(),
//!         Action::Quit => DispatchResult::unchanged(),
//!     }
//! }
//! ```
//!
//! The runtime hands every effect to the application's effect handler,
//! which usually spawns a task that later sends an outcome action back.

/// Result of dispatching one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch, in order.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and one effect must run.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Append an effect.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

impl<E> From<bool> for DispatchResult<E> {
    fn from(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }
}

/// A reducer function that can emit effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;
