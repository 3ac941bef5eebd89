//! Effect-aware state store with middleware hooks

use std::marker::PhantomData;

use crate::action::{Action, ActionSummary};
use crate::effect::{DispatchResult, EffectReducer};

/// Single owner of the application state.
///
/// The only way to change the state is [`Store::dispatch`], which runs the
/// reducer with the current state and the action. Middleware sees every
/// action before and after the reducer.
///
/// # Type Parameters
/// * `S` - The state tree
/// * `A` - The action type
/// * `E` - The effect type the reducer emits
/// * `M` - Middleware, [`NoopMiddleware`] by default
///
/// # Example
/// ```ignore
/// let mut store = Store::new(AppState::default(), reducer);
/// let result = store.dispatch(request_location());
/// assert!(store.state().location.is_loading());
/// assert!(result.has_effects());
/// ```
pub struct Store<S, A, E, M = NoopMiddleware> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
    _marker: PhantomData<(A, E)>,
}

impl<S, A: Action, E> Store<S, A, E, NoopMiddleware> {
    /// Create a store without middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, E, M: Middleware<A>> Store<S, A, E, M> {
    /// Create a store whose dispatches pass through `middleware`.
    pub fn with_middleware(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action through middleware and reducer.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, result.changed);
        result
    }

    /// Read-only view of the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Intercepts actions around the reducer
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, state_changed: bool);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Writes every dispatched action to `tracing` at debug level.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Also log before the reducer runs
    pub log_before: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self { log_before: false }
    }

    /// Log before and after dispatch
    pub fn verbose() -> Self {
        Self { log_before: true }
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        tracing::debug!(
            action = %action.name(),
            summary = %action.summary(),
            state_changed,
            "Action processed"
        );
    }
}
