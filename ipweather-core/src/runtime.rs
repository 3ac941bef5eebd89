//! Effect runtime: the action loop that owns the store
//!
//! The runtime is the single writer of the state tree. Everything that wants
//! to change state sends an action into its channel: the view (key presses),
//! spawned tasks (outcomes), subscriptions (timers) and watchers (derived
//! requests). Actions are dispatched one at a time, so reducer runs never
//! interleave.
//!
//! One step of the loop, [`EffectRuntime::process`]:
//! 1. dispatch the action through the store's middleware and reducer
//! 2. hand each returned effect to the effect handler
//! 3. if the state changed, run every watcher on the new state and enqueue
//!    the actions they return
//!
//! [`EffectRuntime::run`] wraps that step with terminal rendering and event
//! polling. Tests drive `process` directly with [`EffectRuntime::next_action`].

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::Interval;
use tokio_util::sync::CancellationToken;

use crate::effect::EffectReducer;
use crate::event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
use crate::store::{Middleware, NoopMiddleware, Store};
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;
use crate::Action;

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// No actions, but request a render.
    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    /// Collect actions from a component's `handle_event`.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        Self::from_actions(action)
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self::from_actions(actions)
    }
}

/// Context passed to effect handlers.
///
/// Effect handlers spawn their work as keyed tasks; outcomes come back
/// through the action queue.
pub struct EffectContext<'a, A: Action> {
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

type Watcher<S, A> = Box<dyn FnMut(&S) -> Option<A>>;

/// Action loop around an effect-aware [`Store`].
pub struct EffectRuntime<S, A: Action, E, M = NoopMiddleware> {
    store: Store<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
    watchers: Vec<Watcher<S, A>>,
    tick: Option<Duration>,
    should_render: bool,
}

impl<S: 'static, A: Action, E> EffectRuntime<S, A, E, NoopMiddleware> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(Store::new(state, reducer))
    }
}

impl<S: 'static, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    /// Create a runtime from an existing store.
    pub fn from_store(store: Store<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            tasks,
            subscriptions,
            watchers: Vec::new(),
            tick: None,
            should_render: true,
        }
    }

    /// Register a function of state that runs after every state change.
    ///
    /// An action it returns is enqueued, not dispatched inline, so it is
    /// processed after everything already queued.
    pub fn with_watcher<F>(mut self, watcher: F) -> Self
    where
        F: FnMut(&S) -> Option<A> + 'static,
    {
        self.watchers.push(Box::new(watcher));
        self
    }

    /// Deliver [`EventKind::Tick`] to the event mapper every `period` while running.
    pub fn with_tick(mut self, period: Duration) -> Self {
        self.tick = Some(period);
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Wait for the next queued action.
    pub async fn next_action(&mut self) -> Option<A> {
        self.action_rx.recv().await
    }

    /// Dispatch one action, run its effects and the watchers.
    ///
    /// Returns whether the state changed.
    pub fn process<F>(&mut self, action: A, mut handle_effect: F) -> bool
    where
        F: FnMut(E, &mut EffectContext<'_, A>),
    {
        let result = self.store.dispatch(action);

        if result.has_effects() {
            let mut ctx = EffectContext {
                tasks: &mut self.tasks,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }

        if result.changed {
            let state = self.store.state();
            for watcher in &mut self.watchers {
                if let Some(action) = watcher(state) {
                    let _ = self.action_tx.send(action);
                }
            }
        }

        result.changed
    }

    /// Run the event/action loop until quit.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<'_, A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());
        let mut ticker = self.tick.map(tokio::time::interval);

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        tracing::info!(action = %action.name(), "Quit requested");
                        break;
                    }

                    if self.process(action, &mut handle_effect) {
                        self.should_render = true;
                    }
                }

                _ = next_tick(&mut ticker) => {
                    let outcome: EventOutcome<A> = map_event(&EventKind::Tick, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();

        Ok(())
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DispatchResult;
    use crate::slice::{Epoch, Slice};

    #[derive(Default)]
    struct TestState {
        source: Slice<u32, String>,
        derived: Slice<u32, String>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        RequestSource,
        RequestDerived(u32),
        SourceDidLoad(Epoch, u32),
        DerivedDidLoad(Epoch, u32),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::RequestSource => "RequestSource",
                TestAction::RequestDerived(_) => "RequestDerived",
                TestAction::SourceDidLoad(..) => "SourceDidLoad",
                TestAction::DerivedDidLoad(..) => "DerivedDidLoad",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    enum TestEffect {
        FetchSource(Epoch),
        FetchDerived(Epoch, u32),
    }

    fn reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::RequestSource => {
                DispatchResult::changed_with(TestEffect::FetchSource(state.source.begin()))
            }
            TestAction::RequestDerived(input) => DispatchResult::changed_with(
                TestEffect::FetchDerived(state.derived.begin(), input),
            ),
            TestAction::SourceDidLoad(epoch, value) => state.source.resolve(epoch, Ok(value)).into(),
            TestAction::DerivedDidLoad(epoch, value) => {
                state.derived.resolve(epoch, Ok(value)).into()
            }
        }
    }

    fn handle(effect: TestEffect, ctx: &mut EffectContext<'_, TestAction>) {
        match effect {
            TestEffect::FetchSource(epoch) => {
                ctx.tasks()
                    .spawn("source", async move { TestAction::SourceDidLoad(epoch, 20) });
            }
            TestEffect::FetchDerived(epoch, input) => {
                ctx.tasks().spawn("derived", async move {
                    TestAction::DerivedDidLoad(epoch, input * 2)
                });
            }
        }
    }

    fn derived_watcher() -> impl FnMut(&TestState) -> Option<TestAction> {
        let mut seen = Epoch::ZERO;
        move |state: &TestState| {
            let value = state.source.ready()?;
            if state.source.epoch() == seen {
                return None;
            }
            seen = state.source.epoch();
            Some(TestAction::RequestDerived(*value))
        }
    }

    async fn drain(runtime: &mut EffectRuntime<TestState, TestAction, TestEffect>) -> Vec<TestAction> {
        let mut processed = Vec::new();
        while let Ok(Some(action)) =
            tokio::time::timeout(Duration::from_millis(100), runtime.next_action()).await
        {
            processed.push(action.clone());
            runtime.process(action, handle);
        }
        processed
    }

    #[tokio::test]
    async fn test_process_runs_effects_and_watchers() {
        let mut runtime =
            EffectRuntime::new(TestState::default(), reducer).with_watcher(derived_watcher());

        runtime.enqueue(TestAction::RequestSource);
        let processed = drain(&mut runtime).await;

        assert_eq!(
            processed,
            vec![
                TestAction::RequestSource,
                TestAction::SourceDidLoad(Epoch::new(1), 20),
                TestAction::RequestDerived(20),
                TestAction::DerivedDidLoad(Epoch::new(1), 40),
            ]
        );
        assert_eq!(runtime.state().derived.ready(), Some(&40));
    }

    #[tokio::test]
    async fn test_watcher_not_run_when_state_unchanged() {
        let mut runtime =
            EffectRuntime::new(TestState::default(), reducer).with_watcher(|_state: &TestState| {
                Some(TestAction::RequestSource)
            });

        // Stale outcome: nothing changes, so the watcher must stay quiet
        let changed = runtime.process(TestAction::SourceDidLoad(Epoch::new(9), 1), handle);
        assert!(!changed);

        let next = tokio::time::timeout(Duration::from_millis(20), runtime.next_action()).await;
        assert!(next.is_err());
    }

    #[test]
    fn test_event_outcome_builders() {
        let outcome: EventOutcome<TestAction> = None.into();
        assert_eq!(outcome, EventOutcome::ignored());

        let outcome: EventOutcome<TestAction> = Some(TestAction::RequestSource).into();
        assert_eq!(outcome.actions, vec![TestAction::RequestSource]);
        assert!(!outcome.needs_render);

        let outcome = EventOutcome::<TestAction>::from_actions(vec![]).with_render();
        assert_eq!(outcome, EventOutcome::needs_render());
    }
}
