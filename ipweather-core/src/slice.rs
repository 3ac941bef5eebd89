//! Epoch-tracked request state for one slice of the state tree
//!
//! A slice moves through four phases:
//!
//! ```text
//! NeverRequested --begin--> Loading --resolve(Ok)--> Ready(T)
//!                              ^   \--resolve(Err)-> Errored(E)
//!                              |                        |
//!                              +--------begin-----------+
//! ```
//!
//! Every [`Slice::begin`] hands out a new [`Epoch`]. The task started for
//! that request carries the epoch back in its outcome, and
//! [`Slice::resolve`] ignores any outcome whose epoch is not the current one.
//! A slow response to a superseded request therefore cannot overwrite the
//! result of a newer request.

use std::fmt;

/// Request generation counter of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    /// Epoch of a slice that was never requested
    pub const ZERO: Epoch = Epoch(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a slice is in its request cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T, E> {
    NeverRequested,
    Loading,
    Ready(T),
    Errored(E),
}

/// Request state plus the epoch of the request that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T, E> {
    epoch: Epoch,
    phase: Phase<T, E>,
}

impl<T, E> Default for Slice<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Slice<T, E> {
    pub fn new() -> Self {
        Self {
            epoch: Epoch::ZERO,
            phase: Phase::NeverRequested,
        }
    }

    /// Start a new request cycle.
    ///
    /// Always enters `Loading`, whatever the previous phase was, and drops
    /// any previous payload or error.
    pub fn begin(&mut self) -> Epoch {
        self.epoch = self.epoch.next();
        self.phase = Phase::Loading;
        self.epoch
    }

    /// Apply the result of the request started at `epoch`.
    ///
    /// Returns `false` and leaves the slice untouched when the result is
    /// stale: either a newer request was started since, or the current
    /// request already resolved.
    pub fn resolve(&mut self, epoch: Epoch, result: Result<T, E>) -> bool {
        if epoch != self.epoch || !self.is_loading() {
            tracing::debug!(
                outcome_epoch = %epoch,
                current_epoch = %self.epoch,
                "Dropping stale outcome"
            );
            return false;
        }

        self.phase = match result {
            Ok(value) => Phase::Ready(value),
            Err(error) => Phase::Errored(error),
        };
        true
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn phase(&self) -> &Phase<T, E> {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// True once the current request has either succeeded or failed
    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Ready(_) | Phase::Errored(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.phase {
            Phase::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match &self.phase {
            Phase::Errored(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestSlice = Slice<&'static str, &'static str>;

    #[test]
    fn test_new_slice_is_never_requested() {
        let slice = TestSlice::new();
        assert_eq!(slice.epoch(), Epoch::ZERO);
        assert_eq!(slice.phase(), &Phase::NeverRequested);
        assert!(!slice.is_loading());
        assert!(!slice.is_settled());
    }

    #[test]
    fn test_begin_then_resolve() {
        let mut slice = TestSlice::new();

        let epoch = slice.begin();
        assert_eq!(epoch, Epoch::new(1));
        assert!(slice.is_loading());

        assert!(slice.resolve(epoch, Ok("data")));
        assert_eq!(slice.ready(), Some(&"data"));
        assert!(slice.is_settled());
    }

    #[test]
    fn test_resolve_error() {
        let mut slice = TestSlice::new();
        let epoch = slice.begin();

        assert!(slice.resolve(epoch, Err("boom")));
        assert_eq!(slice.error(), Some(&"boom"));
        assert_eq!(slice.ready(), None);
    }

    #[test]
    fn test_begin_clears_previous_payload() {
        let mut slice = TestSlice::new();
        let epoch = slice.begin();
        slice.resolve(epoch, Ok("old"));

        slice.begin();
        assert!(slice.is_loading());
        assert_eq!(slice.ready(), None);

        let epoch = slice.epoch();
        slice.resolve(epoch, Err("failed"));
        slice.begin();
        assert_eq!(slice.error(), None);
    }

    #[test]
    fn test_stale_epoch_is_dropped() {
        let mut slice = TestSlice::new();
        let first = slice.begin();
        let second = slice.begin();

        assert!(!slice.resolve(first, Ok("late")));
        assert!(slice.is_loading());

        assert!(slice.resolve(second, Ok("fresh")));
        assert!(!slice.resolve(first, Ok("later still")));
        assert_eq!(slice.ready(), Some(&"fresh"));
    }

    #[test]
    fn test_second_resolve_for_same_epoch_is_dropped() {
        let mut slice = TestSlice::new();
        let epoch = slice.begin();

        assert!(slice.resolve(epoch, Ok("first")));
        assert!(!slice.resolve(epoch, Err("second")));
        assert_eq!(slice.ready(), Some(&"first"));
    }

    #[test]
    fn test_resolve_without_request_is_dropped() {
        let mut slice = TestSlice::new();
        assert!(!slice.resolve(Epoch::ZERO, Ok("unsolicited")));
        assert_eq!(slice.phase(), &Phase::NeverRequested);
    }
}
