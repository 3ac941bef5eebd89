//! ipweather: current weather for wherever this machine is
//!
//! Start-up enqueues `RequestLocation`. The reducer starts a request cycle
//! and returns an effect, the [`Orchestrator`](orchestrator::Orchestrator)
//! spawns the fetch, and the outcome is folded back into the store. Once a
//! location lands, the [`CoordinateWatcher`](watch::CoordinateWatcher)
//! requests the weather for it.

pub mod action;
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod orchestrator;
pub mod reducer;
pub mod state;
pub mod watch;
