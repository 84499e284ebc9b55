//! # agora-observability
//!
//! Tracing subscriber setup, span macros for the engine's operations,
//! structured events, and [`IModelWatcher`](agora_core::traits::IModelWatcher)
//! sinks.

pub mod tracing_setup;
pub mod watchers;

pub use tracing_setup::{init_tracing, init_tracing_with_filter};
pub use watchers::{RecordingWatcher, TracingWatcher};
