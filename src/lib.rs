//! This crate demonstrates per-thread storage next to a counter shared by
//! every thread. Each worker stores its OS thread id in a thread-local slot,
//! reads a second thread-local slot holding a constant, and bumps the shared
//! counter. Both slots live at a different address on every thread even
//! though they are declared once.
//!
//! The counter is unsynchronized by default: the increment is a separate
//! load and store, so concurrent workers can lose updates. Synchronized
//! variants (a single atomic increment, or a spin lock) can be selected with
//! [`CounterMode`].
//!
//! ```
//! use std::sync::Arc;
//! use tls_race::{CounterMode, DemoConfig, StdoutSink, ThreadLocalDemo};
//!
//! let config = DemoConfig {
//!     workers: 3,
//!     counter: CounterMode::Atomic,
//!     ..DemoConfig::default()
//! };
//! let demo = ThreadLocalDemo::new(config, Arc::new(StdoutSink::default()));
//! let outcome = demo.execute().unwrap();
//! assert_eq!(outcome.reports.len(), 4);
//! assert_eq!(demo.counter_value(), Some(4));
//! ```
//!
//! A launcher may also stop waiting after a fixed sleep
//! ([`WaitPolicy::Timed`]). Workers still running at that point are detached,
//! so their output is not guaranteed to appear.

#![deny(missing_docs, missing_debug_implementations, rust_2018_idioms)]

mod config;
mod counter;
mod error;
mod launcher;
mod lock;
pub mod logging;
mod probe;
mod trace;
pub mod tls;
mod worker;

pub use self::config::{DemoConfig, WaitPolicy, DEFAULT_WAIT, DEFAULT_WORKERS};
pub use self::counter::{AtomicCounter, CounterMode, LockedCounter, RacyCounter, SharedCounter};
pub use self::error::{
    DemoError, EXIT_MISSING_CONFIGURATION, EXIT_WORKER_CREATION, EXIT_WORKER_PANICKED,
};
pub use self::launcher::{Launch, Outcome, ThreadLocalDemo, CHILD_LABEL, PARENT_LABEL};
pub use self::probe::{EnvironmentProbe, Greeting, DEFAULT_VARIABLE};
pub use self::trace::{StdoutSink, TraceSink};
pub use self::worker::{run_worker, TraceStyle, WorkerReport};
