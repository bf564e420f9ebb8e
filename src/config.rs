use std::time::Duration;

use super::counter::CounterMode;

/// Number of children launched when none is configured.
pub const DEFAULT_WORKERS: usize = 5;
/// Sleep used by the timed-wait policy when none is configured.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(1);

/// How the launcher waits for its workers before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitPolicy {
    /// Block until every worker has completed
    #[default]
    Join,
    /// Sleep for a fixed duration, then return regardless of progress.
    ///
    /// Workers still running afterwards are detached and may never report.
    Timed(Duration),
}

/// Settings for a [`ThreadLocalDemo`](crate::ThreadLocalDemo) run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    /// Number of child workers launched after the parent run
    pub workers: usize,
    /// How the shared counter is updated
    pub counter: CounterMode,
    /// How the launcher waits for the children
    pub wait: WaitPolicy,
    /// Stack size of each launched worker, or the platform default
    pub stack_size: Option<usize>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            counter: CounterMode::default(),
            wait: WaitPolicy::default(),
            stack_size: None,
        }
    }
}
