use std::{
    fmt::Debug,
    io::{self, Write},
};

use super::worker::{TraceStyle, WorkerReport};

/// Receives the trace of every worker as it completes.
///
/// Sinks are called concurrently from worker threads, so ordering between
/// workers is unspecified.
pub trait TraceSink: Debug + Send + Sync {
    /// Record the trace of one worker.
    fn emit(&self, report: &WorkerReport);
}

/// Writes traces to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink {
    style: TraceStyle,
}

impl StdoutSink {
    /// Create a sink rendering in the given style.
    pub const fn new(style: TraceStyle) -> Self {
        Self { style }
    }
}

impl TraceSink for StdoutSink {
    fn emit(&self, report: &WorkerReport) {
        let text = report.render(self.style);
        // hold the lock so a worker's lines stay together
        let mut out = io::stdout().lock();
        if let Err(err) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            tracing::warn!(label = %report.label, "failed to write trace: {}", err);
        }
    }
}
