use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::{debug, info, warn};

use super::{
    config::{DemoConfig, WaitPolicy},
    counter::SharedCounter,
    error::DemoError,
    trace::TraceSink,
    worker::{run_worker, WorkerReport},
};

/// Label of the synchronous run on the launching thread.
pub const PARENT_LABEL: &str = "parent";
/// Label of every launched worker.
pub const CHILD_LABEL: &str = "child";

/// Runs the worker body on the calling thread and on launched threads, all
/// sharing one counter.
#[derive(Debug)]
pub struct ThreadLocalDemo {
    config: DemoConfig,
    counter: Option<Arc<dyn SharedCounter>>,
    sink: Arc<dyn TraceSink>,
}

impl ThreadLocalDemo {
    /// Create a demo. The shared counter is created here, before any worker
    /// starts.
    pub fn new(config: DemoConfig, sink: Arc<dyn TraceSink>) -> Self {
        Self {
            counter: config.counter.build(),
            config,
            sink,
        }
    }

    /// Current value of the shared counter, or `None` when counting is off.
    pub fn counter_value(&self) -> Option<usize> {
        self.counter.as_ref().map(|counter| counter.get())
    }

    /// Run the worker body synchronously on the current thread.
    pub fn run(&self, label: &str) -> WorkerReport {
        let report = run_worker(label, self.counter.as_deref());
        self.sink.emit(&report);
        report
    }

    /// Start `count` workers running the body concurrently.
    ///
    /// Fails on the first worker the OS refuses to start. There is no partial
    /// success: the caller is expected to terminate.
    pub fn launch(&self, count: usize, label: &str) -> Result<Launch, DemoError> {
        let mut handles = Vec::with_capacity(count);
        for index in 0..count {
            let counter = self.counter.clone();
            let sink = self.sink.clone();
            let worker_label = label.to_owned();
            // labels are free text and may not be valid thread names
            let mut builder = thread::Builder::new().name(format!("worker-{}", index));
            if let Some(size) = self.config.stack_size {
                builder = builder.stack_size(size);
            }
            let handle = builder
                .spawn(move || {
                    let report = run_worker(&worker_label, counter.as_deref());
                    sink.emit(&report);
                    report
                })
                .map_err(|source| DemoError::WorkerCreation {
                    label: label.to_owned(),
                    source,
                })?;
            debug!(label, index, "launched worker");
            handles.push(handle);
        }
        Ok(Launch {
            label: label.to_owned(),
            handles,
        })
    }

    /// Run the full scenario: the parent synchronously, then the configured
    /// number of children, finishing with the configured wait policy.
    pub fn execute(&self) -> Result<Outcome, DemoError> {
        let parent = self.run(PARENT_LABEL);
        let mut outcome = self
            .launch(self.config.workers, CHILD_LABEL)?
            .finish(self.config.wait)?;
        outcome.reports.insert(0, parent);
        info!(
            completed = outcome.reports.len(),
            pending = outcome.pending,
            count = ?self.counter_value(),
            "demo finished"
        );
        Ok(outcome)
    }
}

/// A set of launched workers which have not been waited on.
#[derive(Debug)]
pub struct Launch {
    label: String,
    handles: Vec<JoinHandle<WorkerReport>>,
}

impl Launch {
    /// Number of launched workers.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if no workers were launched.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for the workers according to `policy`.
    pub fn finish(self, policy: WaitPolicy) -> Result<Outcome, DemoError> {
        match policy {
            WaitPolicy::Join => self.join_all(),
            WaitPolicy::Timed(duration) => Ok(self.wait_for(duration)),
        }
    }

    /// Block until every worker has completed.
    pub fn join_all(self) -> Result<Outcome, DemoError> {
        let mut reports = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            let report = handle.join().map_err(|_| DemoError::WorkerPanicked {
                label: self.label.clone(),
            })?;
            reports.push(report);
        }
        Ok(Outcome {
            reports,
            pending: 0,
        })
    }

    /// Sleep for `duration`, then collect whichever workers have finished.
    /// The others are detached.
    pub fn wait_for(self, duration: Duration) -> Outcome {
        thread::sleep(duration);
        let mut reports = Vec::new();
        let mut pending = 0;
        for handle in self.handles {
            if !handle.is_finished() {
                pending += 1;
                continue;
            }
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => warn!(label = %self.label, "worker panicked"),
            }
        }
        if pending > 0 {
            warn!(pending, "timed wait elapsed with workers still running");
        }
        Outcome { reports, pending }
    }
}

/// The result of waiting on launched workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Reports of the workers known to have completed, in launch order
    pub reports: Vec<WorkerReport>,
    /// Workers still running when the launcher stopped waiting
    pub pending: usize,
}
