use clap::ValueEnum;

use super::{counter::SharedCounter, tls};

/// How a worker's trace output is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TraceStyle {
    /// One line per worker
    #[default]
    Compact,
    /// Several lines per worker, including the slot addresses
    Verbose,
}

/// What a single worker observed while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    /// Label given by the launcher, such as `parent` or `child`
    pub label: String,
    /// Execution identity of the thread which ran the worker
    pub tid: i32,
    /// Contents of the identifier slot after assignment
    pub id: i32,
    /// Contents of the constant value slot
    pub value: i32,
    /// Address of the identifier slot
    pub id_addr: usize,
    /// Address of the constant value slot
    pub value_addr: usize,
    /// Counter value read back after incrementing, if counting
    pub count: Option<usize>,
}

impl WorkerReport {
    /// Render the trace for this worker. Verbose output contains several
    /// lines separated by `\n`, without a trailing newline.
    pub fn render(&self, style: TraceStyle) -> String {
        match style {
            TraceStyle::Compact => self.render_compact(),
            TraceStyle::Verbose => self.render_verbose(),
        }
    }

    fn render_compact(&self) -> String {
        let line = format!(
            "Hello from {} ({}) with value {}",
            self.label, self.tid, self.value
        );
        match self.count {
            Some(count) => format!("{} (count = {})", line, count),
            None => line,
        }
    }

    fn render_verbose(&self) -> String {
        let mut lines = vec![
            format!("Hello from {}", self.label),
            format!(
                "TLS stores id at {:#x} and value at {:#x}",
                self.id_addr, self.value_addr
            ),
            format!("These values contain {} and {}", self.id, self.value),
        ];
        if let Some(count) = self.count {
            lines.push(format!("Count is {}", count));
        }
        lines.join("\n")
    }
}

/// The worker body: record this thread's identity in its private slot and
/// optionally bump the shared counter.
pub fn run_worker(label: &str, counter: Option<&dyn SharedCounter>) -> WorkerReport {
    let tid = tls::execution_identity();
    tls::assign_id(tid);
    let slots = tls::snapshot();
    let count = counter.map(|counter| counter.increment());
    WorkerReport {
        label: label.to_owned(),
        tid,
        id: slots.id,
        value: slots.value,
        id_addr: slots.id_addr,
        value_addr: slots.value_addr,
        count,
    }
}
