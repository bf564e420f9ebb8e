use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use clap::ValueEnum;

use super::lock::SpinLock;

/// A counter visible to and mutated by every worker.
pub trait SharedCounter: Debug + Send + Sync {
    /// Increment the counter and read back its value.
    fn increment(&self) -> usize;

    /// Read the current value.
    fn get(&self) -> usize;
}

/// The benign race: increments are a separate load and store, so concurrent
/// workers can overwrite each other's updates.
///
/// Relaxed loads and stores of a word compile to plain moves, which keeps the
/// read-modify-write unsynchronized without invoking undefined behavior.
#[derive(Debug, Default)]
pub struct RacyCounter {
    value: AtomicUsize,
}

impl RacyCounter {
    /// Create a new counter starting at zero.
    pub const fn new() -> Self {
        Self {
            value: AtomicUsize::new(0),
        }
    }
}

impl SharedCounter for RacyCounter {
    fn increment(&self) -> usize {
        let next = self.value.load(Ordering::Relaxed) + 1;
        self.value.store(next, Ordering::Relaxed);
        self.value.load(Ordering::Relaxed)
    }

    fn get(&self) -> usize {
        self.value.load(Ordering::Relaxed)
    }
}

/// Synchronized with a single atomic read-modify-write.
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicUsize,
}

impl AtomicCounter {
    /// Create a new counter starting at zero.
    pub const fn new() -> Self {
        Self {
            value: AtomicUsize::new(0),
        }
    }
}

impl SharedCounter for AtomicCounter {
    fn increment(&self) -> usize {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn get(&self) -> usize {
        self.value.load(Ordering::Acquire)
    }
}

/// Synchronized by holding a spin lock across the increment.
#[derive(Debug, Default)]
pub struct LockedCounter {
    value: SpinLock<usize>,
}

impl LockedCounter {
    /// Create a new counter starting at zero.
    pub const fn new() -> Self {
        Self {
            value: SpinLock::new(0),
        }
    }
}

impl SharedCounter for LockedCounter {
    fn increment(&self) -> usize {
        let mut guard = self.value.spin_lock();
        *guard += 1;
        *guard
    }

    fn get(&self) -> usize {
        *self.value.spin_lock()
    }
}

/// Selects how the shared counter is updated, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CounterMode {
    /// Do not count
    Off,
    /// Unsynchronized load and store
    #[default]
    Racy,
    /// Atomic increment
    Atomic,
    /// Spin-lock guarded increment
    Locked,
}

impl CounterMode {
    /// Whether this mode guarantees no lost updates.
    pub fn is_synchronized(self) -> bool {
        matches!(self, Self::Atomic | Self::Locked)
    }

    /// Create the counter for this mode, or `None` when counting is off.
    pub fn build(self) -> Option<Arc<dyn SharedCounter>> {
        match self {
            Self::Off => None,
            Self::Racy => Some(Arc::new(RacyCounter::new())),
            Self::Atomic => Some(Arc::new(AtomicCounter::new())),
            Self::Locked => Some(Arc::new(LockedCounter::new())),
        }
    }
}
