use std::{io, process::ExitCode};

use thiserror::Error;

/// Exit status used when a required configuration value is absent.
pub const EXIT_MISSING_CONFIGURATION: u8 = 1;
/// Exit status used when the OS refuses to start a worker thread.
pub const EXIT_WORKER_CREATION: u8 = 2;
/// Exit status used when a joined worker panicked.
pub const EXIT_WORKER_PANICKED: u8 = 3;

/// Errors which terminate a demonstration run
#[derive(Debug, Error)]
pub enum DemoError {
    /// A configuration value (environment variable or argument) was not provided
    #[error("Missing {name} :/")]
    MissingConfiguration {
        /// Name of the missing value
        name: String,
    },
    /// The OS or runtime refused to start a worker
    #[error("Could not create thread for worker `{label}`: {source}")]
    WorkerCreation {
        /// Label of the worker which failed to start
        label: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },
    /// A worker panicked before it could be joined
    #[error("Worker `{label}` panicked")]
    WorkerPanicked {
        /// Label of the worker which panicked
        label: String,
    },
}

impl DemoError {
    /// The distinguished process exit status for this error.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }

    /// The raw exit status for this error.
    pub fn status(&self) -> u8 {
        match self {
            Self::MissingConfiguration { .. } => EXIT_MISSING_CONFIGURATION,
            Self::WorkerCreation { .. } => EXIT_WORKER_CREATION,
            Self::WorkerPanicked { .. } => EXIT_WORKER_PANICKED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_distinct() {
        let missing = DemoError::MissingConfiguration {
            name: "NAME".into(),
        };
        let spawn = DemoError::WorkerCreation {
            label: "child".into(),
            source: io::Error::new(io::ErrorKind::WouldBlock, "no threads"),
        };
        let panicked = DemoError::WorkerPanicked {
            label: "child".into(),
        };
        assert_eq!(missing.status(), 1);
        assert_eq!(spawn.status(), 2);
        assert_eq!(panicked.status(), 3);
        assert_eq!(missing.to_string(), "Missing NAME :/");
    }
}
