use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use tls_race::{CounterMode, DemoConfig, TraceStyle, WaitPolicy, DEFAULT_VARIABLE, DEFAULT_WORKERS};

#[derive(Debug, Parser)]
#[command(name = "tls-race", version, about = "Thread-local storage and a racy shared counter")]
pub struct Cli {
    /// Increase diagnostic output on stderr (repeatable, overridden by RUST_LOG)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Greet the value of an environment variable
    Env {
        /// Variable to read
        #[arg(long = "var", default_value = DEFAULT_VARIABLE)]
        variable: String,
    },
    /// Greet a name given on the command line
    Greet {
        /// Name to greet
        name: Option<String>,
    },
    /// Run the parent worker, then launch the children
    Threads(ThreadsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WaitMode {
    /// Join every worker
    Join,
    /// Sleep for --wait-ms, then exit regardless
    Timed,
}

#[derive(Debug, clap::Args)]
pub struct ThreadsArgs {
    /// Number of child workers
    #[arg(long, env = "TLS_RACE_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// How the shared counter is updated
    #[arg(long, env = "TLS_RACE_COUNTER", value_enum, default_value_t = CounterMode::Racy)]
    pub counter: CounterMode,

    /// How to wait for the children
    #[arg(long, env = "TLS_RACE_WAIT", value_enum, default_value_t = WaitMode::Join)]
    pub wait: WaitMode,

    /// Sleep duration of the timed wait, in milliseconds
    #[arg(long, env = "TLS_RACE_WAIT_MS", default_value_t = 1000)]
    pub wait_ms: u64,

    /// Trace layout
    #[arg(long, env = "TLS_RACE_STYLE", value_enum, default_value_t = TraceStyle::Compact)]
    pub style: TraceStyle,

    /// Stack size of each child worker, in bytes
    #[arg(long, env = "TLS_RACE_STACK_SIZE")]
    pub stack_size: Option<usize>,
}

impl ThreadsArgs {
    pub fn to_config(&self) -> DemoConfig {
        DemoConfig {
            workers: self.workers,
            counter: self.counter,
            wait: match self.wait {
                WaitMode::Join => WaitPolicy::Join,
                WaitMode::Timed => WaitPolicy::Timed(Duration::from_millis(self.wait_ms)),
            },
            stack_size: self.stack_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threads_defaults() {
        let cli = Cli::try_parse_from(["tls-race", "threads"]).unwrap();
        let Command::Threads(args) = cli.command else {
            panic!("expected threads subcommand");
        };
        assert_eq!(args.to_config(), DemoConfig::default());
    }

    #[test]
    fn threads_timed() {
        let cli = Cli::try_parse_from([
            "tls-race", "-vv", "threads", "--workers", "2", "--counter", "locked", "--wait",
            "timed", "--wait-ms", "20", "--style", "verbose",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Threads(args) = cli.command else {
            panic!("expected threads subcommand");
        };
        assert_eq!(args.style, TraceStyle::Verbose);
        let config = args.to_config();
        assert_eq!(config.workers, 2);
        assert_eq!(config.counter, CounterMode::Locked);
        assert_eq!(config.wait, WaitPolicy::Timed(Duration::from_millis(20)));
        assert_eq!(config.stack_size, None);
    }

    #[test]
    fn threads_stack_size() {
        let cli = Cli::try_parse_from(["tls-race", "threads", "--stack-size", "65536"]).unwrap();
        let Command::Threads(args) = cli.command else {
            panic!("expected threads subcommand");
        };
        assert_eq!(args.to_config().stack_size, Some(65536));
    }

    #[test]
    fn env_variable_default() {
        let cli = Cli::try_parse_from(["tls-race", "env"]).unwrap();
        assert!(matches!(cli.command, Command::Env { ref variable } if variable == "NAME"));
    }
}
