use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use tracing::debug;

use tls_race::{logging, DemoError, EnvironmentProbe, Greeting, StdoutSink, ThreadLocalDemo};

mod cli;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "exiting with failure");
            eprintln!("{}", err);
            err.exit_code()
        }
    }
}

fn run(command: Command) -> Result<(), DemoError> {
    match command {
        Command::Env { variable } => {
            let greeting = EnvironmentProbe::new(variable).probe()?;
            println!("{}", greeting);
        }
        Command::Greet { name } => {
            println!("{}", Greeting::from_arg(name)?);
        }
        Command::Threads(args) => {
            let sink = Arc::new(StdoutSink::new(args.style));
            let demo = ThreadLocalDemo::new(args.to_config(), sink);
            demo.execute()?;
        }
    }
    Ok(())
}
