use std::process::ExitCode;

use tls_race::EnvironmentProbe;

fn main() -> ExitCode {
    match EnvironmentProbe::default().probe() {
        Ok(greeting) => {
            println!("{}", greeting);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            err.exit_code()
        }
    }
}
