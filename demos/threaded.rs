use std::{process::ExitCode, sync::Arc};

use tls_race::{
    logging, CounterMode, DemoConfig, StdoutSink, ThreadLocalDemo, TraceStyle, WaitPolicy,
    DEFAULT_WAIT,
};

// the sleep does not wait for the children, some may never report

fn main() -> ExitCode {
    logging::init(0);
    let config = DemoConfig {
        counter: CounterMode::Racy,
        wait: WaitPolicy::Timed(DEFAULT_WAIT),
        ..DemoConfig::default()
    };
    let demo = ThreadLocalDemo::new(config, Arc::new(StdoutSink::new(TraceStyle::Verbose)));
    match demo.execute() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            err.exit_code()
        }
    }
}
