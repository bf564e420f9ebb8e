use std::sync::Arc;

use tls_race::{
    logging, CounterMode, DemoConfig, DemoError, StdoutSink, ThreadLocalDemo, TraceStyle,
};

fn main() -> Result<(), DemoError> {
    logging::init(1);
    let config = DemoConfig {
        counter: CounterMode::Atomic,
        ..DemoConfig::default()
    };
    let demo = ThreadLocalDemo::new(config, Arc::new(StdoutSink::new(TraceStyle::Compact)));
    let outcome = demo.execute()?;
    assert_eq!(demo.counter_value(), Some(outcome.reports.len()));
    println!("Completed {} workers", outcome.reports.len());
    Ok(())
}
