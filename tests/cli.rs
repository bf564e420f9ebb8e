use std::process::{Command, Output};

fn tls_race() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tls-race"));
    for var in [
        "RUST_LOG",
        "NAME",
        "TLS_RACE_WORKERS",
        "TLS_RACE_COUNTER",
        "TLS_RACE_WAIT",
        "TLS_RACE_WAIT_MS",
        "TLS_RACE_STYLE",
        "TLS_RACE_STACK_SIZE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn hello_env() {
    let output = tls_race()
        .arg("env")
        .env("NAME", "test")
        .output()
        .expect("Failed to execute process");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello test !\n");
}

#[test]
fn hello_env_missing() {
    let output = tls_race()
        .arg("env")
        .output()
        .expect("Failed to execute process");
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Hello"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing NAME :/"));
}

#[test]
fn hello_env_custom_variable() {
    let output = tls_race()
        .args(["env", "--var", "GREETED"])
        .env("GREETED", "world")
        .output()
        .expect("Failed to execute process");
    assert!(stdout(&output).contains("Hello world !"));
}

#[test]
fn hello_args() {
    let output = tls_race()
        .args(["greet", "test"])
        .output()
        .expect("Failed to execute process");
    assert!(stdout(&output).contains("Hello test !"));

    let output = tls_race()
        .arg("greet")
        .output()
        .expect("Failed to execute process");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn threaded_join_atomic() {
    let output = tls_race()
        .args(["threads", "--workers", "5", "--counter", "atomic"])
        .output()
        .expect("Failed to execute process");
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Hello from parent ("));
    assert!(lines[0].ends_with("with value 50 (count = 1)"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("Hello from child (")).count(), 5);
    assert!(lines.iter().any(|l| l.ends_with("(count = 6)")));
}

#[test]
fn threaded_verbose_lines_stay_ordered() {
    let output = tls_race()
        .args(["threads", "--workers", "3", "--style", "verbose"])
        .output()
        .expect("Failed to execute process");
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 16);
    for worker in lines.chunks(4) {
        assert!(worker[0].starts_with("Hello from "));
        assert!(worker[1].starts_with("TLS stores id at 0x"));
        assert!(worker[2].starts_with("These values contain "));
        assert!(worker[2].ends_with(" and 50"));
        assert!(worker[3].starts_with("Count is "));
    }
}

#[test]
fn threaded_timed_wait() {
    let output = tls_race()
        .args(["threads", "--workers", "4", "--wait", "timed", "--wait-ms", "50"])
        .env("TLS_RACE_COUNTER", "off")
        .output()
        .expect("Failed to execute process");
    assert!(output.status.success());
    let text = stdout(&output);
    let count = text.lines().count();
    assert!((1..=5).contains(&count));
    assert!(text.starts_with("Hello from parent"));
    assert!(!text.contains("count ="));
}

#[test]
fn threaded_spawn_failure() {
    let stack_size = (usize::MAX / 4).to_string();
    let output = tls_race()
        .args(["threads", "--workers", "2", "--stack-size", stack_size.as_str()])
        .output()
        .expect("Failed to execute process");
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("Hello from parent"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not create thread"));
}
