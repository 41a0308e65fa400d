use std::process::Command;

#[test]
fn hello_prints_default_greeting() {
    let output = Command::new(env!("CARGO_BIN_EXE_hello"))
        .output()
        .expect("failed to run hello");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello, CICD!\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn hello_output_is_stable() {
    let first = Command::new(env!("CARGO_BIN_EXE_hello")).output().expect("failed to run hello");
    let second = Command::new(env!("CARGO_BIN_EXE_hello")).output().expect("failed to run hello");
    assert_eq!(first.stdout, second.stdout);
}
