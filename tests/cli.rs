use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(o: &Output) -> &str {
    std::str::from_utf8(&o.stdout).unwrap()
}

const FACTORIAL: &str = env!("CARGO_BIN_EXE_factorial");
const REPORT: &str = env!("CARGO_BIN_EXE_factorial-report");
const REPL: &str = env!("CARGO_BIN_EXE_factorial-repl");

#[test]
fn prints_digits_without_newline() {
    let o = run(FACTORIAL, &["20"]);
    assert_eq!(o.status.code(), Some(0));
    assert_eq!(stdout(&o), "2432902008176640000");
    assert!(o.stderr.is_empty());
}

#[test]
fn usage_on_wrong_arg_count() {
    for args in [&[][..], &["1", "2"][..], &["1", "2", "3"][..]] {
        let o = run(FACTORIAL, args);
        assert_eq!(o.status.code(), Some(1));
        assert_eq!(stdout(&o), format!("Usage: {FACTORIAL} <number>\n"));
    }
}

#[test]
fn usage_on_invalid_number() {
    for arg in ["-1", "ten", "1e3"] {
        let o = run(FACTORIAL, &[arg]);
        assert_eq!(o.status.code(), Some(1), "{arg}");
        assert!(stdout(&o).starts_with("Usage: "));
        assert!(!o.stderr.is_empty());
    }
}

#[cfg(unix)]
#[test]
fn usage_on_non_utf8_argument() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    for bin in [FACTORIAL, REPORT] {
        let o = Command::new(bin)
            .arg(OsStr::from_bytes(b"\xff"))
            .env_remove("RUST_LOG")
            .output()
            .unwrap();
        assert_eq!(o.status.code(), Some(1), "{bin}");
        assert!(stdout(&o).starts_with("Usage: "));
        assert!(String::from_utf8_lossy(&o.stderr).contains("not a number"));
    }
}

#[test]
fn refuses_huge_counts() {
    let o = run(FACTORIAL, &["4294967295"]);
    assert_eq!(o.status.code(), Some(2));
    assert!(o.stdout.is_empty());
}

#[test]
fn report_line() {
    let o = run(REPORT, &["10"]);
    assert_eq!(o.status.code(), Some(0));
    assert_eq!(stdout(&o), "Factorial of 10 is: 3628800\n");
}

#[test]
fn repl_reads_lines() {
    let mut child = Command::new(REPL)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"4\nx\n\xff\n6\n")
        .unwrap();
    let o = child.wait_with_output().unwrap();
    assert!(o.status.success());
    assert_eq!(stdout(&o), "24\n720\n");
    assert!(String::from_utf8_lossy(&o.stderr).contains("not a number"));
}
