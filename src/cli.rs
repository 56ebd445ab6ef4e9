//! Shared front-end logic for the binaries. Everything writes to the given
//! streams so it can be driven from tests.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};

use crate::fact::{
    compute_factorial_str_with, compute_factorial_with, parse_count, FactorialError, InvalidReason,
    Limits,
};

pub const DEFAULT_PROGRAM: &str = "factorial";

pub const EXIT_OK: u8 = 0;
/// Wrong argument count or an unparseable count.
pub const EXIT_USAGE: u8 = 1;
/// The result is over the memory budget.
pub const EXIT_OUT_OF_MEMORY: u8 = 2;

pub fn usage(program: &str) -> String {
    format!("Usage: {program} <number>")
}

/// Converts raw argv into text. Bytes that are not UTF-8 become U+FFFD, which
/// the count parser then rejects like any other non-number.
pub fn args_lossy(args: impl IntoIterator<Item = OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn single_count(args: &[String]) -> Result<u32, FactorialError> {
    match args {
        [_, n] => parse_count(n),
        _ => Err(FactorialError::arg_count(args.len().saturating_sub(1))),
    }
}

fn run_one<W: Write, E: Write>(
    args: &[String],
    limits: &Limits,
    out: &mut W,
    err: &mut E,
    render: impl FnOnce(&mut W, u32, &str) -> io::Result<()>,
) -> io::Result<u8> {
    let program = args.first().map(String::as_str).unwrap_or(DEFAULT_PROGRAM);
    let res = single_count(args).and_then(|n| {
        let digits = compute_factorial_with(n, limits)?;
        Ok((n, digits))
    });
    match res {
        Ok((n, digits)) => {
            render(out, n, &digits)?;
            out.flush()?;
            Ok(EXIT_OK)
        }
        Err(e) if e.is_invalid_argument() => {
            tracing::debug!(%e, "rejected arguments");
            if !matches!(
                e,
                FactorialError::InvalidArgument {
                    reason: InvalidReason::ArgCount(_),
                    ..
                }
            ) {
                writeln!(err, "error: {e}")?;
            }
            writeln!(out, "{}", usage(program))?;
            out.flush()?;
            Ok(EXIT_USAGE)
        }
        Err(e) => {
            writeln!(err, "error: {e}")?;
            Ok(EXIT_OUT_OF_MEMORY)
        }
    }
}

/// `factorial <n>`: the digits alone, without a trailing newline.
pub fn run_print<W: Write, E: Write>(
    args: &[String],
    limits: &Limits,
    out: &mut W,
    err: &mut E,
) -> io::Result<u8> {
    run_one(args, limits, out, err, |out, _, digits| out.write_all(digits.as_bytes()))
}

/// `factorial-report <n>`: one human-readable line.
pub fn run_report<W: Write, E: Write>(
    args: &[String],
    limits: &Limits,
    out: &mut W,
    err: &mut E,
) -> io::Result<u8> {
    run_one(args, limits, out, err, |out, n, digits| {
        writeln!(out, "Factorial of {n} is: {digits}")
    })
}

/// One count per line on `input`, one factorial per line on `out`. Bad lines
/// are reported on `err` and skipped.
pub fn run_repl<R: BufRead, W: Write, E: Write>(
    input: R,
    limits: &Limits,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<()> {
    write!(err, "> ")?;
    err.flush()?;
    for line in input.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        if !line.trim().is_empty() {
            match compute_factorial_str_with(&line, limits) {
                Ok(digits) => writeln!(out, "{digits}")?,
                Err(e) => writeln!(err, "error: {e}")?,
            }
            out.flush()?;
        }
        write!(err, "> ")?;
        err.flush()?;
    }
    Ok(())
}

#[cfg(test)]
fn args(a: &[&str]) -> Vec<String> {
    a.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
fn drive(
    f: fn(&[String], &Limits, &mut Vec<u8>, &mut Vec<u8>) -> io::Result<u8>,
    a: &[&str],
) -> (u8, String, String) {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = f(&args(a), &Limits::default(), &mut out, &mut err).unwrap();
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn print_success() {
    assert_eq!(
        drive(run_print, &["factorial", "5"]),
        (EXIT_OK, "120".to_string(), String::new())
    );
    assert_eq!(
        drive(run_print, &["factorial", "20"]).1,
        "2432902008176640000"
    );
    assert_eq!(drive(run_print, &["factorial", "0"]).1, "1");
}

#[test]
fn print_wrong_arg_count() {
    for a in [&["./factorial"][..], &["./factorial", "1", "2"][..]] {
        let (code, out, err) = drive(run_print, a);
        assert_eq!(code, EXIT_USAGE);
        assert_eq!(out, "Usage: ./factorial <number>\n");
        assert_eq!(err, "");
    }
    let (code, out, _) = drive(run_print, &[]);
    assert_eq!(code, EXIT_USAGE);
    assert_eq!(out, "Usage: factorial <number>\n");
}

#[test]
fn print_invalid_argument() {
    for bad in ["-3", "abc", "", "99999999999"] {
        let (code, out, err) = drive(run_print, &["factorial", bad]);
        assert_eq!(code, EXIT_USAGE, "{bad:?}");
        assert_eq!(out, "Usage: factorial <number>\n");
        assert!(err.starts_with("error: invalid argument"), "{err}");
    }
}

#[test]
fn print_over_limit() {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = run_print(&args(&["factorial", "1000"]), &Limits::new(100), &mut out, &mut err).unwrap();
    assert_eq!(code, EXIT_OUT_OF_MEMORY);
    assert!(out.is_empty());
    assert!(String::from_utf8(err).unwrap().starts_with("error: out of memory: 1000!"));
}

#[test]
fn report_line() {
    assert_eq!(
        drive(run_report, &["factorial-report", "+5"]),
        (EXIT_OK, "Factorial of 5 is: 120\n".to_string(), String::new())
    );
    assert_eq!(
        drive(run_report, &["factorial-report"]).1,
        "Usage: factorial-report <number>\n"
    );
}

#[cfg(unix)]
#[test]
fn non_utf8_args() {
    use std::os::unix::ffi::OsStringExt;

    let a = args_lossy([
        OsString::from("factorial"),
        OsString::from_vec(b"\xff".to_vec()),
    ]);
    assert_eq!(a[1], "\u{fffd}");
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = run_print(&a, &Limits::default(), &mut out, &mut err).unwrap();
    assert_eq!(code, EXIT_USAGE);
    assert_eq!(out, b"Usage: factorial <number>\n");
    assert!(String::from_utf8(err).unwrap().contains("not a number"));
}

#[test]
fn repl_keeps_going_after_non_utf8_line() {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    run_repl(&b"3\n\xff\n5\r\n"[..], &Limits::default(), &mut out, &mut err).unwrap();
    assert_eq!(out, b"6\n120\n");
    let err = String::from_utf8(err).unwrap();
    assert_eq!(err.lines().filter(|l| l.contains("error: ")).count(), 1);
    assert!(err.contains("not a number"));
}

#[test]
fn repl_returns_read_errors() {
    struct Broken;
    impl io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let res = run_repl(io::BufReader::new(Broken), &Limits::default(), &mut out, &mut err);
    assert!(res.unwrap_err().to_string().contains("disk on fire"));
}

#[test]
fn repl_session() {
    let input = indoc::indoc! {"
        3
        nope

        10
        -1
        25
    "};
    let (mut out, mut err) = (Vec::new(), Vec::new());
    run_repl(input.as_bytes(), &Limits::default(), &mut out, &mut err).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        indoc::indoc! {"
            6
            3628800
            15511210043330985984000000
        "}
    );
    let err = String::from_utf8(err).unwrap();
    assert_eq!(err.lines().filter(|l| l.contains("error: ")).count(), 2);
    assert!(err.contains(r#"error: invalid argument "nope": not a number"#));
    assert!(err.contains(r#"error: invalid argument "-1": factorial of a negative number"#));
}
