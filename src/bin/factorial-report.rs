use std::io;
use std::process::ExitCode;

use bigfact::{cli, setup_logger, Limits};

fn main() -> anyhow::Result<ExitCode> {
    let _guard = setup_logger();

    let args = cli::args_lossy(std::env::args_os());
    let code = cli::run_report(&args, &Limits::default(), &mut io::stdout().lock(), &mut io::stderr())?;
    Ok(ExitCode::from(code))
}
