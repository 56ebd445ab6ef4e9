use std::io;

use bigfact::{cli, setup_logger, Limits};

fn main() -> anyhow::Result<()> {
    let _guard = setup_logger();

    cli::run_repl(io::stdin().lock(), &Limits::default(), &mut io::stdout(), &mut io::stderr())
}
