//! Exact factorials of machine-sized counts, backed by GMP through `rug`.
//!
//! ```
//! assert_eq!(bigfact::compute_factorial(20).unwrap(), "2432902008176640000");
//! ```

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod bytes;
pub mod cli;
pub mod fact;
pub mod ffi;

pub use fact::{compute_factorial, compute_factorial_str, FactorialError, Limits};

/// Logs go to stderr so stdout only ever carries digits.
pub fn setup_logger() -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
                .with_target(false),
        )
        .with(filter)
        .set_default()
}
