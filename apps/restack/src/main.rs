mod cli;
mod executor;
mod history;
mod render;
mod treediff;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing. `RUST_LOG` takes precedence; `--verbose` lowers the
/// default filter to debug. Logs go to stderr so stdout stays clean for
/// rendered reports.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = cli::run(cli) {
        tracing::error!(error = %err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
