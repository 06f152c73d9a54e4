use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // `.env` may supply EPI_STAT / EPI_LOG defaults.
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so stdout carries only the table.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_env("EPI_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match epi_pivot::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
