//! nutriauth main entrypoint.

use nutriauth::errors::AppError;
use nutriauth::run;
use nutriauth::ui::messages::error;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NUTRIAUTH_LOG";

fn main() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("nutriauth=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    println!();
    if let Err(e) = run() {
        match e {
            // a refused screen already carries its full notice
            AppError::Refused(notice) => error(notice),
            other => error(format!("Error: {}", other)),
        }
        std::process::exit(1);
    }
}
