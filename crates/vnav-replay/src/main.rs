//! vnav-replay entry point
//!
//! Usage: `vnav-replay <script.ron>`. Prints one JSON pose record per event
//! to stdout; logs go to stderr.

use std::process::ExitCode;

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vnav_replay=info,vnav_input=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: vnav-replay <script.ron>");
        return ExitCode::FAILURE;
    };

    tracing::info!(%path, "Loading script");

    let records = match vnav_replay::Script::load(&path).and_then(|s| vnav_replay::replay(&s)) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Replay failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for record in &records {
        match serde_json::to_string(record) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                tracing::error!("Failed to serialize pose record: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
