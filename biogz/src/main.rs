mod application;

mod presentation {
    pub mod cli;
}

use std::process::ExitCode;

use application::RunStatus;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match application::run() {
        Ok(RunStatus::Clean) => ExitCode::SUCCESS,
        Ok(RunStatus::WithFailures) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(code = e.code(), "{e}");
            ExitCode::from(2)
        }
    }
}
