pub mod handlers;

use crate::presentation::cli::Cli;
use biogz_core::error::Result;
use clap::Parser;

pub use handlers::RunStatus;

pub fn run() -> Result<RunStatus> {
    let cli = Cli::parse();
    handlers::handle_run(cli)
}
