use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::error;

use nmsetup_cli::{Args, run};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("First time setup failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
