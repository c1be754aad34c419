//! http-response-assert binary.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use hra::{Cli, ERROR_EXIT, execute};
use hra_infrastructure::ReqwestHttpClient;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so that stdout carries only the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let client = match ReqwestHttpClient::new() {
        Ok(client) => client,
        Err(error) => {
            eprintln!("error: could not create HTTP client: {error}");
            return ExitCode::from(ERROR_EXIT);
        }
    };

    match execute(&cli, Arc::new(client)).await {
        Ok(invocation) => {
            print!("{}", invocation.output);
            invocation.exit_code()
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(ERROR_EXIT)
        }
    }
}
