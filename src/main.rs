mod eightball;
mod http;
mod mattermost;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use http::{
    launch_args::LaunchArgs, server::run_http_server, server_environment::ServerEnvironment,
};
use utils::log::bootstrap_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = LaunchArgs::parse();
    bootstrap_logging();
    run_http_server(Arc::new(ServerEnvironment::from_launch_args(&args)?)).await
}
