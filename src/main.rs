use crate::session::launch;
use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod history;
mod manager;
mod params;
mod presets;
mod session;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config();

    launch(&config).await
}
