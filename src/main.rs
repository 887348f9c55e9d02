use anyhow::Result;
use clap::Parser;

use deepreport_rs::cli;
use deepreport_rs::workflow::launch;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config()?;

    launch(&config).await
}
