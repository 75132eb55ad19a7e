use clap::Parser;
use clima_chile::cli::{run, Cli};
use clima_chile::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
