use anyhow::Result;
use studytools::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
