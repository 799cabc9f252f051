//! `kairos` command line

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kairos_server::cli::run().await
}
