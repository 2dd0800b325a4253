//! Send an image to a network-attached three-color e-paper display.

use clap::Parser;

use epd_send_lib::cli::Cli;
use epd_send_lib::config::AppConfig;
use epd_send_lib::services::pipeline;

// Requests are strictly sequential, a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    epd_send_lib::init_tracing();
    epd_send_lib::load_dotenv();

    let config = AppConfig::load(&cli)?;
    let summary = pipeline::run(&config).await?;

    tracing::debug!(?summary, "Run complete");
    Ok(())
}
