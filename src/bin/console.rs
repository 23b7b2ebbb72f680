use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use agenda::client::HttpSchedulingClient;
use agenda::config::AppConfig;
use agenda::ui::Console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // stdout belongs to the screen
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        config.api_base_url.starts_with("http://") || config.api_base_url.starts_with("https://"),
        "API_BASE_URL must be an http(s) URL, got {}",
        config.api_base_url
    );

    let client = HttpSchedulingClient::new(config.api_base_url.clone());
    match client.health().await {
        Ok(health) => tracing::info!(status = %health.status, url = %config.api_base_url, "scheduling API reachable"),
        Err(e) => tracing::warn!(error = %e, url = %config.api_base_url, "scheduling API not reachable"),
    }

    let today = chrono::Local::now().date_naive();
    let console = Console::new(Arc::new(client), today);

    let stdin = BufReader::new(tokio::io::stdin());
    console.run(stdin, std::io::stdout()).await?;

    Ok(())
}
