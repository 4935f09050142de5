//! Chainfetch - Example client
//!
//! Sends one GET request through a configured interceptor pipeline.
//!
//! ```text
//! chainfetch <url> [config.json]
//! ```

use chainfetch::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let url = args
        .next()
        .ok_or("usage: chainfetch <url> [config.json]")?;

    let config = match args.next() {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path).await?;
            tracing::info!("Loaded pipeline config from {}", path);
            PipelineConfig::from_json(&raw)?
        }
        None => PipelineConfig::new().debug_header("X-DEBUG", "TESTING"),
    };

    let pipeline = Pipeline::builder()
        .config(&config)
        .build(HyperTransport::new());

    tracing::info!("Pipeline: {:?}", pipeline.interceptor_names());

    let response = pipeline.fetch(FetchRequest::get(url)).await?;

    println!("{}", response.status);
    if let Some(body) = response.text_body() {
        println!("{}", body);
    }

    Ok(())
}
