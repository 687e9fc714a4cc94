#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use course_calendar::{AppConfig, CatalogSnapshot, http_api, load_catalog_from_json};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog_from_json(path)?,
        None => CatalogSnapshot::default(),
    };

    http_api::serve(config.http_addr, catalog, config.projector()).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
