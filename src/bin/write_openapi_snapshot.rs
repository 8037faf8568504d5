// src/bin/write_openapi_snapshot.rs
use anyhow::Result;
use std::{env, path::PathBuf};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let output_path = PathBuf::from(
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string()),
    );
    let public_urls: Vec<String> = env::var("PUBLIC_API_URLS")
        .or_else(|_| env::var("PUBLIC_API_URL"))
        .map(|value| value.split(',').map(|url| url.trim().to_string()).collect())
        .unwrap_or_default();

    folio_core::presentation::http::openapi::write_openapi_snapshot(&output_path, &public_urls)?;
    println!("OpenAPI snapshot written to {}", output_path.display());
    Ok(())
}
