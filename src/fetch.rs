//! Loading dataset bytes from a local file or an HTTP(S) URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::{Request, Response};
use std::io::Read;
use tracing::debug;

use crate::parser::parse_csv;
use crate::records::RecordSet;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Plain [`HttpClient`] over a shared `reqwest::Client`.
#[derive(Default)]
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}

/// GETs `url` and returns the body, failing on a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Reads `source` (path or `http(s)` URL), gunzipping `.gz` sources.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn read_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read {source}"))?
    };

    let bytes = if source.ends_with(".gz") {
        gunzip(&bytes)?
    } else {
        bytes
    };
    debug!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}

/// Reads and parses `source` into a normalized record set.
pub async fn load_source(source: &str) -> Result<RecordSet> {
    let bytes = read_source(source).await?;
    let set = parse_csv(&bytes).with_context(|| format!("failed to load {source}"))?;
    Ok(set)
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .context("failed to decompress gzip source")?;
    Ok(out)
}
