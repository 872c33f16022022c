//! Image acquisition for catalog runs.

use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;

/// Upper bound on a single image download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("lacq/", env!("CARGO_PKG_VERSION"));

/// Source of raw image bytes.
///
/// Catalog runs receive one of these instead of reaching for the network
/// themselves, so tests and offline callers can substitute their own.
pub trait FetchImage {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP image fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl FetchImage for HttpFetcher {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        debug!("fetching {url}");
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("request to {url} was refused"))?;
        let bytes = response
            .bytes()
            .with_context(|| format!("reading body from {url} failed"))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds() {
        assert!(HttpFetcher::new().is_ok());
    }
}
