//! HTTP client for the regions endpoint

use std::time::Duration;

use tracing::debug;

use crate::config::Settings;
use crate::error::{FiscaError, FiscaResult};
use crate::models::Region;

/// Fetches the region list from `{base_url}/api/regions`
#[derive(Debug, Clone)]
pub struct RegionClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RegionClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> FiscaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FiscaError::Region(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
        })
    }

    pub fn from_settings(settings: &Settings) -> FiscaResult<Self> {
        Self::new(
            settings.api_base_url.clone(),
            settings.api_token(),
            settings.region_timeout(),
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/regions", self.base_url.trim_end_matches('/'))
    }

    /// GET the region list, with the bearer token when one is configured
    pub async fn fetch(&self) -> FiscaResult<Vec<Region>> {
        let url = self.endpoint();
        debug!(%url, "fetching regions");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let regions = request
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Region>>()
            .await?;

        debug!(count = regions.len(), "regions fetched");
        Ok(regions)
    }
}
