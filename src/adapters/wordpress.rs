//! Content API client (WordPress REST, `resource` post type).
//!
//! Every request asks for a single large page. There is no pagination: if
//! the collection ever grows past `per_page`, results are silently
//! truncated by the server. A warning is logged when a response fills the
//! page exactly.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use super::{FetchError, ResourceQuery, ResourceSource};
use crate::config::ApiSettings;
use crate::domain::{decode_resources, Resource};

/// HTTP client for the content API
pub struct ResourceClient {
    /// API root, e.g. `https://wp.catechetics.com/wp-json/wp/v2`
    base_url: String,
    /// Page size requested on every call
    per_page: u32,
    /// Comma-separated field selection
    fields: String,
    /// HTTP client
    client: reqwest::Client,
}

impl ResourceClient {
    /// Create a client with default settings against the given API root
    pub fn new(base_url: impl Into<String>) -> Self {
        let defaults = ApiSettings::default();
        Self {
            base_url: base_url.into(),
            per_page: defaults.per_page,
            fields: defaults.fields,
            client: reqwest::Client::new(),
        }
    }

    /// Create from resolved settings
    pub fn from_settings(settings: &ApiSettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url: settings.base_url.clone(),
            per_page: settings.per_page,
            fields: settings.fields.clone(),
            client: builder.build()?,
        })
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Whether a response of `count` items may have been cut off
    pub fn fills_page(&self, count: usize) -> bool {
        count as u64 >= u64::from(self.per_page)
    }

    /// Build the request URL for a query
    pub fn request_url(&self, query: &ResourceQuery) -> Result<Url, FetchError> {
        let endpoint = format!("{}/resource", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint)
            .map_err(|e| FetchError::Transport(format!("Invalid API URL {}: {}", endpoint, e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("per_page", &self.per_page.to_string());
            pairs.append_pair("fields", &self.fields);
            if let Some(term) = query.term() {
                pairs.append_pair("search", term);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl ResourceSource for ResourceClient {
    fn name(&self) -> &str {
        "wordpress"
    }

    async fn fetch_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, FetchError> {
        let url = self.request_url(query)?;
        debug!(%url, "Fetching resources");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body = response.bytes().await?;
        let resources = decode_resources(&body)?;

        if self.fills_page(resources.len()) {
            warn!(
                count = resources.len(),
                per_page = self.per_page,
                "Response filled the page; catalog may be truncated"
            );
        }

        debug!(count = resources.len(), "Fetched resources");
        Ok(resources)
    }
}
