//! Adapter interfaces for external systems.
//!
//! - `ResourceSource`: where resources come from (the content API over HTTP,
//!   or a fake in tests)
//! - Collaborators invoked by the catalog lifecycle (page-view logging, tab
//!   widget initialization, grid rendering)

pub mod collaborators;
pub mod wordpress;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Resource;

pub use collaborators::{
    GridRenderer, NoopTabWidget, PageViewLogger, TabWidget, TracingPageViews,
};
pub use wordpress::ResourceClient;

/// Errors that can occur while fetching resources.
///
/// Both kinds are terminal for the request that produced them; the caller
/// decides how to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network failure or non-2xx response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Body was not JSON or lacked expected fields
    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Shape(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Shape(err.to_string())
    }
}

/// Parameters for a single fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    /// Free-text search term (omitted when `None` or empty)
    pub search: Option<String>,
}

impl ResourceQuery {
    /// The unfiltered catalog
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    /// Search term if one should be sent
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|t| !t.is_empty())
    }
}

/// Trait for resource sources
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch the resources matching a query, in API order
    async fn fetch_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, FetchError>;
}
