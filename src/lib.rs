//! reslib - Searchable catalog of educational resources
//!
//! A client for a public resource library served by a WordPress content
//! API. Resources are fetched once on mount, grouped into tabs by media
//! type, and narrowed with a debounced free-text search.
//!
//! # Architecture
//!
//! The interesting part is the search path:
//! - Keystrokes are debounced (700ms, trailing edge, 3+ characters)
//! - An explicit submit cancels the debounce and searches immediately
//! - Every issued request gets a ticket; only the latest ticket's response
//!   is ever applied, whatever order responses arrive in
//!
//! # Modules
//!
//! - `adapters`: External system integrations (content API, collaborators)
//! - `core`: Catalog logic (SearchController, CatalogStore, presenter, session)
//! - `domain`: Data structures (Resource, Tab)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List video resources
//! reslib list --tab video
//!
//! # Search the catalog
//! reslib search "holy spirit"
//!
//! # Browse with live search
//! reslib browse
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{FetchError, ResourceClient, ResourceQuery, ResourceSource};
pub use crate::core::{
    CatalogSession, CatalogStore, CatalogView, DisplayRecord, SearchController, SessionUpdate,
};
pub use domain::{Resource, ResourceType, Tab};
