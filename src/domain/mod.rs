//! Domain types for the resource catalog.
//!
//! - Resource: a record fetched from the content API
//! - Tab: the fixed media-type partitions of the catalog

pub mod resource;
pub mod tab;

pub use resource::{decode_resources, FeaturedImage, Resource, ResourceType};
pub use tab::Tab;
