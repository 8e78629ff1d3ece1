//! Core catalog logic.
//!
//! This module contains:
//! - Search: debounce timer, tickets, supersession
//! - Store: catalog state and its transitions
//! - Presenter: display records and the render model
//! - Session: mount lifecycle driving the above

pub mod presenter;
pub mod search;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use presenter::{to_display_record, CatalogView, DisplayRecord, TabView};
pub use search::{
    InputOutcome, Resolution, SearchController, SearchPhase, SearchRequest, SearchResponse, Ticket,
};
pub use session::{CatalogSession, Collaborators, SessionUpdate, RESOURCES_PAGE};
pub use store::{CatalogEvent, CatalogState, CatalogStore};
