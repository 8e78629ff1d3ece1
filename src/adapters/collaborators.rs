//! Collaborators the catalog lifecycle calls out to.
//!
//! None of these affect catalog state. They are injected into the session
//! so mount-time side effects stay explicit.

use tracing::{debug, info};

use crate::core::presenter::DisplayRecord;
use crate::domain::Tab;

/// Fire-and-forget page-view logging, called once per mount
pub trait PageViewLogger: Send + Sync {
    fn log_page_view(&self, path: &str);
}

/// Presentational tab widget, initialized once per mount
pub trait TabWidget: Send + Sync {
    fn init_tabs(&self, tabs: &[Tab]);
}

/// Layout engine that arranges pre-built cards (masonry, list, ...)
pub trait GridRenderer {
    fn render(&self, items: &[DisplayRecord]);
}

/// Page-view logger that records views as tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPageViews;

impl PageViewLogger for TracingPageViews {
    fn log_page_view(&self, path: &str) {
        info!(page = path, "Page view");
    }
}

/// Tab widget for front ends without one
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTabWidget;

impl TabWidget for NoopTabWidget {
    fn init_tabs(&self, tabs: &[Tab]) {
        debug!(count = tabs.len(), "Tabs initialized");
    }
}
