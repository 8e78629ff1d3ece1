//! Mapping from resources to display records.
//!
//! Pure and total: every resource maps to a card, nothing here fails.

use serde::Serialize;

use super::search::SearchPhase;
use super::store::CatalogStore;
use crate::domain::{Resource, ResourceType, Tab};

/// Width reported for resources without an image. Legacy layouts divide by
/// it, so it is one rather than zero.
pub const FALLBACK_IMAGE_WIDTH: u32 = 1;

/// A resource card as handed to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub title: String,
    pub kind: ResourceType,
    pub description: String,
    pub url: String,
    pub price: String,
    /// Image URL, empty when the resource has no image
    pub image: String,
    pub image_width: u32,
    pub featured: bool,
}

/// Map a resource to its card
pub fn to_display_record(resource: &Resource) -> DisplayRecord {
    let (image, image_width) = match &resource.image {
        Some(img) => (img.source_url.clone(), img.width),
        None => (String::new(), FALLBACK_IMAGE_WIDTH),
    };

    DisplayRecord {
        title: resource.title.clone(),
        kind: resource.kind.clone(),
        description: resource.description.clone(),
        url: resource.url.clone(),
        price: resource.price.clone(),
        image,
        image_width,
        featured: resource.featured,
    }
}

/// A tab selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub tab: Tab,
    pub label: &'static str,
    pub anchor: String,
    pub active: bool,
}

/// Everything a front end needs to draw the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub tabs: Vec<TabView>,
    pub featured: Vec<DisplayRecord>,
    pub grid: Vec<DisplayRecord>,
    pub pending_search_term: String,
    pub phase: SearchPhase,
}

impl CatalogView {
    /// Assemble the view from the store
    pub fn build(store: &CatalogStore, phase: SearchPhase, featured_limit: usize) -> Self {
        let active = store.active_tab();

        let tabs = Tab::ALL
            .iter()
            .map(|tab| TabView {
                tab: *tab,
                label: tab.label(),
                anchor: tab.anchor(),
                active: *tab == active,
            })
            .collect();

        Self {
            tabs,
            featured: store
                .featured_resources(featured_limit)
                .into_iter()
                .map(to_display_record)
                .collect(),
            grid: store
                .visible_resources()
                .into_iter()
                .map(to_display_record)
                .collect(),
            pending_search_term: store.state().pending_search_term.clone(),
            phase,
        }
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.tabs.iter().find(|t| t.active).map(|t| t.tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_image_fallback() {
        let record = to_display_record(&Resource::new("Rosary Guide", "text"));
        assert_eq!(record.image, "");
        assert_eq!(record.image_width, 1);
        assert_eq!(record.image_width.to_string(), "1");
    }

    #[test]
    fn test_image_passthrough() {
        let resource = Resource::new("Catechism Talk", "video")
            .with_description("Part one")
            .with_url("https://example.com/talk")
            .with_price("Free")
            .with_image("x.jpg", 800);

        let record = to_display_record(&resource);
        assert_eq!(record.image, "x.jpg");
        assert_eq!(record.image_width, 800);
        assert_eq!(record.title, "Catechism Talk");
        assert_eq!(record.kind, ResourceType::Video);
        assert_eq!(record.description, "Part one");
        assert_eq!(record.url, "https://example.com/talk");
        assert_eq!(record.price, "Free");
    }

    #[test]
    fn test_view_marks_active_tab() {
        let mut store = CatalogStore::new();
        store.initialize(vec![
            Resource::new("a", "audio").featured(),
            Resource::new("b", "text"),
        ]);
        store.select_tab(Tab::Text);

        let view = CatalogView::build(&store, SearchPhase::Idle, 4);
        assert_eq!(view.active_tab(), Some(Tab::Text));
        assert_eq!(view.tabs.iter().filter(|t| t.active).count(), 1);
        assert_eq!(view.grid.len(), 1);
        assert_eq!(view.grid[0].title, "b");
        // Banner ignores the tab filter
        assert_eq!(view.featured.len(), 1);
        assert_eq!(view.featured[0].title, "a");
    }
}
