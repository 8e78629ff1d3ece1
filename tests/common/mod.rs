//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reslib::adapters::{PageViewLogger, TabWidget};
use reslib::config::ResolvedConfig;
use reslib::core::Collaborators;
use reslib::{CatalogSession, FetchError, Resource, ResourceQuery, ResourceSource, Tab};

type Canned = (Duration, Result<Vec<Resource>, FetchError>);

/// Resource source with canned, delayed responses keyed by search term.
/// The unfiltered catalog is keyed by the empty string.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, Canned>,
    panics: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, term: &str, delay_ms: u64, resources: Vec<Resource>) -> Self {
        self.responses.insert(
            term.to_string(),
            (Duration::from_millis(delay_ms), Ok(resources)),
        );
        self
    }

    pub fn fail(mut self, term: &str, delay_ms: u64, error: FetchError) -> Self {
        self.responses
            .insert(term.to_string(), (Duration::from_millis(delay_ms), Err(error)));
        self
    }

    /// Make the fetch for `term` panic instead of returning
    pub fn panic_on(mut self, term: &str) -> Self {
        self.panics.insert(term.to_string());
        self
    }

    /// Terms requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, FetchError> {
        let term = query.term().unwrap_or("").to_string();
        self.calls.lock().unwrap().push(term.clone());

        if self.panics.contains(&term) {
            panic!("fake source blew up on {:?}", term);
        }

        let (delay, result) = self
            .responses
            .get(&term)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));

        tokio::time::sleep(delay).await;
        result
    }
}

#[derive(Default)]
pub struct CountingPageViews {
    pub views: Mutex<Vec<String>>,
}

impl PageViewLogger for CountingPageViews {
    fn log_page_view(&self, path: &str) {
        self.views.lock().unwrap().push(path.to_string());
    }
}

#[derive(Default)]
pub struct CountingTabs {
    pub inits: AtomicUsize,
}

impl TabWidget for CountingTabs {
    fn init_tabs(&self, tabs: &[Tab]) {
        assert_eq!(tabs, &Tab::ALL);
        self.inits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Small mixed catalog
pub fn catalog() -> Vec<Resource> {
    vec![
        Resource::new("Creed Booklet", "text"),
        Resource::new("Sunday Homily", "audio").featured(),
        Resource::new("Catechesis Lecture", "video")
            .featured()
            .with_image("https://example.com/lecture.jpg", 800),
    ]
}

pub fn titles(resources: &[&Resource]) -> Vec<String> {
    resources.iter().map(|r| r.title.clone()).collect()
}

/// Mount with default settings and quiet collaborators
pub async fn mount(source: &Arc<FakeSource>) -> CatalogSession {
    CatalogSession::mount(
        source.clone(),
        &ResolvedConfig::default(),
        &Collaborators::default(),
    )
    .await
}
