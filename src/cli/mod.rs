//! Command-line interface for reslib.
//!
//! Provides commands for listing the catalog, searching it, showing the
//! featured banner, browsing interactively, and inspecting configuration.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::{GridRenderer, ResourceClient};
use crate::config;
use crate::core::{
    to_display_record, CatalogSession, CatalogView, Collaborators, DisplayRecord, SessionUpdate,
};
use crate::domain::Tab;

pub mod browse;

/// reslib - Searchable catalog of educational resources
#[derive(Parser, Debug)]
#[command(name = "reslib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the catalog
    List {
        /// Only show resources under this tab
        #[arg(short, long, value_enum, default_value = "all")]
        tab: TabArg,
    },

    /// Search the catalog
    Search {
        /// Search term (sent as typed, any length)
        term: String,

        /// Only show results under this tab
        #[arg(short, long, value_enum, default_value = "all")]
        tab: TabArg,
    },

    /// Show the featured resources
    Featured {
        /// Maximum number of cards (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Browse interactively with live search
    Browse,

    /// Show resolved configuration (debug)
    Config,
}

/// Tab for CLI (maps to Tab)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    All,
    Audio,
    Text,
    Video,
}

impl From<TabArg> for Tab {
    fn from(t: TabArg) -> Self {
        match t {
            TabArg::All => Tab::All,
            TabArg::Audio => Tab::Audio,
            TabArg::Text => Tab::Text,
            TabArg::Video => Tab::Video,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::List { tab } => list_catalog(tab.into()).await,
            Commands::Search { term, tab } => search_catalog(&term, tab.into()).await,
            Commands::Featured { limit } => show_featured(limit).await,
            Commands::Browse => browse::run().await,
            Commands::Config => show_config(),
        }
    }
}

/// Plain-text card list, one card per block
#[derive(Debug, Default)]
pub struct TerminalGrid;

impl GridRenderer for TerminalGrid {
    fn render(&self, items: &[DisplayRecord]) {
        if items.is_empty() {
            println!("  (no resources)");
            return;
        }

        for item in items {
            println!("{}", format_card(item));
        }
    }
}

/// Format one card for the terminal
pub fn format_card(item: &DisplayRecord) -> String {
    let mut card = format!("  {:<7} {}", format!("[{}]", item.kind), truncate(&item.title, 60));
    if !item.price.is_empty() {
        card.push_str(&format!(" ({})", item.price));
    }
    if !item.url.is_empty() {
        card.push_str(&format!("\n          {}", item.url));
    }
    if !item.image.is_empty() {
        card.push_str(&format!("\n          image: {} ({}px)", item.image, item.image_width));
    }
    card
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Format the tab bar, active tab in brackets
pub fn format_tabs(view: &CatalogView) -> String {
    view.tabs
        .iter()
        .map(|t| {
            if t.active {
                format!("[{}]", t.label)
            } else {
                format!(" {} ", t.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the full catalog view
pub fn print_view(view: &CatalogView, renderer: &dyn GridRenderer) {
    println!("Featured Resources");
    println!("{}", "-".repeat(80));
    renderer.render(&view.featured);
    println!();
    println!("{}", format_tabs(view));
    println!("{}", "-".repeat(80));
    renderer.render(&view.grid);
    println!("\n{} shown", view.grid.len());
}

/// Print a session update as a status line
pub fn report_update(update: &SessionUpdate) {
    match update {
        SessionUpdate::Dispatched { ticket, term } => {
            eprintln!("[{}] searching for {:?}", ticket, term)
        }
        SessionUpdate::Applied { ticket, term, count } => {
            eprintln!("[{}] {} results for {:?}", ticket, count, term)
        }
        SessionUpdate::Superseded { ticket, term } => {
            eprintln!("[{}] discarded stale results for {:?}", ticket, term)
        }
        SessionUpdate::Failed { ticket, term, error } => {
            eprintln!("[{}] search for {:?} failed: {}", ticket, term, error)
        }
    }
}

/// Mount a session against the configured content API
async fn mount_session() -> Result<CatalogSession> {
    let cfg = config::config()?;
    let client = ResourceClient::from_settings(&cfg.api)?;
    let session = CatalogSession::mount(Arc::new(client), cfg, &Collaborators::default()).await;

    if let Some(err) = session.initial_error() {
        eprintln!("Warning: could not load the catalog: {}", err);
    }

    Ok(session)
}

/// List the catalog under a tab
async fn list_catalog(tab: Tab) -> Result<()> {
    let mut session = mount_session().await?;
    session.select_tab(tab);

    print_view(&session.view(), &TerminalGrid);
    session.unmount();

    Ok(())
}

/// Submit a search and print the settled catalog
async fn search_catalog(term: &str, tab: Tab) -> Result<()> {
    let mut session = mount_session().await?;
    session.select_tab(tab);
    session.submit(term);

    for update in session.settle().await {
        report_update(&update);
    }

    let view = session.view();
    if view.grid.is_empty() {
        println!("No results found for: {}", term);
    } else {
        println!("{}", format_tabs(&view));
        println!("{}", "-".repeat(80));
        TerminalGrid.render(&view.grid);
        println!("\n{} shown", view.grid.len());
    }
    session.unmount();

    Ok(())
}

/// Print the featured banner
async fn show_featured(limit: Option<usize>) -> Result<()> {
    let limit = match limit {
        Some(limit) => limit,
        None => config::config()?.featured_limit,
    };

    let session = mount_session().await?;
    let cards: Vec<DisplayRecord> = session
        .store()
        .featured_resources(limit)
        .into_iter()
        .map(to_display_record)
        .collect();

    println!("Featured Resources");
    println!("{}", "-".repeat(80));
    TerminalGrid.render(&cards);
    session.unmount();

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("reslib configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Content API:");
    println!("  Base URL:  {}", cfg.api.base_url);
    println!("  Page size: {}", cfg.api.per_page);
    println!("  Fields:    {}", cfg.api.fields);
    match cfg.api.timeout_seconds {
        Some(secs) => println!("  Timeout:   {}s", secs),
        None => println!("  Timeout:   (none)"),
    }
    println!();
    println!("Search:");
    println!("  Debounce:        {}ms", cfg.search.debounce.as_millis());
    println!("  Min term length: {}", cfg.search.min_term_len);
    println!();
    println!("Featured limit: {}", cfg.featured_limit);

    Ok(())
}
