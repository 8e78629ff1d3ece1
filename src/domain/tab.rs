//! Tabs that partition the catalog by media type.

use serde::{Deserialize, Serialize};

use super::resource::ResourceType;

/// One of the fixed catalog tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Every resource
    #[default]
    All,

    /// Audio clips and recordings
    Audio,

    /// Magazines, books, brochures
    Text,

    /// Videos
    Video,
}

impl Tab {
    /// All tabs in display order
    pub const ALL: [Tab; 4] = [Tab::All, Tab::Audio, Tab::Text, Tab::Video];

    /// Stable key used in anchors and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Audio => "audio",
            Tab::Text => "text",
            Tab::Video => "video",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Audio => "Audio",
            Tab::Text => "Text",
            Tab::Video => "Video",
        }
    }

    /// In-page anchor for the tab (`#audio`)
    pub fn anchor(&self) -> String {
        format!("#{}", self.key())
    }

    /// Whether a resource of the given type belongs under this tab.
    ///
    /// `All` matches everything; the other tabs match the type exactly, so
    /// resources of an unknown type only ever show up under `All`.
    pub fn matches(&self, kind: &ResourceType) -> bool {
        match self {
            Tab::All => true,
            Tab::Audio => *kind == ResourceType::Audio,
            Tab::Text => *kind == ResourceType::Text,
            Tab::Video => *kind == ResourceType::Video,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let key = s.trim().trim_start_matches('#').to_lowercase();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.key() == key)
            .ok_or_else(|| anyhow::anyhow!("Unknown tab: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_order_and_labels() {
        let labels: Vec<_> = Tab::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["All", "Audio", "Text", "Video"]);
        assert_eq!(Tab::default(), Tab::All);
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("audio".parse::<Tab>().unwrap(), Tab::Audio);
        assert_eq!("#video".parse::<Tab>().unwrap(), Tab::Video);
        assert_eq!("TEXT".parse::<Tab>().unwrap(), Tab::Text);
        assert!("podcast".parse::<Tab>().is_err());
    }

    #[test]
    fn test_tab_matches() {
        assert!(Tab::All.matches(&ResourceType::Other("book".into())));
        assert!(Tab::Audio.matches(&ResourceType::Audio));
        assert!(!Tab::Audio.matches(&ResourceType::Video));
        assert!(!Tab::Text.matches(&ResourceType::Other("text ".into())));
    }

    #[test]
    fn test_tab_anchor() {
        assert_eq!(Tab::Audio.anchor(), "#audio");
    }
}
