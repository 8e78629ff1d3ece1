//! Configuration for reslib.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (RESLIB_API_URL, RESLIB_DEBOUNCE_MS, RESLIB_TIMEOUT_SECS)
//! 2. Config file (.reslib/config.yaml)
//! 3. Defaults (the public catechetics resource library)
//!
//! Config file discovery:
//! - Searches current directory and parents for .reslib/config.yaml
//! - Falls back to ~/.reslib/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default content API root
pub const DEFAULT_BASE_URL: &str = "https://wp.catechetics.com/wp-json/wp/v2";

/// Page size requested on every fetch
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Field selection requested on every fetch
pub const DEFAULT_FIELDS: &str = "title,acf,better_featured_image";

/// Quiet period before a typed search fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 700;

/// Shortest typed term that triggers a search
pub const DEFAULT_MIN_TERM_LEN: usize = 3;

/// Maximum cards in the featured banner
pub const DEFAULT_FEATURED_LIMIT: usize = 4;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub search: Option<SearchConfig>,
    #[serde(default)]
    pub featured: Option<FeaturedConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub per_page: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: Option<u64>,
    pub min_term_len: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedConfig {
    pub limit: Option<usize>,
}

/// Resolved content API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub per_page: u32,
    pub fields: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            fields: DEFAULT_FIELDS.to_string(),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Resolved search timing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_term_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_term_len: DEFAULT_MIN_TERM_LEN,
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api: ApiSettings,
    pub search: SearchSettings,
    /// Maximum featured cards
    pub featured_limit: usize,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            search: SearchSettings::default(),
            featured_limit: DEFAULT_FEATURED_LIMIT,
            config_file: None,
        }
    }
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub debounce_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

impl EnvOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: std::env::var("RESLIB_API_URL").ok(),
            debounce_ms: parse_env("RESLIB_DEBOUNCE_MS")?,
            timeout_seconds: parse_env("RESLIB_TIMEOUT_SECS")?,
        })
    }
}

fn parse_env<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}

/// Find config file by searching current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".reslib").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".reslib").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a parsed config file and environment overrides over the defaults
pub fn resolve(file: Option<&ConfigFile>, env: &EnvOverrides) -> Result<ResolvedConfig> {
    let defaults = ResolvedConfig::default();
    let api = file.and_then(|f| f.api.clone()).unwrap_or_default();
    let search = file.and_then(|f| f.search.clone()).unwrap_or_default();
    let featured = file.and_then(|f| f.featured.clone()).unwrap_or_default();

    let base_url = env
        .api_url
        .clone()
        .or(api.base_url)
        .unwrap_or(defaults.api.base_url);

    let per_page = api.per_page.unwrap_or(defaults.api.per_page);
    if per_page == 0 {
        anyhow::bail!("api.per_page must be at least 1");
    }

    let timeout_seconds = env
        .timeout_seconds
        .or(api.timeout_seconds)
        .or(defaults.api.timeout_seconds)
        .filter(|secs| *secs > 0);

    let debounce = env
        .debounce_ms
        .or(search.debounce_ms)
        .map(Duration::from_millis)
        .unwrap_or(defaults.search.debounce);

    Ok(ResolvedConfig {
        api: ApiSettings {
            base_url,
            per_page,
            fields: defaults.api.fields,
            timeout_seconds,
        },
        search: SearchSettings {
            debounce,
            min_term_len: search.min_term_len.unwrap_or(defaults.search.min_term_len),
        },
        featured_limit: featured.limit.unwrap_or(defaults.featured_limit),
        config_file: None,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let env = EnvOverrides::from_env()?;
    let config_file = find_config_file();

    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    let mut resolved = resolve(file.as_ref(), &env)?;
    resolved.config_file = config_file;
    Ok(resolved)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = resolve(None, &EnvOverrides::default()).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.per_page, 100);
        assert_eq!(config.api.fields, "title,acf,better_featured_image");
        assert_eq!(config.search.debounce, Duration::from_millis(700));
        assert_eq!(config.search.min_term_len, 3);
        assert_eq!(config.featured_limit, 4);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_env_beats_file() {
        let file: ConfigFile = serde_yaml::from_str(
            r#"
version: "1.0"
api:
  base_url: https://file.example.com/wp-json/wp/v2
search:
  debounce_ms: 250
"#,
        )
        .unwrap();

        let env = EnvOverrides {
            api_url: Some("https://env.example.com/wp-json/wp/v2".to_string()),
            debounce_ms: None,
            timeout_seconds: Some(0),
        };

        let config = resolve(Some(&file), &env).unwrap();
        assert_eq!(config.api.base_url, "https://env.example.com/wp-json/wp/v2");
        assert_eq!(config.search.debounce, Duration::from_millis(250));
        // Zero disables the timeout
        assert_eq!(config.api.timeout_seconds, None);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let file: ConfigFile = serde_yaml::from_str(
            r#"
version: "1.0"
api:
  per_page: 0
"#,
        )
        .unwrap();

        assert!(resolve(Some(&file), &EnvOverrides::default()).is_err());
    }
}
