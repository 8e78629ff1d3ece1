//! Resource records as served by the content API.
//!
//! The API is a WordPress REST endpoint with ACF (Advanced Custom Fields)
//! attached. Records are decoded from the wire shape into [`Resource`],
//! which is immutable once fetched.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media type of a resource (`acf.type`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Audio,
    Text,
    Video,

    /// Any type the catalog has no tab for, kept verbatim
    Other(String),
}

impl ResourceType {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Audio => "audio",
            ResourceType::Text => "text",
            ResourceType::Video => "video",
            ResourceType::Other(s) => s,
        }
    }
}

// Exact match only: "Audio" is not "audio", mirroring the tab filter.
impl From<String> for ResourceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "audio" => ResourceType::Audio,
            "text" => ResourceType::Text,
            "video" => ResourceType::Video,
            _ => ResourceType::Other(s),
        }
    }
}

impl From<&str> for ResourceType {
    fn from(s: &str) -> Self {
        ResourceType::from(s.to_string())
    }
}

impl From<ResourceType> for String {
    fn from(t: ResourceType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Featured image attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    /// Absolute URL of the image
    pub source_url: String,

    /// Intrinsic width in pixels
    pub width: u32,
}

/// A single catalog resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Post ID (only present when the API is asked for it)
    pub id: Option<u64>,

    /// Rendered title
    pub title: String,

    /// Media type
    pub kind: ResourceType,

    pub description: String,

    /// Link to the resource itself
    pub url: String,

    /// Free-form price text ("Free", "$4.99", ...)
    pub price: String,

    /// Whether the resource belongs in the featured banner
    pub featured: bool,

    pub image: Option<FeaturedImage>,
}

impl Resource {
    /// Create a resource with empty optional fields
    pub fn new(title: impl Into<String>, kind: impl Into<ResourceType>) -> Self {
        Self {
            id: None,
            title: title.into(),
            kind: kind.into(),
            description: String::new(),
            url: String::new(),
            price: String::new(),
            featured: false,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Mark the resource as featured
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn with_image(mut self, source_url: impl Into<String>, width: u32) -> Self {
        self.image = Some(FeaturedImage {
            source_url: source_url.into(),
            width,
        });
        self
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct WireResource {
    #[serde(default)]
    id: Option<u64>,
    title: WireTitle,
    acf: WireAcf,
    #[serde(default)]
    better_featured_image: Option<WireImage>,
}

#[derive(Debug, Deserialize)]
struct WireTitle {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct WireAcf {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    price: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    featured: bool,
}

#[derive(Debug, Deserialize)]
struct WireImage {
    source_url: String,
    media_details: WireMediaDetails,
}

#[derive(Debug, Deserialize)]
struct WireMediaDetails {
    #[serde(deserialize_with = "lenient_u32")]
    width: u32,
}

impl From<WireResource> for Resource {
    fn from(wire: WireResource) -> Self {
        Self {
            id: wire.id,
            title: wire.title.rendered,
            kind: ResourceType::from(wire.acf.kind),
            description: wire.acf.description,
            url: wire.acf.url,
            price: wire.acf.price,
            featured: wire.acf.featured,
            image: wire.better_featured_image.map(|img| FeaturedImage {
                source_url: img.source_url,
                width: img.media_details.width,
            }),
        }
    }
}

/// Decode an API response body (a JSON array of resource objects).
///
/// Order is preserved; it is the display order.
pub fn decode_resources(body: &[u8]) -> serde_json::Result<Vec<Resource>> {
    let wire: Vec<WireResource> = serde_json::from_slice(body)?;
    Ok(wire.into_iter().map(Resource::from).collect())
}

/// ACF text fields come back as strings, numbers, null, or `false` when unset
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null | Value::Bool(false) => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

/// ACF true/false fields may be serialized as bools, "1"/"" or 0/1
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
        Value::String(s) => Ok(matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true"
        )),
        other => Err(de::Error::custom(format!(
            "expected a boolean, found {}",
            other
        ))),
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| de::Error::custom(format!("width out of range: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| de::Error::custom(format!("invalid width: {:?}", s))),
        other => Err(de::Error::custom(format!(
            "expected a width, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "title": { "rendered": "The Catechist's Toolbox" },
            "acf": {
                "type": "video",
                "description": "A short series.",
                "url": "https://example.com/toolbox",
                "price": "Free",
                "featured": true
            },
            "better_featured_image": {
                "source_url": "https://example.com/toolbox.jpg",
                "media_details": { "width": 800, "height": 600 }
            }
        },
        {
            "title": { "rendered": "Sunday Homily" },
            "acf": {
                "type": "audio",
                "description": null,
                "url": "https://example.com/homily",
                "price": 5,
                "featured": ""
            },
            "better_featured_image": null
        }
    ]"#;

    #[test]
    fn test_decode_sample() {
        let resources = decode_resources(SAMPLE.as_bytes()).unwrap();
        assert_eq!(resources.len(), 2);

        let first = &resources[0];
        assert_eq!(first.title, "The Catechist's Toolbox");
        assert_eq!(first.kind, ResourceType::Video);
        assert!(first.featured);
        assert_eq!(
            first.image,
            Some(FeaturedImage {
                source_url: "https://example.com/toolbox.jpg".to_string(),
                width: 800,
            })
        );

        let second = &resources[1];
        assert_eq!(second.kind, ResourceType::Audio);
        assert_eq!(second.description, "");
        assert_eq!(second.price, "5");
        assert!(!second.featured);
        assert!(second.image.is_none());
    }

    #[test]
    fn test_decode_missing_image_key() {
        let body = r#"[{ "title": { "rendered": "T" }, "acf": { "type": "text" } }]"#;
        let resources = decode_resources(body.as_bytes()).unwrap();
        assert!(resources[0].image.is_none());
        assert_eq!(resources[0].url, "");
    }

    #[test]
    fn test_decode_requires_type() {
        let body = r#"[{ "title": { "rendered": "T" }, "acf": { "url": "x" } }]"#;
        assert!(decode_resources(body.as_bytes()).is_err());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(decode_resources(br#"{"code":"rest_no_route"}"#).is_err());
        assert!(decode_resources(b"<html>").is_err());
    }

    #[test]
    fn test_featured_string_forms() {
        let body = r#"[
            { "title": { "rendered": "a" }, "acf": { "type": "text", "featured": "1" } },
            { "title": { "rendered": "b" }, "acf": { "type": "text", "featured": 0 } },
            { "title": { "rendered": "c" }, "acf": { "type": "text", "featured": null } },
            { "title": { "rendered": "d" }, "acf": { "type": "text", "featured": "yes" } },
            { "title": { "rendered": "e" }, "acf": { "type": "text", "featured": "" } }
        ]"#;
        let flags: Vec<bool> = decode_resources(body.as_bytes())
            .unwrap()
            .iter()
            .map(|r| r.featured)
            .collect();
        assert_eq!(flags, vec![true, false, false, false, false]);
    }

    #[test]
    fn test_unknown_type_kept_verbatim() {
        assert_eq!(
            ResourceType::from("podcast"),
            ResourceType::Other("podcast".to_string())
        );
        assert_eq!(ResourceType::from("Audio").as_str(), "Audio");
    }
}
