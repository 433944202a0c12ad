use crate::error::MintError;
use serde::{Deserialize, Deserializer};

/// One DOM element as recorded by the scraper: identity plus the full
/// computed `cssText` of the element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementSnapshot {
    #[serde(deserialize_with = "lenient_string")]
    pub tag: String,
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Space-separated class attribute, exactly as read from the element.
    #[serde(rename = "className", deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(rename = "cssText", deserialize_with = "lenient_string")]
    pub css_text: String,
}

impl ElementSnapshot {
    pub fn new(tag: &str, id: &str, class_name: &str, css_text: &str) -> Self {
        ElementSnapshot {
            tag: tag.to_string(),
            id: id.to_string(),
            class_name: class_name.to_string(),
            css_text: css_text.to_string(),
        }
    }

    /// Class names in attribute order. Duplicates are kept.
    pub fn class_list(&self) -> Vec<&str> {
        self.class_name.split_whitespace().collect()
    }

    /// Lowercased tag name; browsers report `tagName` in upper case.
    pub fn tag_name(&self) -> String {
        self.tag.to_ascii_lowercase()
    }
}

/// The two shapes a dump arrives in.
#[derive(Deserialize)]
#[serde(untagged)]
enum DumpShape {
    Bare(Vec<ElementSnapshot>),
    Wrapped { elements: Vec<ElementSnapshot> },
}

/// Parse a computed-style dump. This is the only fatal step of a build.
pub fn parse_dump(json: &str) -> Result<Vec<ElementSnapshot>, MintError> {
    let shape: DumpShape =
        serde_json::from_str(json).map_err(|source| MintError::MalformedDump { source })?;
    let snapshots = match shape {
        DumpShape::Bare(elements) | DumpShape::Wrapped { elements } => elements,
    };
    log::debug!("parsed {} element snapshots", snapshots.len());
    Ok(snapshots)
}

// SVG elements expose `className` as an object, and the scraper writes
// `null` for missing attributes. Anything that isn't a string reads as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}
