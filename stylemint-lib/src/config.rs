use crate::error::MintError;
use crate::style::properties::VIEWPORT_CUTOFF_PX;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Lower bound (exclusive) of `left` for the centering idiom.
pub const CENTERING_LEFT_MIN_PX: f64 = 800.0;
/// Upper bound (exclusive) of `left` for the centering idiom.
pub const CENTERING_LEFT_MAX_PX: f64 = 1100.0;

/// Options for one build. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Emit provenance comments in the generated stylesheet.
    pub include_comments: bool,
    /// When set, only these selectors are emitted.
    pub target_selectors: Option<BTreeSet<String>>,
    /// Used to derive `target_selectors` when that is unset.
    pub selector_keywords: Vec<String>,
    pub thresholds: Thresholds,
}

/// Heuristic numbers calibrated against the capture viewport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    pub viewport_cutoff_px: f64,
    pub centering_left_min_px: f64,
    pub centering_left_max_px: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            viewport_cutoff_px: VIEWPORT_CUTOFF_PX,
            centering_left_min_px: CENTERING_LEFT_MIN_PX,
            centering_left_max_px: CENTERING_LEFT_MAX_PX,
        }
    }
}

impl BuildConfig {
    pub fn from_json(json: &str) -> Result<Self, MintError> {
        serde_json::from_str(json).map_err(|source| MintError::InvalidConfig { source })
    }
}
