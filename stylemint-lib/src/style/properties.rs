//! Property classification tables.
//!
//! Three pieces of data decide what survives extraction:
//! the ordered list of visual properties, the per-property default values,
//! and the properties whose pixel values may be viewport artifacts.

use std::collections::{HashMap, HashSet};

/// Pixel values above this on a viewport-sensitive property are taken to be
/// computed from the capture window rather than authored.
pub const VIEWPORT_CUTOFF_PX: f64 = 1000.0;

/// Properties considered for output, in emission order.
///
/// The four corner radii must stay adjacent and in this order; the cleaner
/// collapses them into `border-radius`.
pub const VISUAL_PROPERTIES: &[&str] = &[
    // box placement
    "display",
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "z-index",
    "float",
    "clear",
    "box-sizing",
    // dimensions
    "width",
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
    "inline-size",
    "block-size",
    // spacing
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    // borders
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-top-style",
    "border-right-style",
    "border-bottom-style",
    "border-left-style",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    "outline-style",
    "box-shadow",
    // background
    "background-color",
    "background-image",
    "background-position",
    "background-size",
    "background-repeat",
    // typography
    "color",
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "line-height",
    "letter-spacing",
    "text-align",
    "text-decoration-line",
    "text-transform",
    "white-space",
    "vertical-align",
    "list-style-type",
    // flex
    "flex-direction",
    "flex-wrap",
    "justify-content",
    "align-items",
    "align-self",
    "flex-grow",
    "flex-shrink",
    "flex-basis",
    "gap",
    "order",
    // visual effects
    "opacity",
    "visibility",
    "overflow-x",
    "overflow-y",
    "object-fit",
    "filter",
    "cursor",
    "pointer-events",
    "transform",
    "transform-origin",
    "transition",
    "will-change",
];

/// Browser defaults per property. An empty list means the property is
/// always dropped whatever its value.
pub const DEFAULT_VALUES: &[(&str, &[&str])] = &[
    ("display", &["inline"]),
    ("position", &["static"]),
    ("top", &["auto"]),
    ("right", &["auto"]),
    ("bottom", &["auto"]),
    ("left", &["auto"]),
    ("z-index", &["auto"]),
    ("float", &["none"]),
    ("clear", &["none"]),
    ("box-sizing", &["content-box"]),
    ("width", &["auto"]),
    ("height", &["auto"]),
    ("min-width", &["0px", "auto"]),
    ("min-height", &["0px", "auto"]),
    ("max-width", &["none"]),
    ("max-height", &["none"]),
    ("inline-size", &[]),
    ("block-size", &[]),
    ("margin-top", &["0px"]),
    ("margin-right", &["0px"]),
    ("margin-bottom", &["0px"]),
    ("margin-left", &["0px"]),
    ("padding-top", &["0px"]),
    ("padding-right", &["0px"]),
    ("padding-bottom", &["0px"]),
    ("padding-left", &["0px"]),
    ("border-top-width", &["0px"]),
    ("border-right-width", &["0px"]),
    ("border-bottom-width", &["0px"]),
    ("border-left-width", &["0px"]),
    ("border-top-style", &["none"]),
    ("border-right-style", &["none"]),
    ("border-bottom-style", &["none"]),
    ("border-left-style", &["none"]),
    ("border-top-color", &["rgb(0, 0, 0)", "currentcolor"]),
    ("border-right-color", &["rgb(0, 0, 0)", "currentcolor"]),
    ("border-bottom-color", &["rgb(0, 0, 0)", "currentcolor"]),
    ("border-left-color", &["rgb(0, 0, 0)", "currentcolor"]),
    ("border-top-left-radius", &["0px"]),
    ("border-top-right-radius", &["0px"]),
    ("border-bottom-left-radius", &["0px"]),
    ("border-bottom-right-radius", &["0px"]),
    ("outline-style", &["none"]),
    ("box-shadow", &["none"]),
    ("background-color", &["rgba(0, 0, 0, 0)", "transparent"]),
    ("background-image", &["none"]),
    ("background-position", &["0% 0%"]),
    ("background-size", &["auto"]),
    ("background-repeat", &["repeat"]),
    ("font-weight", &["400", "normal"]),
    ("font-style", &["normal"]),
    ("line-height", &["normal"]),
    ("letter-spacing", &["normal"]),
    ("text-align", &["start", "left"]),
    ("text-decoration-line", &["none"]),
    ("text-transform", &["none"]),
    ("white-space", &["normal"]),
    ("vertical-align", &["baseline"]),
    ("list-style-type", &["disc"]),
    ("flex-direction", &["row"]),
    ("flex-wrap", &["nowrap"]),
    ("justify-content", &["normal", "flex-start"]),
    ("align-items", &["normal", "stretch"]),
    ("align-self", &["auto"]),
    ("flex-grow", &["0"]),
    ("flex-shrink", &["1"]),
    ("flex-basis", &["auto"]),
    ("gap", &["normal"]),
    ("order", &["0"]),
    ("opacity", &["1"]),
    ("visibility", &["visible"]),
    ("overflow-x", &["visible"]),
    ("overflow-y", &["visible"]),
    ("object-fit", &["fill"]),
    ("filter", &["none"]),
    ("cursor", &["auto"]),
    ("pointer-events", &["auto"]),
    ("transform", &["none"]),
    ("transform-origin", &[]),
    ("transition", &[]),
    ("will-change", &["auto"]),
];

/// Visual properties deliberately left out of [`DEFAULT_VALUES`]: their
/// values are kept whatever they are.
pub const KEEP_VERBATIM: &[&str] = &["color", "font-family", "font-size"];

/// Properties whose computed pixel size can come from the viewport.
pub const VIEWPORT_SENSITIVE: &[&str] = &["width", "min-width", "max-width", "left", "right"];

/// The classification tables used by the extractor.
///
/// `Default` gives the built-in tables; the cutoff can be recalibrated per
/// target site without touching the tables themselves.
#[derive(Debug, Clone)]
pub struct PropertyTables {
    visual: Vec<String>,
    defaults: HashMap<String, HashSet<String>>,
    viewport_sensitive: HashSet<String>,
    viewport_cutoff_px: f64,
}

impl Default for PropertyTables {
    fn default() -> Self {
        PropertyTables {
            visual: VISUAL_PROPERTIES.iter().map(|p| p.to_string()).collect(),
            defaults: DEFAULT_VALUES
                .iter()
                .map(|(prop, values)| {
                    let set = values.iter().map(|v| v.to_string()).collect();
                    (prop.to_string(), set)
                })
                .collect(),
            viewport_sensitive: VIEWPORT_SENSITIVE.iter().map(|p| p.to_string()).collect(),
            viewport_cutoff_px: VIEWPORT_CUTOFF_PX,
        }
    }
}

impl PropertyTables {
    pub fn with_viewport_cutoff(mut self, cutoff_px: f64) -> Self {
        self.viewport_cutoff_px = cutoff_px;
        self
    }

    pub fn visual_properties(&self) -> &[String] {
        &self.visual
    }

    pub fn viewport_cutoff_px(&self) -> f64 {
        self.viewport_cutoff_px
    }

    /// True when the property has an entry with no values at all.
    pub fn is_always_skipped(&self, property: &str) -> bool {
        self.defaults
            .get(property)
            .is_some_and(|values| values.is_empty())
    }

    pub fn is_default(&self, property: &str, value: &str) -> bool {
        self.defaults
            .get(property)
            .is_some_and(|values| values.contains(value))
    }

    pub fn is_viewport_sensitive(&self, property: &str) -> bool {
        self.viewport_sensitive.contains(property)
    }
}
