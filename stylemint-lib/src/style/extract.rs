use crate::parser::declarations::parse_declarations;
use crate::snapshot::ElementSnapshot;
use crate::style::properties::PropertyTables;
use crate::style::rule::{Declaration, RuleBlock};
use once_cell::sync::Lazy;
use regex::Regex;

/// The identity transform. A canonicalized transform equal to this is dropped.
pub const IDENTITY_TRANSFORM: &str = "none";

static PLAIN_PX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d+(?:\.\d+)?)px$").expect("hardcoded regex is valid"));

// matrix(1, 0, 0, 1, tx, ty): a pure translation as reported by getComputedStyle.
static TRANSLATION_MATRIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^matrix\(\s*1\s*,\s*0\s*,\s*0\s*,\s*1\s*,\s*(-?\d*\.?\d+(?:e[-+]?\d+)?)\s*,\s*(-?\d*\.?\d+(?:e[-+]?\d+)?)\s*\)$",
    )
    .expect("hardcoded regex is valid")
});

/// The properties kept for one element, in visual-property order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredStyleMap {
    entries: Vec<Declaration>,
}

impl FilteredStyleMap {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|decl| decl.property == property)
            .map(|decl| decl.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    pub fn properties(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.property.as_str()).collect()
    }

    /// Build a rule for `selector` carrying these declarations in order.
    pub fn to_rule(&self, selector: &str) -> RuleBlock {
        RuleBlock {
            selector: selector.to_string(),
            declarations: self.entries.clone(),
            provenance: None,
        }
    }
}

/// Parse a plain `<n>px` value.
pub fn parse_px(value: &str) -> Option<f64> {
    PLAIN_PX
        .captures(value.trim())
        .and_then(|caps| caps[1].parse().ok())
}

/// Rewrite a computed translation matrix into the `translate*` form an
/// author would have written. Other transforms come back unchanged.
pub fn canonicalize_transform(value: &str) -> String {
    let Some(caps) = TRANSLATION_MATRIX.captures(value.trim()) else {
        return value.to_string();
    };
    let (tx_text, ty_text) = (&caps[1], &caps[2]);
    let (Ok(tx), Ok(ty)) = (tx_text.parse::<f64>(), ty_text.parse::<f64>()) else {
        return value.to_string();
    };

    match (tx != 0.0, ty != 0.0) {
        (true, false) => format!("translateX({}px)", tx_text),
        (false, true) => format!("translateY({}px)", ty_text),
        (true, true) => format!("translate({}px, {}px)", tx_text, ty_text),
        (false, false) => IDENTITY_TRANSFORM.to_string(),
    }
}

/// Reduce one element's computed style to the declarations worth authoring.
pub fn extract_styles(snapshot: &ElementSnapshot, tables: &PropertyTables) -> FilteredStyleMap {
    let computed = parse_declarations(&snapshot.css_text);
    let mut entries = Vec::new();

    for property in tables.visual_properties() {
        let Some(value) = computed.get(property) else {
            continue;
        };
        if tables.is_always_skipped(property) {
            continue;
        }
        if tables.is_default(property, value) {
            log::trace!("{}: default value {} elided", property, value);
            continue;
        }
        if tables.is_viewport_sensitive(property) {
            if let Some(px) = parse_px(value) {
                if px > tables.viewport_cutoff_px() {
                    log::trace!("{}: viewport-derived {} elided", property, value);
                    continue;
                }
            }
        }

        let value = if property == "transform" {
            let canonical = canonicalize_transform(value);
            if canonical == IDENTITY_TRANSFORM {
                continue;
            }
            canonical
        } else {
            value.clone()
        };

        entries.push(Declaration {
            property: property.clone(),
            value,
        });
    }

    FilteredStyleMap { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(css_text: &str) -> FilteredStyleMap {
        let snapshot = ElementSnapshot::new("div", "", "", css_text);
        extract_styles(&snapshot, &PropertyTables::default())
    }

    #[test]
    fn drops_non_visual_properties() {
        let styles = extract("color: red; caret-color: blue; -webkit-font-smoothing: auto;");
        assert_eq!(styles.properties(), vec!["color"]);
    }

    #[test]
    fn drops_listed_defaults() {
        let styles = extract(
            "margin-top: 0px; margin-bottom: 12px; position: static; \
             background-color: rgba(0, 0, 0, 0); opacity: 1;",
        );
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.properties(), vec!["margin-bottom"]);
        assert_eq!(styles.get("margin-bottom"), Some("12px"));
    }

    #[test]
    fn always_skipped_whatever_the_value() {
        let styles = extract(
            "transition: opacity 0.3s ease 0s; transform-origin: 10px 10px; inline-size: 40px;",
        );
        assert!(styles.is_empty());
    }

    #[test]
    fn viewport_sized_offsets_are_dropped() {
        assert!(extract("right: 1920px;").is_empty());
        assert_eq!(extract("right: 40px;").get("right"), Some("40px"));
        assert_eq!(extract("width: 1000px;").get("width"), Some("1000px"));
        assert!(extract("width: 1000.5px;").is_empty());
        // only plain pixel values are measured
        assert_eq!(extract("width: 1200em;").get("width"), Some("1200em"));
        // height is not viewport-sensitive
        assert_eq!(extract("height: 1500px;").get("height"), Some("1500px"));
    }

    #[test]
    fn cutoff_is_configurable() {
        let snapshot = ElementSnapshot::new("div", "", "", "width: 1200px;");
        let tables = PropertyTables::default().with_viewport_cutoff(1440.0);
        assert_eq!(extract_styles(&snapshot, &tables).get("width"), Some("1200px"));
    }

    #[test]
    fn transform_matrices_become_translations() {
        assert_eq!(
            extract("transform: matrix(1, 0, 0, 1, -40, 0);").get("transform"),
            Some("translateX(-40px)")
        );
        assert_eq!(
            extract("transform: matrix(1, 0, 0, 1, 0, 25);").get("transform"),
            Some("translateY(25px)")
        );
        assert_eq!(
            extract("transform: matrix(1, 0, 0, 1, 12.5, -8);").get("transform"),
            Some("translate(12.5px, -8px)")
        );
        assert!(extract("transform: matrix(1, 0, 0, 1, 0, 0);").is_empty());
    }

    #[test]
    fn other_transforms_pass_through() {
        assert_eq!(
            canonicalize_transform("matrix(0.707107, 0.707107, -0.707107, 0.707107, 0, 0)"),
            "matrix(0.707107, 0.707107, -0.707107, 0.707107, 0, 0)"
        );
        assert_eq!(
            canonicalize_transform("matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1)"),
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1)"
        );
        assert_eq!(canonicalize_transform("matrix(1,0,0,1,-40,0)"), "translateX(-40px)");
        assert_eq!(canonicalize_transform("matrix(1, 0, 0, 1, -0, 0)"), "none");
    }

    #[test]
    fn output_follows_visual_order_not_input_order() {
        let styles = extract("color: red; display: flex; padding-top: 4px; position: relative;");
        assert_eq!(
            styles.properties(),
            vec!["display", "position", "padding-top", "color"]
        );
    }

    #[test]
    fn unknown_values_are_kept_verbatim() {
        let styles = extract("display: -webkit-box; cursor: grab;");
        assert_eq!(styles.get("display"), Some("-webkit-box"));
        assert_eq!(styles.get("cursor"), Some("grab"));
    }

    #[test]
    fn missing_css_text_gives_empty_map() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn to_rule_keeps_order() {
        let rule = extract("color: red; display: grid;").to_rule("#app");
        assert_eq!(rule.to_string(), "#app {\n  display: grid;\n  color: red;\n}");
    }
}
