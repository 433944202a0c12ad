use crate::parser::rule_text::{parse_blocks, render_blocks, Block};
use crate::style::rule::{Declaration, RuleBlock};
use once_cell::sync::Lazy;
use regex::Regex;

/// Corner longhands in the order the extractor emits them.
pub const CORNER_RADII: [&str; 4] = [
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
];

static PLAIN_LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d*\.?\d+(?:px|%|em|rem|vh|vw|vmin|vmax|pt|ch|ex)?$")
        .expect("hardcoded regex is valid")
});
static EXTRA_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n){2,}").expect("hardcoded regex is valid"));

/// Replace four equal corner radii with one `border-radius`.
///
/// The corners must appear in emission order, each once, each a single
/// length or percentage. The shorthand takes the place of the first corner;
/// declarations between the corners stay where they are.
pub fn collapse_border_radius(rule: &mut RuleBlock) -> bool {
    let mut positions = [0usize; 4];
    for (slot, corner) in CORNER_RADII.iter().enumerate() {
        let mut found = rule
            .declarations
            .iter()
            .enumerate()
            .filter(|(_, decl)| decl.property == *corner);
        match (found.next(), found.next()) {
            (Some((idx, _)), None) => positions[slot] = idx,
            _ => return false,
        }
    }
    if positions.windows(2).any(|pair| pair[0] >= pair[1]) {
        return false;
    }

    let value = rule.declarations[positions[0]].value.clone();
    if !PLAIN_LENGTH.is_match(&value) {
        return false;
    }
    if positions
        .iter()
        .any(|&idx| rule.declarations[idx].value != value)
    {
        return false;
    }

    rule.declarations[positions[0]] = Declaration::new("border-radius", &value);
    for &idx in positions[1..].iter().rev() {
        rule.declarations.remove(idx);
    }
    log::debug!("{}: collapsed corner radii to {}", rule.selector, value);
    true
}

/// Collapse runs of blank lines to a single blank line.
pub fn collapse_blank_lines(css: &str) -> String {
    EXTRA_BLANK_LINES.replace_all(css, "\n\n").into_owned()
}

/// Text form of the cleaner: shorthand collapse on every rule, then blank
/// line normalization. Applying it to its own output changes nothing.
pub fn clean_rule_text(css: &str) -> String {
    let mut blocks = parse_blocks(css);
    for block in &mut blocks {
        if let Block::Rule(rule) = block {
            collapse_border_radius(rule);
        }
    }
    collapse_blank_lines(&render_blocks(&blocks))
}
