//! Centering idiom recovery.
//!
//! An element centred with `left: 50%; transform: translateX(-50%)` is
//! reported by the browser as a pixel `left` near half the capture width
//! and a negative pixel translation of half the element's own width. When
//! a rule shows that signature, the authored form is put back.

use crate::config::Thresholds;
use crate::parser::rule_text::{parse_blocks, render_blocks, Block};
use crate::style::extract::parse_px;
use crate::style::rule::RuleBlock;
use once_cell::sync::Lazy;
use regex::Regex;

static TRANSLATE_X_PX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^translateX\(\s*(-?\d+(?:\.\d+)?)px\s*\)$").expect("hardcoded regex is valid")
});

fn translate_x_px(value: &str) -> Option<f64> {
    TRANSLATE_X_PX
        .captures(value.trim())
        .and_then(|caps| caps[1].parse().ok())
}

/// True when the rule carries the computed signature of a horizontally
/// centred element.
pub fn is_centering_idiom(rule: &RuleBlock, thresholds: &Thresholds) -> bool {
    let left = rule.get("left").and_then(parse_px);
    let shift = rule.get("transform").and_then(translate_x_px);
    match (left, shift) {
        (Some(left), Some(shift)) => {
            left > thresholds.centering_left_min_px
                && left < thresholds.centering_left_max_px
                && shift < 0.0
        }
        _ => false,
    }
}

/// Rewrite the rule to `left: 50%; transform: translateX(-50%)` when it
/// matches, dropping pixel `right` and `bottom` offsets. Returns whether
/// the rule changed.
pub fn recover_centering(rule: &mut RuleBlock, thresholds: &Thresholds) -> bool {
    if !is_centering_idiom(rule, thresholds) {
        return false;
    }

    rule.set_value("left", "50%");
    rule.set_value("transform", "translateX(-50%)");
    rule.remove_where(|decl| {
        (decl.property == "right" || decl.property == "bottom") && parse_px(&decl.value).is_some()
    });

    log::debug!("{}: recovered centering idiom", rule.selector);
    true
}

/// Text form of [`recover_centering`] over every rule in `css`.
/// Comments are dropped and blocks come back separated by one blank line.
pub fn recover_centering_text(css: &str, thresholds: &Thresholds) -> String {
    let mut blocks = parse_blocks(css);
    for block in &mut blocks {
        if let Block::Rule(rule) = block {
            recover_centering(rule, thresholds);
        }
    }
    render_blocks(&blocks)
}
