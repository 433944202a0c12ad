use crate::style::rule::RuleBlock;
use crate::style::selectors::SelectorGroups;
use std::collections::BTreeSet;

pub const ID_SECTION_COMMENT: &str = "/* ID selectors */";
pub const CLASS_SECTION_COMMENT: &str = "/* Class selectors */";

#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleOptions<'a> {
    pub include_comments: bool,
    /// When set, selectors outside this set are skipped.
    pub target_selectors: Option<&'a BTreeSet<String>>,
}

/// Rules ready to print: ids first, then classes, each sorted by selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedStylesheet {
    pub element_count: usize,
    pub id_rules: Vec<RuleBlock>,
    pub class_rules: Vec<RuleBlock>,
    pub include_comments: bool,
}

impl GeneratedStylesheet {
    pub fn rules(&self) -> impl Iterator<Item = &RuleBlock> {
        self.id_rules.iter().chain(self.class_rules.iter())
    }

    pub fn into_rules(self) -> Vec<RuleBlock> {
        let mut rules = self.id_rules;
        rules.extend(self.class_rules);
        rules
    }

    pub fn header(&self) -> String {
        format!(
            "/* Generated by stylemint from {} element snapshots */",
            self.element_count
        )
    }

    /// Serialize with a header and, when comments are on, section and
    /// provenance comments. Blocks are separated by one blank line.
    pub fn to_css(&self) -> String {
        let mut blocks = vec![self.header()];

        if self.include_comments && !self.id_rules.is_empty() {
            blocks.push(ID_SECTION_COMMENT.to_string());
        }
        blocks.extend(self.id_rules.iter().map(|r| r.to_css(self.include_comments)));

        if self.include_comments && !self.class_rules.is_empty() {
            blocks.push(CLASS_SECTION_COMMENT.to_string());
        }
        blocks.extend(
            self.class_rules
                .iter()
                .map(|r| r.to_css(self.include_comments)),
        );

        let mut css = blocks.join("\n\n");
        css.push('\n');
        css
    }
}

fn is_selected(selector: &str, options: &AssembleOptions<'_>) -> bool {
    options
        .target_selectors
        .map_or(true, |targets| targets.contains(selector))
}

/// Walk the id bucket then the class bucket in selector order and turn
/// every non-empty style map into a rule. The tag bucket is not emitted.
pub fn assemble(
    groups: &SelectorGroups,
    element_count: usize,
    options: &AssembleOptions<'_>,
) -> GeneratedStylesheet {
    let mut sheet = GeneratedStylesheet {
        element_count,
        include_comments: options.include_comments,
        ..Default::default()
    };

    for (selector, entry) in &groups.ids {
        if !is_selected(selector, options) || entry.styles.is_empty() {
            continue;
        }
        let mut rule = entry.styles.to_rule(selector);
        rule.provenance = Some(format!("{}{}", entry.snapshot.tag_name(), selector));
        sheet.id_rules.push(rule);
    }

    for (selector, entry) in &groups.classes {
        if !is_selected(selector, options) || entry.styles.is_empty() {
            continue;
        }
        let mut rule = entry.styles.to_rule(selector);
        let origin = format!("{}{}", entry.snapshot.tag_name(), selector);
        rule.provenance = Some(if entry.count > 1 {
            format!("{} ({} elements)", origin, entry.count)
        } else {
            origin
        });
        sheet.class_rules.push(rule);
    }

    log::debug!(
        "assembled {} id rules and {} class rules",
        sheet.id_rules.len(),
        sheet.class_rules.len()
    );
    sheet
}
