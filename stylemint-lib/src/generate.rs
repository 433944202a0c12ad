use crate::assets::StaticBlocks;
use crate::config::{BuildConfig, Thresholds};
use crate::error::MintError;
use crate::parser::rule_text::{parse_blocks, render_blocks, Block};
use crate::snapshot::parse_dump;
use crate::style::assemble::{assemble, AssembleOptions, GeneratedStylesheet};
use crate::style::clean::{collapse_blank_lines, collapse_border_radius};
use crate::style::idiom::recover_centering;
use crate::style::properties::PropertyTables;
use crate::style::selectors::SelectorGroups;
use std::collections::BTreeSet;

/// What a build did, for progress reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub elements: usize,
    pub id_rules: usize,
    pub class_rules: usize,
    /// Elements with neither id nor class. Never emitted.
    pub tag_elements: usize,
    pub centered: usize,
    pub radius_collapsed: usize,
}

/// A finished production stylesheet.
#[derive(Debug, Clone)]
pub struct Production {
    pub css: String,
    pub report: BuildReport,
}

pub mod stylemint {
    use super::*;

    /// Stage one: dump -> generated stylesheet, honoring the allowlist and
    /// comment settings of `config`.
    pub fn extract(
        dump_json: &str,
        config: &BuildConfig,
    ) -> Result<GeneratedStylesheet, MintError> {
        let (sheet, _) = extract_with_groups(dump_json, config)?;
        Ok(sheet)
    }

    /// Both stages: dump -> production stylesheet wrapped in `assets`.
    pub fn build(
        dump_json: &str,
        config: &BuildConfig,
        assets: &StaticBlocks,
    ) -> Result<Production, MintError> {
        let (sheet, groups) = extract_with_groups(dump_json, config)?;

        let mut report = BuildReport {
            elements: sheet.element_count,
            id_rules: sheet.id_rules.len(),
            class_rules: sheet.class_rules.len(),
            tag_elements: groups.tag_element_count(),
            ..Default::default()
        };

        // Provenance lives on the rule and is simply not rendered from here on.
        let mut blocks: Vec<Block> = sheet.into_rules().into_iter().map(Block::Rule).collect();
        refine_blocks(&mut blocks, &config.thresholds, &mut report);

        let css = assets.wrap(&collapse_blank_lines(&render_blocks(&blocks)));
        log::info!(
            "built {} id rules and {} class rules from {} elements ({} centered, {} radius collapsed)",
            report.id_rules,
            report.class_rules,
            report.elements,
            report.centered,
            report.radius_collapsed
        );
        Ok(Production { css, report })
    }

    /// Stage two on its own, over an already generated stylesheet text.
    pub fn polish(
        generated_css: &str,
        thresholds: &Thresholds,
        assets: &StaticBlocks,
    ) -> Production {
        let mut blocks = parse_blocks(generated_css);
        let mut report = BuildReport::default();
        for block in &blocks {
            if let Block::Rule(rule) = block {
                if rule.selector.starts_with('#') {
                    report.id_rules += 1;
                } else {
                    report.class_rules += 1;
                }
            }
        }
        refine_blocks(&mut blocks, thresholds, &mut report);

        let css = assets.wrap(&collapse_blank_lines(&render_blocks(&blocks)));
        Production { css, report }
    }
}

fn extract_with_groups(
    dump_json: &str,
    config: &BuildConfig,
) -> Result<(GeneratedStylesheet, SelectorGroups), MintError> {
    let snapshots = parse_dump(dump_json)?;
    let tables =
        PropertyTables::default().with_viewport_cutoff(config.thresholds.viewport_cutoff_px);
    let groups = SelectorGroups::build(&snapshots, &tables);

    let targets = target_selectors(config, &groups);
    let options = AssembleOptions {
        include_comments: config.include_comments,
        target_selectors: targets.as_ref(),
    };
    let sheet = assemble(&groups, snapshots.len(), &options);
    Ok((sheet, groups))
}

/// An explicit selector list wins; otherwise keywords pick the selectors.
fn target_selectors(config: &BuildConfig, groups: &SelectorGroups) -> Option<BTreeSet<String>> {
    if let Some(targets) = &config.target_selectors {
        return Some(targets.clone());
    }
    if config.selector_keywords.is_empty() {
        return None;
    }
    let targets = groups.selectors_matching(&config.selector_keywords);
    log::debug!(
        "{} selectors match keywords {:?}",
        targets.len(),
        config.selector_keywords
    );
    Some(targets)
}

/// Idiom recovery, then shorthand collapse, on every rule block.
fn refine_blocks(blocks: &mut [Block], thresholds: &Thresholds, report: &mut BuildReport) {
    for block in blocks.iter_mut() {
        let Block::Rule(rule) = block else {
            continue;
        };
        if recover_centering(rule, thresholds) {
            report.centered += 1;
        }
        if collapse_border_radius(rule) {
            report.radius_collapsed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"[
        {"tag": "DIV", "id": "modal", "className": "overlay", "cssText": "position: absolute; left: 960px; right: 460px; bottom: 120px; transform: matrix(1, 0, 0, 1, -250, 0); color: rgb(20, 20, 20);"},
        {"tag": "BUTTON", "id": "", "className": "btn", "cssText": "border-top-left-radius: 8px; border-top-right-radius: 8px; border-bottom-right-radius: 8px; border-bottom-left-radius: 8px; background-color: rgb(0, 90, 200);"},
        {"tag": "BUTTON", "id": "", "className": "btn", "cssText": "background-color: red;"},
        {"tag": "FOOTER", "id": "", "className": "", "cssText": "color: gray;"}
    ]"#;

    #[test]
    fn builds_production_stylesheet() {
        let production =
            stylemint::build(DUMP, &BuildConfig::default(), &StaticBlocks::default()).unwrap();
        assert_eq!(
            production.css,
            "#modal {\n  position: absolute;\n  left: 50%;\n  color: rgb(20, 20, 20);\n  transform: translateX(-50%);\n}\n\n\
             .btn {\n  border-radius: 8px;\n  background-color: rgb(0, 90, 200);\n}\n"
        );
        assert_eq!(
            production.report,
            BuildReport {
                elements: 4,
                id_rules: 1,
                class_rules: 1,
                tag_elements: 1,
                centered: 1,
                radius_collapsed: 1,
            }
        );
    }

    #[test]
    fn comments_never_reach_production() {
        let config = BuildConfig {
            include_comments: true,
            ..Default::default()
        };
        let production = stylemint::build(DUMP, &config, &StaticBlocks::default()).unwrap();
        assert!(!production.css.contains("/*"));

        let generated = stylemint::extract(DUMP, &config).unwrap().to_css();
        assert!(generated.contains("/* button.btn (2 elements) */"));
    }

    #[test]
    fn keywords_restrict_output() {
        let config = BuildConfig {
            selector_keywords: vec!["btn".to_string()],
            ..Default::default()
        };
        let production = stylemint::build(DUMP, &config, &StaticBlocks::default()).unwrap();
        assert!(production.css.starts_with(".btn {"));
        assert!(!production.css.contains("#modal"));
    }

    #[test]
    fn explicit_targets_beat_keywords() {
        let config = BuildConfig {
            target_selectors: Some(["#modal".to_string()].into_iter().collect()),
            selector_keywords: vec!["btn".to_string()],
            ..Default::default()
        };
        let sheet = stylemint::extract(DUMP, &config).unwrap();
        let selectors: Vec<_> = sheet.rules().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["#modal"]);
    }

    #[test]
    fn malformed_dump_is_fatal() {
        let err = stylemint::build("<html>", &BuildConfig::default(), &StaticBlocks::default())
            .unwrap_err();
        assert!(matches!(err, MintError::MalformedDump { .. }));
    }

    #[test]
    fn polish_matches_direct_build() {
        let config = BuildConfig {
            include_comments: true,
            ..Default::default()
        };
        let assets = StaticBlocks::new(vec!["* { box-sizing: border-box; }".to_string()], vec![]);
        let generated = stylemint::extract(DUMP, &config).unwrap().to_css();
        let polished = stylemint::polish(&generated, &config.thresholds, &assets);
        let built = stylemint::build(DUMP, &config, &assets).unwrap();
        assert_eq!(polished.css, built.css);
        assert_eq!(polished.report.centered, 1);
        assert_eq!(polished.report.radius_collapsed, 1);
    }

    #[test]
    fn polish_reads_crlf_stylesheets() {
        let config = BuildConfig::default();
        let assets = StaticBlocks::default();
        let generated = stylemint::extract(DUMP, &config).unwrap().to_css();
        let lf = stylemint::polish(&generated, &config.thresholds, &assets);
        let crlf_text = generated.replace('\n', "\r\n");
        let crlf = stylemint::polish(&crlf_text, &config.thresholds, &assets);
        assert_eq!(crlf.css, lf.css);
        assert_eq!(crlf.report, lf.report);
        assert_eq!(crlf.report.centered, 1);
        assert_eq!(crlf.report.radius_collapsed, 1);
    }
}
