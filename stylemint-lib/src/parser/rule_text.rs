use crate::style::rule::RuleBlock;
use once_cell::sync::Lazy;
use regex::Regex;

// A comment that is alone on its line, taken together with the line break.
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*/\*[^*]*\*+(?:[^/*][^*]*\*+)*/[ \t]*(?:\n|\z)")
        .expect("hardcoded regex is valid")
});
static INLINE_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/").expect("hardcoded regex is valid")
});
static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("hardcoded regex is valid"));
static SINGLE_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([^{}]+)\{([^{}]*)\}$").expect("hardcoded regex is valid")
});

/// A chunk of stylesheet text between blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A plain `selector { ... }` rule.
    Rule(RuleBlock),
    /// Anything else (at-rules, nested blocks, several rules on adjacent
    /// lines). Carried through untouched.
    Raw(String),
}

impl Block {
    pub fn to_css(&self) -> String {
        match self {
            Block::Rule(rule) => rule.to_string(),
            Block::Raw(text) => text.clone(),
        }
    }
}

/// Remove every `/* ... */` comment. Comments on a line of their own take
/// the line with them so they cannot open a gap inside a rule.
pub fn strip_comments(css: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(css, "");
    INLINE_COMMENT.replace_all(&without_lines, "").into_owned()
}

/// Parse one `selector { prop: value; ... }` block, keeping declaration
/// order and duplicates. Returns `None` for anything that is not exactly
/// one plain rule.
pub fn parse_rule(text: &str) -> Option<RuleBlock> {
    let caps = SINGLE_RULE.captures(text.trim())?;
    let selector = caps[1].trim();
    if selector.is_empty() || selector.starts_with('@') {
        return None;
    }

    let mut rule = RuleBlock::new(selector);
    for statement in caps[2].split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        let (property, value) = statement.split_once(':')?;
        let property = property.trim();
        if property.is_empty() {
            return None;
        }
        rule.push(property, value.trim());
    }
    Some(rule)
}

/// Split comment-free stylesheet text into blocks on blank lines.
pub fn split_blocks(css: &str) -> Vec<Block> {
    BLANK_LINE
        .split(css)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| match parse_rule(chunk) {
            Some(rule) => Block::Rule(rule),
            None => {
                log::debug!("passing through unparsed block: {}", first_line(chunk));
                Block::Raw(chunk.to_string())
            }
        })
        .collect()
}

/// Strip comments, then split into blocks. CRLF line endings are read as
/// plain `\n`.
pub fn parse_blocks(css: &str) -> Vec<Block> {
    let css = css.replace("\r\n", "\n");
    split_blocks(&strip_comments(&css))
}

/// Render blocks separated by one blank line.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_css)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn first_line(chunk: &str) -> &str {
    chunk.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::rule::Declaration;

    #[test]
    fn parses_a_plain_rule() {
        let rule = parse_rule("#hero {\n  left: 960px;\n  color: red;\n}").unwrap();
        assert_eq!(rule.selector, "#hero");
        assert_eq!(
            rule.declarations,
            vec![
                Declaration::new("left", "960px"),
                Declaration::new("color", "red"),
            ]
        );
    }

    #[test]
    fn keeps_colons_inside_values() {
        let rule = parse_rule(".bg { background-image: url(\"https://x.test/a.png\") }").unwrap();
        assert_eq!(rule.get("background-image"), Some("url(\"https://x.test/a.png\")"));
    }

    #[test]
    fn rejects_at_rules_and_nesting() {
        assert!(parse_rule("@media (max-width: 600px) { .a { color: red; } }").is_none());
        assert!(parse_rule("@font-face { font-family: X; }").is_none());
        assert!(parse_rule(".a { color }").is_none());
        assert!(parse_rule("just text").is_none());
    }

    #[test]
    fn strips_provenance_and_section_comments() {
        let css = "/* header */\n\n/* ID selectors */\n\n/* div#a */\n#a {\n  color: red;\n}\n";
        assert_eq!(strip_comments(css), "\n\n#a {\n  color: red;\n}\n");
    }

    #[test]
    fn comment_inside_a_rule_does_not_split_it() {
        let css = "#a {\n  color: red;\n  /* note */\n  display: block;\n}";
        let blocks = parse_blocks(css);
        assert_eq!(blocks.len(), 1);
        let Block::Rule(rule) = &blocks[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.declarations.len(), 2);
    }

    #[test]
    fn splits_on_blank_lines_and_keeps_raw_blocks() {
        let css = "#a {\n  color: red;\n}\n\n  \n@media print {\n  #a { display: none; }\n}\n";
        let blocks = parse_blocks(css);
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Rule(r) if r.selector == "#a"));
        assert_eq!(
            blocks[1],
            Block::Raw("@media print {\n  #a { display: none; }\n}".to_string())
        );
        assert_eq!(
            render_blocks(&blocks),
            "#a {\n  color: red;\n}\n\n@media print {\n  #a { display: none; }\n}"
        );
    }

    #[test]
    fn crlf_text_splits_like_lf() {
        let lf = "/* div#a */\n#a {\n  color: red;\n}\n\n\
                  /* span.b */\n.b {\n  display: block;\n}\n";
        let crlf = lf.replace('\n', "\r\n");
        let blocks = parse_blocks(&crlf);
        assert_eq!(blocks, parse_blocks(lf));
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::Rule(_))));
    }
}
