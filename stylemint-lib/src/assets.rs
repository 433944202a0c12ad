/// Hand-written CSS placed around the generated rules: resets and baseline
/// rules before, transitions, interaction states and breakpoints after.
/// The content is owned by the caller; only its placement is decided here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticBlocks {
    pub preamble: Vec<String>,
    pub postamble: Vec<String>,
}

impl StaticBlocks {
    pub fn new(preamble: Vec<String>, postamble: Vec<String>) -> Self {
        StaticBlocks {
            preamble,
            postamble,
        }
    }

    /// Preamble blocks, the generated rules, then postamble blocks, each
    /// trimmed and separated by one blank line. Empty blocks are dropped and
    /// the result ends with a single newline.
    pub fn wrap(&self, generated: &str) -> String {
        let blocks: Vec<&str> = self
            .preamble
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(generated))
            .chain(self.postamble.iter().map(String::as_str))
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .collect();

        let mut css = blocks.join("\n\n");
        css.push('\n');
        css
    }
}
