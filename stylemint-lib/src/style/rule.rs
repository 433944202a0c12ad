use std::fmt;

/// A single generated rule: one selector and its declarations in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    /// e.g. "#header", ".nav.nav-item"
    pub selector: String,
    pub declarations: Vec<Declaration>,
    /// Where the rule came from, e.g. "div.card (3 elements)". Only
    /// rendered when comments are requested.
    pub provenance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: &str, value: &str) -> Self {
        Declaration {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

impl RuleBlock {
    pub fn new(selector: &str) -> Self {
        RuleBlock {
            selector: selector.to_string(),
            declarations: Vec::new(),
            provenance: None,
        }
    }

    pub fn with_declarations<'a, I>(selector: &str, declarations: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut rule = RuleBlock::new(selector);
        for (property, value) in declarations {
            rule.push(property, value);
        }
        rule
    }

    pub fn push(&mut self, property: &str, value: &str) {
        self.declarations.push(Declaration::new(property, value));
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Value of the first declaration of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.position(property)
            .map(|idx| self.declarations[idx].value.as_str())
    }

    pub fn position(&self, property: &str) -> Option<usize> {
        self.declarations
            .iter()
            .position(|decl| decl.property == property)
    }

    /// Replace the value of the first declaration of `property` in place.
    /// Returns false when the rule has no such declaration.
    pub fn set_value(&mut self, property: &str, value: &str) -> bool {
        match self.position(property) {
            Some(idx) => {
                self.declarations[idx].value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Drop every declaration matching the predicate, returning how many went.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Declaration) -> bool,
    {
        let before = self.declarations.len();
        self.declarations.retain(|decl| !predicate(decl));
        before - self.declarations.len()
    }

    /// Render the rule, with its provenance comment when asked for.
    pub fn to_css(&self, include_comments: bool) -> String {
        let mut out = String::new();
        if include_comments {
            if let Some(provenance) = &self.provenance {
                out.push_str(&format!("/* {} */\n", provenance));
            }
        }
        out.push_str(&self.to_string());
        out
    }
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for decl in &self.declarations {
            writeln!(f, "  {}: {};", decl.property, decl.value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_block() {
        let rule = RuleBlock::with_declarations("#hero", [("display", "flex"), ("color", "red")]);
        assert_eq!(
            rule.to_string(),
            "#hero {\n  display: flex;\n  color: red;\n}"
        );
    }

    #[test]
    fn provenance_only_with_comments() {
        let mut rule = RuleBlock::with_declarations(".card", [("color", "red")]);
        rule.provenance = Some("div.card (2 elements)".to_string());
        assert_eq!(
            rule.to_css(true),
            "/* div.card (2 elements) */\n.card {\n  color: red;\n}"
        );
        assert_eq!(rule.to_css(false), ".card {\n  color: red;\n}");
    }

    #[test]
    fn set_and_remove() {
        let mut rule = RuleBlock::with_declarations(
            "#x",
            [("left", "960px"), ("right", "10px"), ("bottom", "4px")],
        );
        assert!(rule.set_value("left", "50%"));
        assert!(!rule.set_value("top", "0"));
        let removed = rule.remove_where(|d| d.property == "right" || d.property == "bottom");
        assert_eq!(removed, 2);
        assert_eq!(rule.declarations, vec![Declaration::new("left", "50%")]);
    }
}
