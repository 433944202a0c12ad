use std::collections::HashMap;

/// Parse a `cssText` string into a property -> value map.
///
/// Statements are split on `;` and each statement on its first `:`.
/// Names and values are trimmed, statements without a colon or with an
/// empty name are dropped, and a repeated property keeps its last value.
pub fn parse_declarations(css_text: &str) -> HashMap<String, String> {
    let mut declarations = HashMap::new();

    for statement in css_text.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        let Some((name, value)) = statement.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        declarations.insert(name.to_string(), value.trim().to_string());
    }

    declarations
}
