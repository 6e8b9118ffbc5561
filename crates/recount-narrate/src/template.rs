//! Placeholder substitution and text helpers.
//!
//! Templates name their values in braces: `{entity}`. Two casing variants
//! are derived per value: `{entity:cap}` upper-cases the first letter and
//! `{entity:lower}` lower-cases the whole value. A placeholder whose value
//! is absent substitutes as the empty string, and the rendered text is
//! whitespace-normalized, so templates never fail on missing values.

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse repeated whitespace and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Substitute `{name}` / `{name:cap}` / `{name:lower}` placeholders using
/// `lookup`, then whitespace-normalize the result.
///
/// Unknown placeholder names and absent values render as empty strings.
/// A `{` without a closing brace is copied through literally.
pub fn substitute(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let placeholder = &after[..close];
                let (name, variant) = match placeholder.split_once(':') {
                    Some((name, variant)) => (name, Some(variant)),
                    None => (placeholder, None),
                };
                if let Some(value) = lookup(name) {
                    match variant {
                        Some("cap") => out.push_str(&capitalize(&value)),
                        Some("lower") => out.push_str(&value.to_lowercase()),
                        _ => out.push_str(&value),
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    normalize_whitespace(&out)
}
