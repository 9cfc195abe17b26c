//! Field-name casing helpers.

/// Converts a field name to camelCase.
///
/// Words are split on `_`, `-` and spaces; every word after the first gets an
/// upper-case initial and the first character of the result is lower-cased.
/// Names that are already camelCase come back unchanged.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(['_', '-', ' ']).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => out,
    }
}
