// canonical name + parenthesised aliases out of a free-text trick name

/// Marks an entry as tentative. Inside the alias group it suppresses aliases.
pub const UNCONFIRMED_MARKER: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedName {
    pub canonical_name: String,
    pub other_names: Vec<String>,
}

/// Splits `"Pretzel (360 Shuv, Pretzel Flip)"` into `"Pretzel"` and its aliases.
///
/// The alias group runs from the first `(` to the first `)`, or to the end of
/// the string when there is no closing paren. Empty pieces are dropped,
/// duplicates are kept.
pub fn extract_aliases(raw: &str) -> ExtractedName {
    let Some(open) = raw.find('(') else {
        return ExtractedName { canonical_name: raw.trim().to_string(), other_names: Vec::new() };
    };

    let canonical_name = raw[..open].trim().to_string();
    let rest = &raw[open + 1..];
    let group = match rest.find(')') {
        Some(close) => &rest[..close],
        None => rest,
    };

    if group.contains(UNCONFIRMED_MARKER) {
        return ExtractedName { canonical_name, other_names: Vec::new() };
    }

    let other_names = group
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    ExtractedName { canonical_name, other_names }
}
