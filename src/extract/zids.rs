use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;

use crate::types::ZValue;

/// One capital letter, digits, optional `K<digits>` key suffix — matched
/// anywhere inside a string, so ids embedded in longer text are found too.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][0-9]+(?:K[0-9]+)?").expect("token pattern compiles"));

/// Collect every distinct definition/key identifier referenced anywhere in
/// `value`, scanning both object keys and string leaves.
///
/// Key-style tokens (those carrying a `K` segment) come first, then plain
/// ids, each class in first-seen order: consumers resolve keys before the
/// ids that own them. With `return_keys` the full tokens are returned;
/// otherwise each token maps to its base id and bare local keys (`"K1"`)
/// are dropped.
pub fn extract_zids(value: &ZValue, return_keys: bool) -> Vec<String> {
    let mut found: SmallVec<[&str; 16]> = SmallVec::new();
    collect(value, &mut found);

    let keys_first = found
        .iter()
        .filter(|token| token.contains('K'))
        .chain(found.iter().filter(|token| !token.contains('K')));

    let mut out: Vec<String> = Vec::new();
    for token in keys_first {
        let rendered = if return_keys {
            token.to_string()
        } else {
            match token.find('K') {
                Some(0) => continue,
                Some(pos) => token[..pos].to_string(),
                None => token.to_string(),
            }
        };
        if !out.contains(&rendered) {
            out.push(rendered);
        }
    }
    out
}

fn collect<'a>(value: &'a ZValue, found: &mut SmallVec<[&'a str; 16]>) {
    match value {
        ZValue::String(s) => scan(s, found),
        ZValue::Array(items) => {
            for item in items {
                collect(item, found);
            }
        }
        ZValue::Object(map) => {
            for (key, entry) in map {
                scan(key, found);
                collect(entry, found);
            }
        }
    }
}

fn scan<'a>(text: &'a str, found: &mut SmallVec<[&'a str; 16]>) {
    for token in TOKEN_PATTERN.find_iter(text) {
        found.push(token.as_str());
    }
}
