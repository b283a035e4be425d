//! Conversion between the two serializations of the same logical value: the
//! terse canonical wire form, where simple leaves collapse to bare strings,
//! and the tag-explicit hybrid form used for in-place editing, where leaves
//! keep their type wrappers but lists stay plain arrays.
//!
//! Both directions are total over any structurally well-formed value and
//! never fail; absent or malformed sub-fields degrade to empty strings.

use crate::constants::{
    is_reference_token, PAIR_HEAD_KEY, PAIR_TAIL_KEY, QUOTE_TYPE, REFERENCE_ID_KEY,
    REFERENCE_TYPE, STRING_TYPE, STRING_VALUE_KEY, TYPED_LIST_TYPE_KEY, TYPE_KEY,
};
use crate::types::{ZMap, ZValue};

/// Collapse a value to canonical form. Idempotent.
pub fn to_canonical(value: &ZValue) -> ZValue {
    match value {
        ZValue::String(s) => ZValue::String(s.clone()),
        ZValue::Array(items) => ZValue::Array(items.iter().map(to_canonical).collect()),
        ZValue::Object(map) => canonicalize_object(map),
    }
}

/// Re-wrap bare leaves into explicit tag-carrying objects. Idempotent.
/// Lists are left as plain arrays; string-valued `Z1K1`, `Z6K1` and `Z9K1`
/// entries are already in their minimal hybrid shape and stay untouched.
pub fn to_hybrid(value: &ZValue) -> ZValue {
    match value {
        ZValue::String(s) => {
            if is_reference_token(s) {
                ZValue::object([
                    (TYPE_KEY, ZValue::from(REFERENCE_TYPE)),
                    (REFERENCE_ID_KEY, ZValue::from(s.as_str())),
                ])
            } else {
                ZValue::object([
                    (TYPE_KEY, ZValue::from(STRING_TYPE)),
                    (STRING_VALUE_KEY, ZValue::from(s.as_str())),
                ])
            }
        }
        ZValue::Array(items) => ZValue::Array(items.iter().map(to_hybrid).collect()),
        ZValue::Object(map) => {
            let mut out = ZMap::with_capacity(map.len());
            for (key, entry) in map {
                let minimal = (key == TYPE_KEY || key == STRING_VALUE_KEY || key == REFERENCE_ID_KEY)
                    && entry.is_string();
                let hybrid = if minimal { entry.clone() } else { to_hybrid(entry) };
                out.insert(key.clone(), hybrid);
            }
            ZValue::Object(out)
        }
    }
}

fn canonicalize_object(map: &ZMap) -> ZValue {
    match tag_id(map) {
        Some(STRING_TYPE) => {
            let inner = leaf_payload(map, STRING_VALUE_KEY);
            if is_reference_token(&inner) {
                // A bare token would be indistinguishable from a reference,
                // so the wrapper stays.
                return ZValue::object([
                    (TYPE_KEY, ZValue::from(STRING_TYPE)),
                    (STRING_VALUE_KEY, ZValue::String(inner)),
                ]);
            }
            ZValue::String(inner)
        }
        Some(REFERENCE_TYPE) => ZValue::String(leaf_payload(map, REFERENCE_ID_KEY)),
        Some(QUOTE_TYPE) => {
            let mut out = ZMap::with_capacity(map.len());
            for (key, entry) in map {
                // The quote's own tag travels verbatim; only the payload
                // (and any stray extra keys) are canonicalized.
                let canonical = if key == TYPE_KEY {
                    entry.clone()
                } else {
                    to_canonical(entry)
                };
                out.insert(key.clone(), canonical);
            }
            ZValue::Object(out)
        }
        _ if is_pair_list(map) => ZValue::Array(collect_pair_list(map)),
        _ => ZValue::Object(
            map.iter()
                .map(|(key, entry)| (key.clone(), to_canonical(entry)))
                .collect(),
        ),
    }
}

/// The node's type id: a bare string tag, or the id inside a reference-shaped
/// tag. Function-call tags yield `None`.
fn tag_id(map: &ZMap) -> Option<&str> {
    match map.get(TYPE_KEY)? {
        ZValue::String(tag) => Some(tag),
        ZValue::Object(tag) => tag.get(REFERENCE_ID_KEY).and_then(ZValue::as_str),
        ZValue::Array(_) => None,
    }
}

fn leaf_payload(map: &ZMap, key: &str) -> String {
    match map.get(key) {
        Some(ZValue::String(s)) => s.clone(),
        Some(other) => match to_canonical(other) {
            ZValue::String(s) => s,
            _ => String::new(),
        },
        None => String::new(),
    }
}

fn is_pair_list(map: &ZMap) -> bool {
    map.contains_key(PAIR_HEAD_KEY) && map.contains_key(PAIR_TAIL_KEY)
}

/// Flatten the nested-pair list encoding into a plain array. When the pair's
/// type tag is a typed-list construction, its element type becomes the
/// array's leading type element.
fn collect_pair_list(map: &ZMap) -> Vec<ZValue> {
    let mut items = Vec::new();
    if let Some(ZValue::Object(tag)) = map.get(TYPE_KEY) {
        if let Some(element_type) = tag.get(TYPED_LIST_TYPE_KEY) {
            items.push(to_canonical(element_type));
        }
    }

    let mut current = map;
    loop {
        match current.get(PAIR_HEAD_KEY) {
            Some(head) => items.push(to_canonical(head)),
            None => break,
        }
        match current.get(PAIR_TAIL_KEY) {
            Some(ZValue::Object(tail)) if tail.contains_key(PAIR_HEAD_KEY) => current = tail,
            Some(ZValue::Array(rest)) => {
                items.extend(rest.iter().map(to_canonical));
                break;
            }
            _ => break,
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::{to_canonical, to_hybrid};
    use crate::types::ZValue;

    fn string_leaf(text: &str) -> ZValue {
        ZValue::object([("Z1K1", ZValue::from("Z6")), ("Z6K1", ZValue::from(text))])
    }

    fn reference_leaf(id: &str) -> ZValue {
        ZValue::object([("Z1K1", ZValue::from("Z9")), ("Z9K1", ZValue::from(id))])
    }

    #[rstest::rstest]
    #[case(string_leaf("hello"), ZValue::from("hello"))]
    #[case(reference_leaf("Z801"), ZValue::from("Z801"))]
    #[case(string_leaf("Z123"), string_leaf("Z123"))] // ambiguity guard
    #[case(string_leaf(""), ZValue::from(""))]
    fn test_leaf_collapse(#[case] input: ZValue, #[case] expected: ZValue) {
        assert_eq!(to_canonical(&input), expected);
    }

    #[rstest::rstest]
    fn test_missing_payload_degrades_to_empty_string() {
        let no_payload = ZValue::object([("Z1K1", ZValue::from("Z6"))]);
        assert_eq!(to_canonical(&no_payload), ZValue::from(""));

        let no_reference = ZValue::object([("Z1K1", ZValue::from("Z9"))]);
        assert_eq!(to_canonical(&no_reference), ZValue::from(""));
    }

    #[rstest::rstest]
    fn test_reference_shaped_tag_is_accepted() {
        let defensive = ZValue::object([
            ("Z1K1", reference_leaf("Z6")),
            ("Z6K1", ZValue::from("text")),
        ]);
        assert_eq!(to_canonical(&defensive), ZValue::from("text"));
    }

    #[rstest::rstest]
    fn test_pair_encoded_list_flattens() {
        let constructor = ZValue::object([
            ("Z1K1", ZValue::from("Z7")),
            ("Z7K1", ZValue::from("Z881")),
            ("Z881K1", ZValue::from("Z6")),
        ]);
        let pairs = ZValue::object([
            ("Z1K1", constructor.clone()),
            ("K1", string_leaf("a")),
            (
                "K2",
                ZValue::object([
                    ("Z1K1", constructor),
                    ("K1", string_leaf("b")),
                    ("K2", ZValue::Array(vec![])),
                ]),
            ),
        ]);
        assert_eq!(
            to_canonical(&pairs),
            ZValue::Array(vec![ZValue::from("Z6"), ZValue::from("a"), ZValue::from("b")])
        );
    }

    #[rstest::rstest]
    fn test_quote_tag_travels_verbatim() {
        let quote = ZValue::object([
            ("Z1K1", ZValue::from("Z99")),
            (
                "Z99K1",
                ZValue::object([("Z1K1", ZValue::from("Z40")), ("Z40K1", string_leaf("raw"))]),
            ),
        ]);
        let canonical = to_canonical(&quote);
        assert_eq!(canonical.type_tag_str(), Some("Z99"));
        // payload canonicalized: the inner leaf collapsed
        assert_eq!(
            canonical.get("Z99K1").and_then(|payload| payload.get("Z40K1")),
            Some(&ZValue::from("raw"))
        );
    }

    #[rstest::rstest]
    fn test_hybrid_wraps_bare_strings_by_shape() {
        assert_eq!(to_hybrid(&ZValue::from("hello")), string_leaf("hello"));
        assert_eq!(to_hybrid(&ZValue::from("Z801")), reference_leaf("Z801"));
    }

    #[rstest::rstest]
    fn test_hybrid_leaves_lists_plain() {
        let value = ZValue::Array(vec![ZValue::from("Z6"), ZValue::from("a")]);
        let hybrid = to_hybrid(&value);
        assert!(hybrid.is_array());
        assert_eq!(hybrid.get_index(0), Some(&reference_leaf("Z6")));
        assert_eq!(hybrid.get_index(1), Some(&string_leaf("a")));
    }

    #[rstest::rstest]
    fn test_hybrid_minimal_keys_untouched() {
        let persistent = ZValue::object([
            ("Z1K1", ZValue::from("Z2")),
            ("Z2K2", ZValue::from("content")),
        ]);
        let hybrid = to_hybrid(&persistent);
        assert_eq!(hybrid.type_tag_str(), Some("Z2"));
        assert_eq!(hybrid.get("Z2K2"), Some(&string_leaf("content")));
    }

    #[rstest::rstest]
    #[case(ZValue::from("hello"))]
    #[case(string_leaf("Z123"))]
    #[case(ZValue::Array(vec![ZValue::from("Z6"), ZValue::from("a")]))]
    #[case(ZValue::object([("Z1K1", ZValue::from("Z2")), ("Z2K2", ZValue::from("x"))]))]
    fn test_canonical_idempotent(#[case] value: ZValue) {
        let once = to_canonical(&value);
        assert_eq!(to_canonical(&once), once);
    }

    #[rstest::rstest]
    #[case(ZValue::from("hello"))]
    #[case(ZValue::from("Z801"))]
    #[case(ZValue::Array(vec![ZValue::from("Z6"), ZValue::from("a")]))]
    #[case(ZValue::object([("Z1K1", ZValue::from("Z2")), ("Z2K2", ZValue::from("x"))]))]
    fn test_hybrid_idempotent(#[case] value: ZValue) {
        let once = to_hybrid(&value);
        assert_eq!(to_hybrid(&once), once);
    }
}
