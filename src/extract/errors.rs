use serde::Serialize;

use crate::constants::{
    is_key_token, is_reference_token, ERRORTYPE_KEY, ERRORTYPE_TO_TYPE_FUNCTION, FUNCTION_KEY,
    REFERENCE_ID_KEY, REFERENCE_TYPE, STRING_TYPE, STRING_VALUE_KEY, TYPE_KEY,
};
use crate::types::{ZMap, ZValue};

/// Error types known to carry no nested sub-errors: recursion stops
/// immediately below them.
const TERMINAL_ERROR_TYPES: &[&str] = &["Z500", "Z504", "Z511"];

/// Error types whose nested sub-errors live under a fixed subset of keys.
/// Types in neither table are traversed fully (every key except the type
/// tag), which is the safe default for error types introduced later.
fn nested_error_keys(error_type: &str) -> Option<&'static [&'static str]> {
    match error_type {
        "Z502" => Some(&["Z502K2"]),
        "Z509" => Some(&["Z509K1"]),
        "Z522" => Some(&["Z522K2"]),
        "Z526" => Some(&["Z526K2"]),
        _ => None,
    }
}

/// One recognized sub-error with its unpacked descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNode {
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub children: Vec<ErrorNode>,
}

/// Unpack the forest of diagnostic sub-errors inside `value`.
///
/// Accepts either a recognized sub-error or an envelope around one: when the
/// value itself is not recognized, its children are searched one level deep.
pub fn extract_error_structure(value: &ZValue) -> Vec<ErrorNode> {
    if let Some(node) = extract_node(value) {
        return vec![node];
    }
    match value {
        ZValue::Object(map) => map.values().filter_map(extract_node).collect(),
        ZValue::Array(items) => items.iter().filter_map(extract_node).collect(),
        ZValue::String(_) => Vec::new(),
    }
}

fn extract_node(value: &ZValue) -> Option<ErrorNode> {
    let map = value.as_object()?;
    let error_type = sub_error_type(map)?;
    let explanation = explanation_for(map, &error_type);
    let children = children_for(map, &error_type);
    Some(ErrorNode {
        error_type,
        explanation,
        children,
    })
}

/// The error type of a recognized sub-error. Two shapes qualify: a bare
/// token type tag, and a call to the errortype-to-type coercion function
/// carrying the token as its argument.
fn sub_error_type(map: &ZMap) -> Option<String> {
    match map.get(TYPE_KEY)? {
        ZValue::String(tag) if is_reference_token(tag) => Some(tag.clone()),
        ZValue::Object(tag) => {
            let callee = tag.get(FUNCTION_KEY).and_then(terminal_str)?;
            if callee != ERRORTYPE_TO_TYPE_FUNCTION {
                return None;
            }
            let token = tag.get(ERRORTYPE_KEY).and_then(terminal_str)?;
            is_reference_token(token).then(|| token.to_string())
        }
        _ => None,
    }
}

/// A bare string, or the payload of a string/reference leaf.
fn terminal_str(value: &ZValue) -> Option<&str> {
    if let ZValue::String(s) = value {
        return Some(s);
    }
    let map = value.as_object()?;
    match map.get(TYPE_KEY)?.as_str()? {
        STRING_TYPE => map.get(STRING_VALUE_KEY)?.as_str(),
        REFERENCE_TYPE => map.get(REFERENCE_ID_KEY)?.as_str(),
        _ => None,
    }
}

/// The conventional first data key (`<errorType>K1`), captured as free-text
/// explanation when it holds a string that is not itself id-shaped.
fn explanation_for(map: &ZMap, error_type: &str) -> Option<String> {
    let first_key = format!("{error_type}K1");
    let text = map.get(&first_key).and_then(terminal_str)?;
    if is_reference_token(text) || is_key_token(text) {
        return None;
    }
    Some(text.to_string())
}

fn children_for(map: &ZMap, error_type: &str) -> Vec<ErrorNode> {
    if TERMINAL_ERROR_TYPES.contains(&error_type) {
        return Vec::new();
    }
    match nested_error_keys(error_type) {
        Some(keys) => keys
            .iter()
            .filter_map(|key| map.get(*key))
            .flat_map(find_sub_errors)
            .collect(),
        None => map
            .iter()
            .filter(|(key, _)| key.as_str() != TYPE_KEY)
            .flat_map(|(_, entry)| find_sub_errors(entry))
            .collect(),
    }
}

/// Deep search below a recognized error: descends through intermediate
/// arrays and objects until a sub-error (or a leaf) is reached, so wrapped
/// diagnostics such as error lists are not lost.
fn find_sub_errors(value: &ZValue) -> Vec<ErrorNode> {
    if let Some(node) = extract_node(value) {
        return vec![node];
    }
    match value {
        ZValue::Array(items) => items.iter().flat_map(find_sub_errors).collect(),
        ZValue::Object(map) => map.values().flat_map(find_sub_errors).collect(),
        ZValue::String(_) => Vec::new(),
    }
}
