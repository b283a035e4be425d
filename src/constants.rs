/// Key designating the type tag of every ZObject node.
pub const TYPE_KEY: &str = "Z1K1";

pub const STRING_TYPE: &str = "Z6";
pub const STRING_VALUE_KEY: &str = "Z6K1";

pub const REFERENCE_TYPE: &str = "Z9";
pub const REFERENCE_ID_KEY: &str = "Z9K1";

/// Quoted raw value wrapper; its payload is carried verbatim on the wire.
pub const QUOTE_TYPE: &str = "Z99";
pub const QUOTE_VALUE_KEY: &str = "Z99K1";

pub const FUNCTION_CALL_TYPE: &str = "Z7";
pub const FUNCTION_KEY: &str = "Z7K1";

/// Typed-list constructor and its element-type argument key.
pub const TYPED_LIST_FUNCTION: &str = "Z881";
pub const TYPED_LIST_TYPE_KEY: &str = "Z881K1";

/// Errortype-to-type coercion function and its errortype argument key.
pub const ERRORTYPE_TO_TYPE_FUNCTION: &str = "Z885";
pub const ERRORTYPE_KEY: &str = "Z885K1";

/// Head/tail keys of the legacy nested-pair list encoding.
pub const PAIR_HEAD_KEY: &str = "K1";
pub const PAIR_TAIL_KEY: &str = "K2";

/// A reference-id token: one ASCII capital letter followed by one or more
/// digits, nothing else. `"Z123"` qualifies, `"Z1K1"` and `"hello"` do not.
#[inline]
pub fn is_reference_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_uppercase() && bytes[1..].iter().all(u8::is_ascii_digit)
}

/// A global or local key token: a reference token with a `K<digits>` suffix
/// (`"Z1K1"`), or a bare local key (`"K1"`).
#[inline]
pub fn is_key_token(s: &str) -> bool {
    match s.find('K') {
        Some(0) => is_reference_token(s),
        Some(pos) => is_reference_token(&s[..pos]) && is_reference_token(&s[pos..]),
        None => false,
    }
}
