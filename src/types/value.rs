use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::constants::TYPE_KEY;

pub type ZMap = IndexMap<String, ZValue>;

/// The universal ZObject value shape: a terminal string, an ordered mapping,
/// or an ordered sequence. Key order is significant, so objects are backed by
/// an `IndexMap`.
#[derive(Clone, Debug, PartialEq)]
pub enum ZValue {
    String(String),
    Array(Vec<ZValue>),
    Object(ZMap),
}

impl Default for ZValue {
    fn default() -> Self {
        ZValue::String(String::new())
    }
}

impl ZValue {
    pub const fn is_string(&self) -> bool {
        matches!(self, ZValue::String(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, ZValue::Array(_))
    }

    pub const fn is_object(&self) -> bool {
        matches!(self, ZValue::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ZValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<ZValue>> {
        match self {
            ZValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<ZValue>> {
        match self {
            ZValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ZMap> {
        match self {
            ZValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ZMap> {
        match self {
            ZValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ZValue> {
        match self {
            ZValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&ZValue> {
        match self {
            ZValue::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// The `Z1K1` entry of an object node, if any.
    pub fn type_tag(&self) -> Option<&ZValue> {
        self.get(TYPE_KEY)
    }

    /// The `Z1K1` entry when it is a bare string tag.
    pub fn type_tag_str(&self) -> Option<&str> {
        self.type_tag().and_then(ZValue::as_str)
    }

    pub fn take(&mut self) -> ZValue {
        std::mem::take(self)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ZValue::String(_) => "string",
            ZValue::Array(_) => "array",
            ZValue::Object(_) => "object",
        }
    }

    /// Object constructor for literal-style call sites.
    pub fn object<I, K>(entries: I) -> ZValue
    where
        I: IntoIterator<Item = (K, ZValue)>,
        K: Into<String>,
    {
        ZValue::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

impl fmt::Display for ZValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZValue::String(s) => write!(f, "\"{s}\""),
            ZValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            ZValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{key}\": {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for ZValue {
    fn from(s: &str) -> Self {
        ZValue::String(s.to_string())
    }
}

impl From<String> for ZValue {
    fn from(s: String) -> Self {
        ZValue::String(s)
    }
}

/// Total conversion from arbitrary JSON: non-string scalars degrade to their
/// string rendering and `null` to the empty string, so malformed wire input
/// never aborts a load.
impl From<serde_json::Value> for ZValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ZValue::String(String::new()),
            serde_json::Value::Bool(b) => ZValue::String(b.to_string()),
            serde_json::Value::Number(n) => ZValue::String(n.to_string()),
            serde_json::Value::String(s) => ZValue::String(s),
            serde_json::Value::Array(items) => {
                ZValue::Array(items.into_iter().map(ZValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut entries = ZMap::with_capacity(map.len());
                for (key, value) in map {
                    entries.insert(key, ZValue::from(value));
                }
                ZValue::Object(entries)
            }
        }
    }
}

impl From<&serde_json::Value> for ZValue {
    fn from(value: &serde_json::Value) -> Self {
        value.clone().into()
    }
}

impl From<ZValue> for serde_json::Value {
    fn from(value: ZValue) -> Self {
        match value {
            ZValue::String(s) => serde_json::Value::String(s),
            ZValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            ZValue::Object(map) => {
                let mut entries = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    entries.insert(key, value.into());
                }
                serde_json::Value::Object(entries)
            }
        }
    }
}

impl From<&ZValue> for serde_json::Value {
    fn from(value: &ZValue) -> Self {
        value.clone().into()
    }
}

impl Serialize for ZValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ZValue::String(s) => serializer.serialize_str(s),
            ZValue::Array(items) => items.serialize(serializer),
            ZValue::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ZValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(ZValue::from(value))
    }
}
