use smol_str::SmolStr;

/// Table-local row address. Ids are arena indices, not business identifiers.
pub type RowId = usize;

/// A row's payload: a terminal string, or one of the two container markers.
/// The markers are enum variants, so no legal string value can collide with
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowValue {
    Terminal(String),
    Object,
    Array,
}

impl RowValue {
    pub fn terminal(value: impl Into<String>) -> Self {
        RowValue::Terminal(value.into())
    }
}

/// One entry of the flat table representation of a ZObject tree.
///
/// `key` is the field name under the parent (object case) or the stringified
/// index (array case); `None` only for a root row. `parent` is `None` for
/// roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub key: Option<SmolStr>,
    pub value: RowValue,
    pub parent: Option<RowId>,
}

impl Row {
    pub fn new(id: RowId, key: Option<SmolStr>, value: RowValue, parent: Option<RowId>) -> Self {
        Self {
            id,
            key,
            value,
            parent,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.value, RowValue::Terminal(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.value, RowValue::Object)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, RowValue::Array)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn as_terminal(&self) -> Option<&str> {
        match &self.value {
            RowValue::Terminal(value) => Some(value),
            _ => None,
        }
    }

    pub fn key_str(&self) -> Option<&str> {
        self.key.as_deref()
    }
}
