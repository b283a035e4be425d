use smol_str::SmolStr;

use crate::error::Error;
use crate::types::{Row, RowId, RowValue, ZValue};
use crate::Result;

/// Options for [`flatten`], builder-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Wrap the value as one extra element of the (array) parent instead of
    /// replacing the parent's children.
    pub append_to_list: bool,
    /// Index key given to the appended element.
    pub append_from_index: usize,
    /// Emit the row representing the parent itself as the first output row.
    pub return_parent: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            append_to_list: false,
            append_from_index: 0,
            return_parent: true,
        }
    }
}

impl FlattenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_append_to_list(mut self, append_to_list: bool) -> Self {
        self.append_to_list = append_to_list;
        self
    }

    pub fn with_append_from_index(mut self, append_from_index: usize) -> Self {
        self.append_from_index = append_from_index;
        self
    }

    pub fn with_return_parent(mut self, return_parent: bool) -> Self {
        self.return_parent = return_parent;
        self
    }
}

/// Serialize a tree into an ordered sequence of rows, depth-first pre-order,
/// with strictly increasing ids.
///
/// Without a parent the root row takes id `starting_id` (0 by default) and
/// `key`/`parent` stay unset. With a parent, the first output row reuses the
/// parent's identity (id, key, parent pointer) and carries the new value's
/// container marker; `starting_id` is then mandatory and seeds the ids of all
/// newly created rows. Callers inserting several values in sequence must
/// carry the last used id + 1 into the next call.
pub fn flatten(
    value: &ZValue,
    parent: Option<&Row>,
    starting_id: Option<RowId>,
    options: &FlattenOptions,
) -> Result<Vec<Row>> {
    if parent.is_some() && starting_id.is_none() {
        return Err(Error::precondition(
            "cannot flatten under a parent without a starting id",
        ));
    }
    if options.append_to_list {
        let Some(parent) = parent else {
            return Err(Error::precondition(
                "cannot append to a list without a parent row",
            ));
        };
        if !parent.is_array() {
            return Err(Error::precondition(
                "append target must be an array container row",
            ));
        }
    }

    let mut flattener = Flattener::new(starting_id.unwrap_or(0));
    match parent {
        Some(parent) if options.append_to_list => {
            flattener.rows.push(parent.clone());
            let id = flattener.alloc();
            flattener.emit(
                value,
                Some(index_key(options.append_from_index)),
                Some(parent.id),
                id,
            );
        }
        Some(parent) => {
            flattener.emit(value, parent.key.clone(), parent.parent, parent.id);
        }
        None => {
            let id = flattener.alloc();
            flattener.emit(value, None, None, id);
        }
    }

    let mut rows = flattener.rows;
    if parent.is_some() && !options.return_parent {
        rows.remove(0);
    }
    Ok(rows)
}

struct Flattener {
    next: RowId,
    rows: Vec<Row>,
}

impl Flattener {
    fn new(starting_id: RowId) -> Self {
        Self {
            next: starting_id,
            rows: Vec::new(),
        }
    }

    fn alloc(&mut self) -> RowId {
        let id = self.next;
        self.next += 1;
        id
    }

    fn emit(&mut self, value: &ZValue, key: Option<SmolStr>, parent: Option<RowId>, id: RowId) {
        match value {
            ZValue::String(s) => {
                self.rows
                    .push(Row::new(id, key, RowValue::Terminal(s.clone()), parent));
            }
            ZValue::Array(items) => {
                self.rows.push(Row::new(id, key, RowValue::Array, parent));
                for (index, item) in items.iter().enumerate() {
                    let child = self.alloc();
                    self.emit(item, Some(index_key(index)), Some(id), child);
                }
            }
            ZValue::Object(map) => {
                self.rows.push(Row::new(id, key, RowValue::Object, parent));
                for (field, entry) in map {
                    let child = self.alloc();
                    self.emit(entry, Some(SmolStr::new(field)), Some(id), child);
                }
            }
        }
    }
}

pub(crate) fn index_key(index: usize) -> SmolStr {
    let mut buf = itoa::Buffer::new();
    SmolStr::new(buf.format(index))
}
