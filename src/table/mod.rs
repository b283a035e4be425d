mod flatten;
mod reconstruct;

use smallvec::SmallVec;
use smol_str::SmolStr;

pub use flatten::{flatten, FlattenOptions};
pub use reconstruct::reconstruct;

use crate::types::{Row, RowId, RowValue, ZValue};
use crate::Result;

/// The flat, session-owned representation of one or more ZObject trees.
///
/// The table owns id allocation: every insertion goes through it, so row ids
/// stay unique for the lifetime of the session without callers threading a
/// counter around. Reads never mutate.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Row>,
    next_id: RowId,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `value` into a fresh table rooted at id 0.
    pub fn from_value(value: &ZValue) -> Result<Self> {
        let rows = flatten(value, None, None, &FlattenOptions::default())?;
        let mut table = Self::new();
        table.push_rows(rows);
        Ok(table)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get_row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// The next id a flatten call against this table must start from.
    pub fn next_id(&self) -> RowId {
        self.next_id
    }

    pub fn max_id(&self) -> Option<RowId> {
        self.rows.iter().map(|row| row.id).max()
    }

    /// Ids of the direct children of `id`, in table order.
    pub fn children(&self, id: RowId) -> SmallVec<[RowId; 8]> {
        self.rows
            .iter()
            .filter(|row| row.parent == Some(id))
            .map(|row| row.id)
            .collect()
    }

    /// Atomic value setter. Returns false when no row has `id`.
    pub fn set_value(&mut self, id: RowId, value: RowValue) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.value = value;
                true
            }
            None => false,
        }
    }

    /// Atomic key setter. Returns false when no row has `id`.
    pub fn set_key(&mut self, id: RowId, key: Option<SmolStr>) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.key = key;
                true
            }
            None => false,
        }
    }

    /// Bulk-insert freshly flattened rows, advancing the id counter. A row
    /// whose id is already live replaces the existing row in place (the
    /// flattener re-emits the parent row when inserting under it).
    pub fn push_rows(&mut self, rows: Vec<Row>) {
        for row in rows {
            self.next_id = self.next_id.max(row.id + 1);
            match self.rows.iter_mut().find(|existing| existing.id == row.id) {
                Some(existing) => *existing = row,
                None => self.rows.push(row),
            }
        }
    }

    /// Remove a row together with its entire subtree. When the removed row
    /// was an array element, the remaining siblings are renumbered back to
    /// contiguous `"0"…"n-1"` keys.
    pub fn remove(&mut self, id: RowId) {
        let parent = self.get_row(id).and_then(|row| row.parent);
        self.remove_subtree(id);
        if let Some(parent) = parent {
            if self.get_row(parent).is_some_and(Row::is_array) {
                self.renumber_list(parent);
            }
        }
    }

    /// Remove all children of `id` (and their subtrees), keeping the row
    /// itself.
    pub fn remove_children(&mut self, id: RowId) {
        for child in self.children(id) {
            self.remove_subtree(child);
        }
    }

    fn remove_subtree(&mut self, id: RowId) {
        for child in self.children(id) {
            self.remove_subtree(child);
        }
        self.rows.retain(|row| row.id != id);
    }

    /// Restore contiguous stringified-index keys on the children of an array
    /// row, preserving their relative order.
    pub fn renumber_list(&mut self, parent: RowId) {
        let children = self.children(parent);
        for (index, child) in children.into_iter().enumerate() {
            if let Some(row) = self.rows.iter_mut().find(|row| row.id == child) {
                row.key = Some(flatten::index_key(index));
            }
        }
    }

    /// Sub-value injection: replace or extend the content under row `id`
    /// with `value`. Replace mode discards the row's previous children and
    /// rewrites the row in place; append mode requires an array row and adds
    /// the value as one element after the current last index. Returns false
    /// when no row has `id`.
    pub fn set_value_at(&mut self, id: RowId, value: &ZValue, append: bool) -> Result<bool> {
        let Some(target) = self.get_row(id).cloned() else {
            return Ok(false);
        };
        let rows = if append {
            let options = FlattenOptions::new()
                .with_append_to_list(true)
                .with_append_from_index(self.children(id).len());
            flatten(value, Some(&target), Some(self.next_id), &options)?
        } else {
            self.remove_children(id);
            flatten(value, Some(&target), Some(self.next_id), &FlattenOptions::default())?
        };
        self.push_rows(rows);
        Ok(true)
    }

    /// Rebuild the tree under a root row. `None` when the row is missing or
    /// an object row has no children.
    pub fn reconstruct(&self, root: RowId) -> Option<ZValue> {
        let row = self.get_row(root)?;
        match &row.value {
            RowValue::Terminal(value) => Some(ZValue::String(value.clone())),
            RowValue::Array => reconstruct(&self.rows, root, true),
            RowValue::Object => reconstruct(&self.rows, root, false),
        }
    }

    /// The table's main tree, rooted at id 0.
    pub fn to_value(&self) -> Option<ZValue> {
        self.reconstruct(0)
    }
}
