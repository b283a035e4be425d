use crate::types::{Row, RowId, RowValue, ZMap, ZValue};

/// Rebuild the tree rooted at `root_id` from a flat row sequence.
///
/// Only rows whose `parent` is `root_id` (and their descendants) are
/// visited, so disjoint trees in the same table reconstruct independently.
/// With no matching children the result is `None`, unless `root_is_array`
/// is set, in which case an empty-but-present list is returned.
pub fn reconstruct(rows: &[Row], root_id: RowId, root_is_array: bool) -> Option<ZValue> {
    let children: Vec<&Row> = rows
        .iter()
        .filter(|row| row.parent == Some(root_id))
        .collect();
    if children.is_empty() {
        return root_is_array.then(|| ZValue::Array(Vec::new()));
    }

    if root_is_array {
        let mut items: Vec<(usize, ZValue)> = Vec::with_capacity(children.len());
        for (position, row) in children.iter().enumerate() {
            let index = row
                .key_str()
                .and_then(|key| key.parse().ok())
                .unwrap_or(position);
            items.push((index, build(rows, row)));
        }
        items.sort_by_key(|(index, _)| *index);
        return Some(ZValue::Array(items.into_iter().map(|(_, item)| item).collect()));
    }

    let mut map = ZMap::with_capacity(children.len());
    for row in children {
        let built = build(rows, row);
        match row.key_str() {
            Some(key) => {
                map.insert(key.to_string(), built);
            }
            // A keyless child is a root row being unwrapped: its value
            // replaces the result instead of nesting inside it.
            None => return Some(built),
        }
    }
    Some(ZValue::Object(map))
}

fn build(rows: &[Row], row: &Row) -> ZValue {
    match &row.value {
        RowValue::Terminal(value) => ZValue::String(value.clone()),
        RowValue::Array => {
            reconstruct(rows, row.id, true).unwrap_or_else(|| ZValue::Array(Vec::new()))
        }
        RowValue::Object => {
            reconstruct(rows, row.id, false).unwrap_or_else(|| ZValue::Object(ZMap::new()))
        }
    }
}
