pub mod canonical;
pub mod constants;
pub mod error;
pub mod extract;
pub mod table;
pub mod types;

pub use crate::canonical::{to_canonical, to_hybrid};
pub use crate::error::Error;
pub use crate::extract::{extract_error_structure, extract_zids, ErrorNode};
pub use crate::table::{flatten, reconstruct, FlattenOptions, Table};
pub use crate::types::{Row, RowId, RowValue, ZMap, ZValue};

pub type Result<T> = std::result::Result<T, Error>;

/// Ingest a canonical-form wire value: convert it to hybrid form and flatten
/// it into a fresh table rooted at id 0.
///
/// # Examples
/// ```
/// use serde_json::json;
///
/// let wire = json!({"Z1K1": "Z2", "Z2K2": "hello"});
/// let table = zobject_table::load_canonical(&wire).unwrap();
/// assert_eq!(table.get_row(0).map(|row| row.is_object()), Some(true));
/// ```
pub fn load_canonical(value: &serde_json::Value) -> Result<Table> {
    let hybrid = to_hybrid(&ZValue::from(value));
    Table::from_value(&hybrid)
}

/// Produce the canonical-form save payload: reconstruct the tree rooted at
/// id 0 and collapse it back to canonical form. `None` when the table holds
/// no root content.
///
/// # Examples
/// ```
/// use serde_json::json;
///
/// let wire = json!({"Z1K1": "Z2", "Z2K2": "hello"});
/// let table = zobject_table::load_canonical(&wire).unwrap();
/// assert_eq!(zobject_table::save_canonical(&table), Some(wire));
/// ```
pub fn save_canonical(table: &Table) -> Option<serde_json::Value> {
    table.to_value().map(|tree| to_canonical(&tree).into())
}
