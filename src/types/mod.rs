pub mod row;
pub mod value;

pub use row::{Row, RowId, RowValue};
pub use value::{ZMap, ZValue};
