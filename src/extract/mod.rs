pub mod errors;
pub mod zids;

pub use errors::{extract_error_structure, ErrorNode};
pub use zids::extract_zids;
