//! Reference table mapping vendor item codes to GL accounts.

mod table;

pub use table::{normalize_item_code, ReferenceTable};
