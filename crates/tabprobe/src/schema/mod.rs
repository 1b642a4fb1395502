//! Table representation: typed columns with a kind fixed at load time.

mod column;
mod table;
mod types;

pub use column::Column;
pub use table::Table;
pub use types::{Cell, CellKey, ColumnKind};
