//! Order-line table model and CSV loading for orderlens

pub mod loader;
pub mod record;
pub mod table;

pub use loader::load_csv;
pub use record::OrderRecord;
pub use table::OrderTable;
