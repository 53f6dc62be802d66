//! Record table building blocks.
//!
//! - `animal_table` - search, sort, pagination and row rendering
//! - `data_table` - column and filter layout of a table
//! - `modal` - add/edit dialog and delete confirmation state

pub mod animal_table;
pub mod data_table;
pub mod modal;

pub use animal_table::{
    Badge, KindFilter, PAGE_SIZE, SortDirection, SortField, TableRow, TableState, TableView,
};
pub use data_table::{DataTableConfig, animals_table_config};
pub use modal::{DeleteConfirm, EditorModal};
