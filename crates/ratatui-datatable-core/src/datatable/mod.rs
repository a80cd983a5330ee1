//! Paginated, sortable data tables over an arbitrary row type.
//!
//! A table is described by a list of [`column::ColumnSpec`]s. Everything the user can change
//! (sort, page, column visibility, selection) lives in [`state::InteractionState`], and the rows
//! on screen are always recomputed from the rows plus that state by [`view::derive_view`].
//!
//! [`table::DataTable`] ties the pieces together into a widget: it renders into a
//! [`ratatui::buffer::Buffer`] and turns input events into [`table::DataTableAction`]s.

pub mod column;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod router;
pub mod state;
pub mod table;
pub mod value;
pub mod view;

pub use column::CellContent;
pub use column::CellContext;
pub use column::ColumnMeta;
pub use column::ColumnSpec;
pub use error::DataTableError;
pub use router::ActionTarget;
pub use router::TableActions;
pub use state::SortDirection;
pub use state::SortEntry;
pub use table::DataTable;
pub use table::DataTableAction;
pub use table::DataTableBindings;
pub use table::DataTableOptions;
pub use value::CellValue;
