//! Sortable, paginated data tables for ratatui.
//!
//! This crate re-exports [`ratatui_datatable_core`]; see [`datatable::DataTable`] for the widget.
//! Enable the `crossterm` feature for `TryFrom` conversions from crossterm events.
pub use ratatui_datatable_core::*;
