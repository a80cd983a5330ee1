//! `ratatui-datatable-core` is a generic data table engine for terminal UIs.
//!
//! Rows can be any Rust type. Columns describe how to pull a sortable [`datatable::CellValue`]
//! out of a row and how to draw it; the table handles sorting, pagination, column visibility,
//! row selection and click routing.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all state changes happen inside a single `&mut self` call.
//! - Cell actions win: a click on a cell that owns an action never also fires the row click.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-datatable`. Useful entry points:
//! - [`datatable::DataTable`]: the widget.
//! - [`datatable::ColumnSpec`]: column builder.
//! - [`datatable::view::derive_view`]: the sort + paginate step on its own, for custom widgets.
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui_datatable_core::datatable::{ColumnSpec, DataTable};
//! use ratatui_datatable_core::theme::Theme;
//!
//! struct Task { id: u32, title: &'static str }
//!
//! let mut table = DataTable::new(vec![
//!     ColumnSpec::new("id", |t: &Task| t.id).header("ID"),
//!     ColumnSpec::new("title", |t: &Task| t.title).header("Title"),
//! ])
//! .unwrap();
//! table.set_rows(vec![Task { id: 1, title: "write docs" }]);
//!
//! let area = Rect::new(0, 0, 30, 4);
//! let mut buf = Buffer::empty(area);
//! table.render(area, &mut buf, &Theme::default());
//! ```
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;

pub mod datatable;
pub mod input;
pub mod keymap;
