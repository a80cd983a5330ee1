use thiserror::Error;

/// Configuration errors raised while building a [`super::column::Columns`] list.
///
/// These are caller bugs: sort and visibility state are keyed by column id, so an ambiguous id
/// would silently corrupt both.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DataTableError {
    #[error("duplicate column id: {0:?}")]
    DuplicateColumnId(String),

    #[error("column #{index} has an empty id")]
    EmptyColumnId { index: usize },
}
