//! Click routing: deciding whether a click is a row action, a cell action, or nothing.
//!
//! Terminal UIs have no event bubbling, so the "cell swallows the click before the row sees it"
//! behavior is an explicit decision made from static column metadata ([`route_click`]) rather
//! than a side effect of event propagation.

use super::column::ColumnSpec;
use std::fmt;

/// Action name sent to the row handler for the built-in row-click gesture.
pub const ROW_CLICK: &str = "row-click";

/// Which handler a cell's click should reach, and with what action name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionTarget {
    Row(String),
    Cell(String),
}

impl ActionTarget {
    pub fn name(&self) -> &str {
        match self {
            ActionTarget::Row(name) | ActionTarget::Cell(name) => name,
        }
    }
}

/// Handle given to cell renderers through [`super::column::CellContext`].
///
/// It reports which handlers the table has and builds [`ActionTarget`]s to attach to rendered
/// content; the table resolves them when the cell is clicked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableActions {
    has_row_handler: bool,
    has_cell_handler: bool,
}

impl TableActions {
    pub fn new(has_row_handler: bool, has_cell_handler: bool) -> Self {
        Self {
            has_row_handler,
            has_cell_handler,
        }
    }

    pub fn has_row_handler(&self) -> bool {
        self.has_row_handler
    }

    pub fn has_cell_handler(&self) -> bool {
        self.has_cell_handler
    }

    pub fn row(&self, action: impl Into<String>) -> ActionTarget {
        ActionTarget::Row(action.into())
    }

    pub fn cell(&self, action: impl Into<String>) -> ActionTarget {
        ActionTarget::Cell(action.into())
    }
}

/// Table-level settings that decide whether plain clicks become row clicks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowClickPolicy {
    pub clickable_rows: bool,
    pub has_row_handler: bool,
}

impl RowClickPolicy {
    pub fn rows_interactive(&self) -> bool {
        self.clickable_rows && self.has_row_handler
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickRoute {
    /// The cell handles the click with this action.
    Action(ActionTarget),
    /// The cell owns the click but declared no action; nothing fires.
    Consumed,
    /// Fire [`ROW_CLICK`] on the row handler.
    RowClick,
    Ignored,
}

/// Routes a click on a cell of `column`.
///
/// `declared` is the action attached to the rendered cell content, if any. It is honored only
/// when the column intercepts clicks (see [`ColumnSpec::intercepts_clicks`]); in every other
/// column a click anywhere in the cell is a row click.
pub fn route_click<R>(
    column: &ColumnSpec<R>,
    declared: Option<ActionTarget>,
    policy: RowClickPolicy,
) -> ClickRoute {
    if column.intercepts_clicks() {
        return match declared {
            Some(target) => ClickRoute::Action(target),
            None => ClickRoute::Consumed,
        };
    }
    if let Some(target) = declared {
        tracing::trace!(column = column.id(), ?target, "ignoring action on non-action column");
    }
    if policy.rows_interactive() {
        ClickRoute::RowClick
    } else {
        ClickRoute::Ignored
    }
}

pub type ActionSink<R> = Box<dyn FnMut(&str, &R)>;

/// The optional row and cell handlers of one table.
pub struct ActionSinks<R> {
    on_row_action: Option<ActionSink<R>>,
    on_cell_action: Option<ActionSink<R>>,
}

impl<R> Default for ActionSinks<R> {
    fn default() -> Self {
        Self {
            on_row_action: None,
            on_cell_action: None,
        }
    }
}

impl<R> ActionSinks<R> {
    pub fn set_on_row_action(&mut self, sink: Option<ActionSink<R>>) {
        self.on_row_action = sink;
    }

    pub fn set_on_cell_action(&mut self, sink: Option<ActionSink<R>>) {
        self.on_cell_action = sink;
    }

    pub fn has_row_handler(&self) -> bool {
        self.on_row_action.is_some()
    }

    pub fn has_cell_handler(&self) -> bool {
        self.on_cell_action.is_some()
    }

    pub fn table_actions(&self) -> TableActions {
        TableActions::new(self.has_row_handler(), self.has_cell_handler())
    }

    /// Sends `target` to its handler. Returns `false` if no handler is registered.
    pub fn dispatch(&mut self, target: &ActionTarget, row: &R) -> bool {
        let (sink, kind) = match target {
            ActionTarget::Row(_) => (self.on_row_action.as_mut(), "row"),
            ActionTarget::Cell(_) => (self.on_cell_action.as_mut(), "cell"),
        };
        let Some(sink) = sink else {
            tracing::trace!(kind, action = target.name(), "no handler registered");
            return false;
        };
        tracing::debug!(kind, action = target.name(), "dispatching action");
        sink(target.name(), row);
        true
    }
}

impl<R> fmt::Debug for ActionSinks<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSinks")
            .field("on_row_action", &self.has_row_handler())
            .field("on_cell_action", &self.has_cell_handler())
            .finish()
    }
}
