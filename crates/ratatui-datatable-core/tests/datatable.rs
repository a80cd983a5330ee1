use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui_datatable_core::datatable::CellContent;
use ratatui_datatable_core::datatable::ColumnSpec;
use ratatui_datatable_core::datatable::DataTable;
use ratatui_datatable_core::datatable::DataTableAction;
use ratatui_datatable_core::datatable::DataTableOptions;
use ratatui_datatable_core::datatable::SortEntry;
use ratatui_datatable_core::datatable::column::Columns;
use ratatui_datatable_core::datatable::state::InteractionState;
use ratatui_datatable_core::datatable::view::derive_view;
use ratatui_datatable_core::input::InputEvent;
use ratatui_datatable_core::input::KeyCode;
use ratatui_datatable_core::input::KeyEvent;
use ratatui_datatable_core::input::KeyModifiers;
use ratatui_datatable_core::input::MouseEvent;
use ratatui_datatable_core::input::MouseEventKind;
use ratatui_datatable_core::theme::Theme;
use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Clone, Debug)]
struct User {
    id: u32,
    name: &'static str,
}

fn users(n: u32) -> Vec<User> {
    (1..=n)
        .map(|id| User {
            id,
            name: ["ana", "bo", "chen"][id as usize % 3],
        })
        .collect()
}

fn user_columns() -> Vec<ColumnSpec<User>> {
    vec![
        ColumnSpec::new("id", |u: &User| u.id)
            .header("ID")
            .width(Constraint::Length(4)),
        ColumnSpec::new("name", |u: &User| u.name).header("Name"),
        ColumnSpec::<User>::display("link")
            .width(Constraint::Length(6))
            .cell(|ctx| CellContent::from("open").on_click(ctx.actions.cell("open"))),
        ColumnSpec::<User>::display("noop")
            .width(Constraint::Length(6))
            .cell(|_| CellContent::from("-"))
            .with_cell_action(),
        ColumnSpec::<User>::display("actions")
            .width(Constraint::Length(8))
            .cell(|ctx| {
                if ctx.actions.has_cell_handler() {
                    CellContent::from("[edit]").on_click(ctx.actions.cell("edit"))
                } else {
                    CellContent::default()
                }
            })
            .with_cell_action(),
    ]
}

fn ids<R>(table: &DataTable<R>, id: impl Fn(&R) -> u32) -> Vec<u32> {
    table.view().rows(table.rows()).map(|(_, r)| id(r)).collect()
}

fn click_cell<R: 'static>(
    table: &mut DataTable<R>,
    area: Rect,
    column_id: &str,
    line: usize,
) -> DataTableAction {
    let layout = table.layout(area);
    let col = table.columns().position(column_id).unwrap();
    let slot = layout.columns.iter().find(|s| s.column == col).unwrap();
    let row = layout.body_row(line).unwrap();
    table.handle_mouse_event(area, MouseEvent::click(slot.x, row.y))
}

fn line_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code))
}

type Log = Rc<RefCell<Vec<String>>>;

fn wire_handlers(table: &mut DataTable<User>) -> (Log, Log) {
    let rows: Log = Rc::default();
    let cells: Log = Rc::default();
    let r = rows.clone();
    table.set_on_row_action(move |action, u: &User| r.borrow_mut().push(format!("{action}:{}", u.id)));
    let c = cells.clone();
    table.set_on_cell_action(move |action, u: &User| c.borrow_mut().push(format!("{action}:{}", u.id)));
    (rows, cells)
}

#[test]
fn example_scenario_pages_sorted_rows() {
    struct Item {
        id: u32,
        name: &'static str,
    }
    let mut table = DataTable::with_options(
        vec![
            ColumnSpec::new("id", |i: &Item| i.id),
            ColumnSpec::new("name", |i: &Item| i.name),
        ],
        DataTableOptions {
            page_size: 2,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(vec![
        Item { id: 1, name: "B" },
        Item { id: 2, name: "A" },
        Item { id: 3, name: "A" },
    ]);
    table.state_mut().set_sort(vec![SortEntry::asc("name")]);

    assert_eq!(table.view().page_count, 2);
    assert_eq!(ids(&table, |i| i.id), vec![2, 3]);
    assert_eq!(table.handle_event(key(KeyCode::Right)), DataTableAction::PageChanged(1));
    assert_eq!(ids(&table, |i| i.id), vec![1]);
}

#[test]
fn pages_cover_every_row_exactly_once() {
    let columns = Columns::new(vec![ColumnSpec::new("name", |u: &User| u.name)]).unwrap();
    for total in 0..=23u32 {
        let rows = users(total);
        for page_size in 1..=7usize {
            let mut state = InteractionState::new(page_size);
            state.set_sort(vec![SortEntry::desc("name")]);
            let page_count = derive_view(&rows, &columns, &state).page_count;
            assert_eq!(page_count, (total as usize).div_ceil(page_size).max(1));

            let mut seen = Vec::new();
            for page in 0..page_count {
                state.set_page(page);
                let view = derive_view(&rows, &columns, &state);
                assert!(view.visible_rows.len() <= page_size);
                if page + 1 < page_count {
                    assert_eq!(view.visible_rows.len(), page_size);
                }
                seen.extend(view.visible_rows);
            }
            seen.sort_unstable();
            assert_eq!(seen, (0..total as usize).collect::<Vec<_>>());
        }
    }
}

#[test]
fn equal_keys_keep_source_order_and_derivation_is_deterministic() {
    let columns = Columns::new(vec![ColumnSpec::new("name", |u: &User| u.name)]).unwrap();
    let rows = users(12);
    let mut state = InteractionState::new(100);
    state.set_sort(vec![SortEntry::asc("name")]);

    let first = derive_view(&rows, &columns, &state);
    assert_eq!(first, derive_view(&rows, &columns, &state));
    for pair in first.visible_rows.windows(2) {
        let (a, b) = (&rows[pair[0]], &rows[pair[1]]);
        assert!(a.name < b.name || (a.name == b.name && pair[0] < pair[1]));
    }
}

#[test]
fn out_of_range_page_is_clamped() {
    let mut table = DataTable::with_options(
        user_columns(),
        DataTableOptions {
            page_size: 4,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(10));
    table.state_mut().set_page(99);
    let view = table.view();
    assert_eq!(view.page, 2);
    assert_eq!(view.visible_rows, vec![8, 9]);
}

#[test]
fn cell_action_suppresses_row_click() {
    let mut table = DataTable::with_options(
        user_columns(),
        DataTableOptions {
            clickable_rows: true,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(3));
    let (rows, cells) = wire_handlers(&mut table);
    let area = Rect::new(0, 0, 60, 6);

    assert_eq!(
        click_cell(&mut table, area, "actions", 1),
        DataTableAction::CellAction {
            action: "edit".into(),
            row: 1,
            column: "actions".into(),
        }
    );
    assert_eq!(*cells.borrow(), vec!["edit:2".to_string()]);
    assert!(rows.borrow().is_empty());

    assert_eq!(
        click_cell(&mut table, area, "name", 0),
        DataTableAction::RowAction {
            action: "row-click".into(),
            row: 0,
        }
    );
    assert_eq!(*rows.borrow(), vec!["row-click:1".to_string()]);
    assert_eq!(cells.borrow().len(), 1);
}

#[test]
fn action_column_without_declared_action_fires_nothing() {
    let mut table = DataTable::with_options(
        user_columns(),
        DataTableOptions {
            clickable_rows: true,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(3));
    let (rows, cells) = wire_handlers(&mut table);
    let area = Rect::new(0, 0, 60, 6);

    assert_eq!(click_cell(&mut table, area, "noop", 2), DataTableAction::None);
    assert!(rows.borrow().is_empty());
    assert!(cells.borrow().is_empty());
}

#[test]
fn actions_on_plain_columns_become_row_clicks() {
    let mut table = DataTable::with_options(
        user_columns(),
        DataTableOptions {
            clickable_rows: true,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(3));
    let (rows, cells) = wire_handlers(&mut table);
    let area = Rect::new(0, 0, 60, 6);

    click_cell(&mut table, area, "link", 0);
    assert_eq!(*rows.borrow(), vec!["row-click:1".to_string()]);
    assert!(cells.borrow().is_empty());
}

#[test]
fn rows_without_handler_show_no_affordance() {
    let mut table = DataTable::with_options(
        user_columns(),
        DataTableOptions {
            clickable_rows: true,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(3));
    let area = Rect::new(0, 0, 60, 6);
    let reversed = |table: &mut DataTable<User>| {
        let mut buf = Buffer::empty(area);
        table.render(area, &mut buf, &Theme::default());
        (0..area.height).any(|y| {
            (0..area.width).any(|x| buf[(x, y)].modifier.contains(Modifier::REVERSED))
        })
    };

    assert_eq!(click_cell(&mut table, area, "name", 0), DataTableAction::None);
    assert_eq!(table.handle_event(key(KeyCode::Down)), DataTableAction::None);
    assert!(!reversed(&mut table));

    table.set_on_row_action(|_, _| {});
    assert!(matches!(
        click_cell(&mut table, area, "name", 0),
        DataTableAction::RowAction { .. }
    ));
    assert!(reversed(&mut table));
}

#[test]
fn loading_never_touches_rows() {
    struct Bomb;
    let mut table = DataTable::new(vec![
        ColumnSpec::new("boom", |_: &Bomb| -> i64 { panic!("accessor called while loading") }),
        ColumnSpec::<Bomb>::display("render")
            .cell(|_| panic!("renderer called while loading"))
            .with_cell_action(),
    ])
    .unwrap();
    table.set_rows((0..30).map(|_| Bomb).collect());
    table.state_mut().set_sort(vec![SortEntry::asc("boom")]);
    table.set_on_row_action(|_, _| {});
    table.set_loading(true);

    let area = Rect::new(0, 0, 30, 10);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());

    let skeleton_lines = (0..area.height)
        .filter(|&y| line_text(&buf, y).contains('░'))
        .count();
    assert_eq!(skeleton_lines, 1 + 4);

    let layout = table.layout(area);
    assert!(layout.footer.is_none());
    let body = layout.body;
    for event in [
        InputEvent::Mouse(MouseEvent::click(1, body.y)),
        key(KeyCode::Down),
        key(KeyCode::Enter),
        key(KeyCode::Right),
    ] {
        assert_eq!(table.handle_event_in_area(area, event), DataTableAction::None);
    }
}

#[test]
fn footer_controls_respect_bounds() {
    let mut table = DataTable::new(user_columns()).unwrap();
    table.set_rows(users(25));
    let area = Rect::new(0, 0, 60, 14);

    let layout = table.layout(area);
    let prev = layout.prev_button.unwrap();
    let next = layout.next_button.unwrap();

    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    assert!(line_text(&buf, 13).starts_with("Page 1 of 3"));
    assert_eq!(buf[(prev.x + 1, prev.y)].fg, Color::DarkGray);
    assert_eq!(buf[(next.x + 1, next.y)].fg, Color::Cyan);

    assert_eq!(
        table.handle_mouse_event(area, MouseEvent::click(prev.x, prev.y)),
        DataTableAction::None
    );
    assert_eq!(table.state().page(), 0);
    assert_eq!(
        table.handle_mouse_event(area, MouseEvent::click(next.x, next.y)),
        DataTableAction::PageChanged(1)
    );
    table.handle_mouse_event(area, MouseEvent::click(next.x, next.y));
    assert_eq!(
        table.handle_mouse_event(area, MouseEvent::click(next.x, next.y)),
        DataTableAction::None
    );
    assert_eq!(table.view().page, 2);

    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    assert!(line_text(&buf, 13).starts_with("Page 3 of 3"));
}

#[test]
fn single_page_hides_footer_until_selection() {
    let mut table = DataTable::with_options(
        user_columns(),
        DataTableOptions {
            selectable: true,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(4));
    let area = Rect::new(0, 0, 60, 8);
    assert!(table.layout(area).footer.is_none());

    table.state_mut().select_row(2);
    let footer = table.layout(area).footer.unwrap();
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    assert!(line_text(&buf, footer.y).starts_with("1 row(s) out of 4"));
}

#[test]
fn header_clicks_sort_and_shift_adds_keys() {
    let mut table = DataTable::new(user_columns()).unwrap();
    table.set_rows(users(6));
    let area = Rect::new(0, 0, 60, 10);
    let layout = table.layout(area);
    let header = layout.header.unwrap();
    let slot_x = |id: &str| {
        let col = table.columns().position(id).unwrap();
        layout.columns.iter().find(|s| s.column == col).unwrap().x
    };
    let (name_x, id_x, link_x) = (slot_x("name"), slot_x("id"), slot_x("link"));

    assert_eq!(
        table.handle_mouse_event(area, MouseEvent::click(name_x, header.y)),
        DataTableAction::SortChanged
    );
    let shift_click = MouseEvent::click(id_x, header.y).with_modifiers(KeyModifiers::shift());
    assert_eq!(table.handle_mouse_event(area, shift_click), DataTableAction::SortChanged);
    assert_eq!(table.handle_mouse_event(area, shift_click), DataTableAction::SortChanged);
    assert_eq!(
        table.state().sort(),
        &[SortEntry::asc("name"), SortEntry::desc("id")]
    );
    assert_eq!(ids(&table, |u| u.id), vec![6, 3, 4, 1, 5, 2]);

    // Display columns only take focus.
    let before = table.state().sort().to_vec();
    table.handle_mouse_event(area, MouseEvent::click(link_x, header.y));
    assert_eq!(table.state().sort(), before.as_slice());
    assert_eq!(table.focused_column(), Some("link"));

    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    assert!(line_text(&buf, header.y).contains("Name ↑1"));
}

#[test]
fn scroll_wheel_pages_and_outside_events_are_ignored() {
    let mut table = DataTable::new(user_columns()).unwrap();
    table.set_rows(users(25));
    let area = Rect::new(5, 5, 60, 14);
    let scroll = |kind| MouseEvent {
        x: 6,
        y: 8,
        kind,
        modifiers: KeyModifiers::none(),
    };

    assert_eq!(
        table.handle_mouse_event(area, scroll(MouseEventKind::ScrollDown)),
        DataTableAction::PageChanged(1)
    );
    assert_eq!(
        table.handle_mouse_event(area, scroll(MouseEventKind::ScrollUp)),
        DataTableAction::PageChanged(0)
    );
    assert_eq!(
        table.handle_mouse_event(area, MouseEvent::click(0, 0)),
        DataTableAction::None
    );
}

#[test]
fn hidden_columns_are_not_drawn_or_clickable() {
    let mut table = DataTable::new(user_columns()).unwrap();
    table.set_rows(users(2));
    table.state_mut().set_column_visibility("id", false);
    let area = Rect::new(0, 0, 60, 4);
    let layout = table.layout(area);
    assert!(layout.columns.iter().all(|s| s.column != 0));

    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    assert!(line_text(&buf, 0).starts_with("Name"));
}

#[test]
fn null_values_render_placeholder() {
    struct Score {
        value: Option<i32>,
    }
    let mut table = DataTable::new(vec![ColumnSpec::new("value", |s: &Score| s.value)]).unwrap();
    table.set_rows(vec![Score { value: Some(3) }, Score { value: None }]);
    let area = Rect::new(0, 0, 10, 3);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf, &Theme::default());
    assert!(line_text(&buf, 1).starts_with('3'));
    assert!(line_text(&buf, 2).starts_with('—'));
}

#[test]
fn duplicate_column_ids_are_rejected() {
    let err = DataTable::new(vec![
        ColumnSpec::new("id", |u: &User| u.id),
        ColumnSpec::new("id", |u: &User| u.name),
    ])
    .unwrap_err();
    assert_eq!(err.to_string(), "duplicate column id: \"id\"");

    let mut table = DataTable::new(user_columns()).unwrap();
    assert!(table.set_columns(vec![ColumnSpec::<User>::display("")]).is_err());
    assert_eq!(table.columns().len(), 5);
}

#[test]
fn every_row_on_a_tall_page_is_reachable_in_a_short_body() {
    let mut table = DataTable::with_options(
        vec![ColumnSpec::new("id", |u: &User| u.id).header("ID")],
        DataTableOptions {
            clickable_rows: true,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(10));
    let (rows, _) = wire_handlers(&mut table);
    let area = Rect::new(0, 0, 10, 4);
    let drawn_ids = |table: &mut DataTable<User>| {
        let mut buf = Buffer::empty(area);
        table.render(area, &mut buf, &Theme::default());
        (1..area.height)
            .map(|y| line_text(&buf, y))
            .map(|line| line.split_whitespace().next().unwrap_or("").to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(table.view().page_count, 1);
    let mut seen: HashSet<String> = drawn_ids(&mut table).into_iter().collect();
    for _ in 0..10 {
        table.handle_event(key(KeyCode::Down));
        seen.extend(drawn_ids(&mut table));
    }
    let expected: HashSet<String> = (1..=10).map(|id| id.to_string()).collect();
    assert_eq!(seen, expected);

    assert_eq!(table.cursor(), Some(9));
    assert_eq!(drawn_ids(&mut table), vec!["8", "9", "10"]);
    assert_eq!(
        table.handle_event(key(KeyCode::Enter)),
        DataTableAction::RowAction {
            action: "row-click".into(),
            row: 9,
        }
    );

    // Hit-testing follows the scrolled body.
    let body = table.layout(area).body;
    assert_eq!(
        table.handle_mouse_event(area, MouseEvent::click(0, body.y)),
        DataTableAction::RowAction {
            action: "row-click".into(),
            row: 7,
        }
    );
    assert_eq!(
        *rows.borrow(),
        vec!["row-click:10".to_string(), "row-click:8".to_string()]
    );
}

#[test]
fn wheel_scrolls_an_overflowing_page_before_paging() {
    let mut table = DataTable::with_options(
        vec![ColumnSpec::new("id", |u: &User| u.id).header("ID")],
        DataTableOptions {
            page_size: 5,
            ..Default::default()
        },
    )
    .unwrap();
    table.set_rows(users(10));
    let area = Rect::new(0, 0, 10, 5);
    let wheel = |kind| MouseEvent {
        x: 1,
        y: 2,
        kind,
        modifiers: KeyModifiers::none(),
    };

    // Header, three body lines, footer: two page rows are below the fold.
    assert_eq!(table.layout(area).body.height, 3);
    for _ in 0..2 {
        assert_eq!(
            table.handle_mouse_event(area, wheel(MouseEventKind::ScrollDown)),
            DataTableAction::Redraw
        );
    }
    assert_eq!(table.scroll_offset(), 2);
    assert_eq!(
        table.handle_mouse_event(area, wheel(MouseEventKind::ScrollDown)),
        DataTableAction::PageChanged(1)
    );
    assert_eq!(table.scroll_offset(), 0);
    assert_eq!(
        table.handle_mouse_event(area, wheel(MouseEventKind::ScrollUp)),
        DataTableAction::PageChanged(0)
    );
}

#[test]
fn set_options_rebases_page_and_visibility() {
    let mut table = DataTable::new(user_columns()).unwrap();
    table.set_rows(users(25));
    table.state_mut().set_page(2);
    assert_eq!(ids(&table, |u| u.id), (21..=25).collect::<Vec<_>>());

    table.set_options(DataTableOptions {
        page_size: 5,
        column_visibility: HashMap::from([("name".to_string(), false)]),
        ..Default::default()
    });

    assert_eq!(table.state().page_size(), 5);
    assert_eq!(table.view().page, 4);
    assert_eq!(table.view().page_count, 5);
    assert_eq!(ids(&table, |u| u.id), (21..=25).collect::<Vec<_>>());

    let area = Rect::new(0, 0, 60, 8);
    let name = table.columns().position("name").unwrap();
    assert!(table.layout(area).columns.iter().all(|s| s.column != name));
    assert!(!table.state().is_column_visible("name"));
    assert!(table.state().is_column_visible("id"));
}
