use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_datatable::datatable::CellContent;
use ratatui_datatable::datatable::ColumnSpec;
use ratatui_datatable::datatable::DataTable;
use ratatui_datatable::datatable::DataTableAction;
use ratatui_datatable::datatable::DataTableOptions;
use ratatui_datatable::input::InputEvent;
use ratatui_datatable::theme::Theme;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Task {
    id: u32,
    title: String,
    owner: &'static str,
    priority: Option<u8>,
    done: bool,
}

fn main() -> io::Result<()> {
    // Logs go to a file; stdout belongs to the terminal UI.
    let log = File::create("datatable.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
        )
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let mut table = build_table().map_err(io::Error::other)?;
    table.set_rows(sample_tasks());
    table.set_on_row_action(|action, task: &Task| {
        tracing::info!(action, id = task.id, "row action");
    });
    table.set_on_cell_action(|action, task: &Task| {
        tracing::info!(action, id = task.id, "cell action");
    });

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let res = run(&mut terminal, &Theme::default(), &mut table);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn build_table() -> Result<DataTable<Task>, ratatui_datatable::datatable::DataTableError> {
    DataTable::with_options(
        vec![
            ColumnSpec::new("id", |t: &Task| t.id)
                .header("#")
                .width(Constraint::Length(4))
                .alignment(Alignment::Right),
            ColumnSpec::new("title", |t: &Task| t.title.clone()).header("Title"),
            ColumnSpec::new("owner", |t: &Task| t.owner)
                .header("Owner")
                .width(Constraint::Length(8)),
            ColumnSpec::new("priority", |t: &Task| t.priority)
                .header("Prio")
                .width(Constraint::Length(6)),
            ColumnSpec::new("done", |t: &Task| t.done)
                .header("Done")
                .width(Constraint::Length(6))
                .cell(|ctx| {
                    if ctx.row.done {
                        CellContent::from(Line::from("yes".green()))
                    } else {
                        CellContent::from("no")
                    }
                }),
            ColumnSpec::<Task>::display("actions")
                .width(Constraint::Length(8))
                .cell(|ctx| {
                    if !ctx.actions.has_cell_handler() {
                        return CellContent::default();
                    }
                    CellContent::from(Line::from("[edit]".cyan()))
                        .on_click(ctx.actions.cell("edit"))
                })
                .with_cell_action(),
        ],
        DataTableOptions {
            page_size: 8,
            clickable_rows: true,
            selectable: true,
            title: Some("Tasks".to_string()),
            show_data_count: true,
            ..Default::default()
        },
    )
}

fn sample_tasks() -> Vec<Task> {
    const OWNERS: [&str; 4] = ["ana", "bo", "chen", "dee"];
    (1..=37)
        .map(|id| Task {
            id,
            title: format!("task number {id}"),
            owner: OWNERS[id as usize % OWNERS.len()],
            priority: (id % 5 != 0).then_some((id % 3) as u8 + 1),
            done: id % 4 == 0,
        })
        .collect()
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &mut DataTable<Task>,
) -> io::Result<()> {
    let mut status = String::from("click a row or [edit]; q quits");
    let mut table_area = Rect::default();
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("DataTable (jk rows, hl pages, Tab+s sort, Space select, Enter, q)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(1),
            );
            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);

            let buf = f.buffer_mut();
            table.render(table_area, buf, theme);
            let span = Span::styled(status.as_str(), theme.text_muted);
            buf.set_span(status_area.x, status_area.y, &span, status_area.width);
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = crossterm::event::read()?;
        if let Event::Key(key) = &event {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') => {
                    table.set_loading(!table.is_loading());
                    continue;
                }
                _ => {}
            }
        }
        let Ok(event) = InputEvent::try_from(event) else {
            continue;
        };
        match table.handle_event_in_area(table_area, event) {
            DataTableAction::RowAction { action, row } => {
                status = format!("{action} on task {}", table.rows()[row].id);
            }
            DataTableAction::CellAction {
                action,
                row,
                column,
            } => {
                status = format!("{action} ({column}) on task {}", table.rows()[row].id);
            }
            DataTableAction::PageChanged(page) => status = format!("page {}", page + 1),
            DataTableAction::SortChanged => {
                let sort: Vec<String> = table
                    .state()
                    .sort()
                    .iter()
                    .map(|s| format!("{} {}", s.column_id, s.direction.indicator()))
                    .collect();
                status = format!("sort: [{}]", sort.join(", "));
            }
            DataTableAction::SelectionChanged => {
                status = format!("{} selected", table.state().selection().len());
            }
            DataTableAction::Redraw | DataTableAction::None => {}
        }
    }
}
