use crate::calendar::{month_grid, Navigator};
use crate::model::{TodoError, TodoId};
use crate::store::TodoStore;
use anyhow::Result;
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::Duration;

pub fn run(store: TodoStore, navigator: Navigator) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(store, navigator);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    store: TodoStore,
    navigator: Navigator,
    selected_todo: usize,
    status: String,
    mode: Mode,
}

enum Mode {
    Normal,
    Adding,
    ConfirmDelete { todo_id: TodoId },
    Picking { value: String },
}

impl App {
    fn new(store: TodoStore, navigator: Navigator) -> Self {
        let status = format!(
            "Loaded {} todos (n new, space toggle, d delete, g go to date, q quit)",
            store.items().len()
        );
        App {
            store,
            navigator,
            selected_todo: 0,
            status,
            mode: Mode::Normal,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Adding => self.handle_adding_key(key),
            Mode::ConfirmDelete { .. } => self.handle_confirm_key(key),
            Mode::Picking { .. } => self.handle_picker_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('n') => {
                self.mode = Mode::Adding;
                self.status = "New todo (Enter save, Esc cancel)".into();
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_todo_id() {
                    self.mode = Mode::ConfirmDelete { todo_id: id };
                    self.status = format!("Delete todo {}? (y to confirm, n/Esc to cancel)", id);
                } else {
                    self.status = "No todo selected to delete".into();
                }
            }
            KeyCode::Char('g') => {
                self.navigator.open_picker();
                self.mode = Mode::Picking {
                    value: self.navigator.selected().format("%Y-%m-%d").to_string(),
                };
                self.status = "Go to date (Enter confirm, Esc cancel)".into();
            }
            KeyCode::Char('t') => {
                self.navigator.select_date(chrono::Local::now().date_naive());
                self.selected_todo = 0;
                self.status = "Jumped to today".into();
            }
            KeyCode::Char('h') | KeyCode::PageUp => {
                self.navigator.previous_month();
                self.selected_todo = 0;
            }
            KeyCode::Char('l') | KeyCode::PageDown => {
                self.navigator.next_month();
                self.selected_todo = 0;
            }
            KeyCode::Left => self.shift_day(-1),
            KeyCode::Right => self.shift_day(1),
            KeyCode::Up => self.shift_day(-7),
            KeyCode::Down => self.shift_day(7),
            KeyCode::Char('k') => {
                self.selected_todo = self.selected_todo.saturating_sub(1);
            }
            KeyCode::Char('j') => {
                self.selected_todo += 1;
                self.ensure_todo_bounds();
            }
            _ => {}
        }
        false
    }

    fn handle_adding_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.store.reset_draft();
                self.mode = Mode::Normal;
                self.status = "Cancelled".into();
            }
            KeyCode::Enter => {
                let date = self.navigator.selected();
                match self.store.add_todo(date) {
                    Ok(id) => {
                        self.store.reset_draft();
                        self.mode = Mode::Normal;
                        self.selected_todo = self
                            .store
                            .items_for_date(date)
                            .len()
                            .saturating_sub(1);
                        self.status = format!("Added todo {}", id);
                    }
                    Err(TodoError::EmptyContent) => {
                        self.status = "Todo text is required".into();
                    }
                    Err(err) => {
                        // The item is committed in memory even if the write
                        // failed; keep going and report it.
                        self.store.reset_draft();
                        self.mode = Mode::Normal;
                        self.status = err.to_string();
                    }
                }
            }
            KeyCode::Backspace => self.store.draft_backspace(),
            KeyCode::Char(ch) => self.store.draft_push(ch),
            _ => {}
        }
        false
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> bool {
        let todo_id = match self.mode {
            Mode::ConfirmDelete { todo_id } => todo_id,
            _ => return false,
        };
        match key.code {
            KeyCode::Char('y') => {
                match self.store.remove_todo(todo_id) {
                    Ok(()) => self.status = format!("Removed todo {}", todo_id),
                    Err(err) => self.status = err.to_string(),
                }
                self.mode = Mode::Normal;
                self.ensure_todo_bounds();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.status = "Cancelled".into();
            }
            _ => {}
        }
        false
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.navigator.close_picker();
                self.mode = Mode::Normal;
                self.status = "Cancelled".into();
            }
            KeyCode::Enter => {
                let raw = match &self.mode {
                    Mode::Picking { value } => value.trim().to_string(),
                    _ => return false,
                };
                match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                    Ok(date) => {
                        self.navigator.confirm_picker(date);
                        self.mode = Mode::Normal;
                        self.selected_todo = 0;
                        self.status = format!("Selected {}", date.format("%Y-%m-%d"));
                    }
                    Err(_) => {
                        self.status =
                            format!("invalid date format (use YYYY-MM-DD): {}", raw);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Mode::Picking { value } = &mut self.mode {
                    value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Mode::Picking { value } = &mut self.mode {
                    value.push(ch);
                }
            }
            _ => {}
        }
        false
    }

    fn toggle_selected(&mut self) {
        let id = match self.selected_todo_id() {
            Some(id) => id,
            None => {
                self.status = "No todo selected".into();
                return;
            }
        };
        match self.store.toggle_todo(id) {
            Ok(()) => self.status = format!("Toggled todo {}", id),
            Err(err) => self.status = err.to_string(),
        }
    }

    fn shift_day(&mut self, days: i64) {
        if let Some(date) = self
            .navigator
            .selected()
            .checked_add_signed(ChronoDuration::days(days))
        {
            self.navigator.select_date(date);
            self.selected_todo = 0;
        }
    }

    fn selected_todo_id(&self) -> Option<TodoId> {
        self.store
            .items_for_date(self.navigator.selected())
            .get(self.selected_todo)
            .map(|item| item.id)
    }

    fn ensure_todo_bounds(&mut self) {
        let len = self.store.items_for_date(self.navigator.selected()).len();
        if len == 0 {
            self.selected_todo = 0;
        } else {
            self.selected_todo = self.selected_todo.min(len - 1);
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        self.ensure_todo_bounds();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(f.size());

        self.draw_title(f, chunks[0]);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        self.draw_calendar(f, main[0]);
        self.draw_todos(f, main[1]);

        self.draw_status(f, chunks[2]);

        match &self.mode {
            Mode::Adding => self.draw_input_popup(f),
            Mode::Picking { value } if self.navigator.is_picker_open() => {
                draw_picker_popup(f, value)
            }
            _ => {}
        }
    }

    fn draw_title(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                "daykeep",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                self.navigator.selected().format("%Y.%m.%d").to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!(
                    "{}/{} done",
                    self.store
                        .items()
                        .iter()
                        .filter(|todo| todo.is_success)
                        .count(),
                    self.store.items().len()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_calendar(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let selected = self.navigator.selected();
        let cells = month_grid(selected);
        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            format!("{} {}", selected.format("%B"), selected.year()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        let headings = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
        let header_spans: Vec<Span<'static>> = headings
            .iter()
            .map(|h| Span::styled(format!("{:^5}", h), Style::default().fg(Color::Gray)))
            .collect();
        lines.push(Line::from(header_spans));

        for week in cells.chunks(7) {
            let mut spans = Vec::new();
            for cell in week {
                let marker = if self.store.has_any_for_date(cell.date) {
                    "*"
                } else {
                    " "
                };
                let text = format!("{:>3}{} ", cell.date.day(), marker);
                let day_color = match cell.day_of_week {
                    0 => Color::LightRed,
                    6 => Color::LightBlue,
                    _ => Color::White,
                };
                let mut style = Style::default().fg(if cell.in_current_month {
                    day_color
                } else {
                    Color::DarkGray
                });
                if self.store.has_any_for_date(cell.date) {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if cell.date == selected {
                    style = style.bg(Color::Cyan).fg(Color::Black);
                }
                spans.push(Span::styled(text, style));
            }
            lines.push(Line::from(spans));
        }

        let block = Block::default()
            .title(Span::styled(
                "Calendar",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_todos(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let selected = self.navigator.selected();
        let todos = self.store.items_for_date(selected);
        let items = if todos.is_empty() {
            vec![ListItem::new("No todos for this date")]
        } else {
            todos
                .iter()
                .map(|todo| {
                    let mark = if todo.is_success { "[x]" } else { "[ ]" };
                    let style = if todo.is_success {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{} ", mark), Style::default().fg(Color::Green)),
                        Span::styled(todo.content.clone(), style),
                        Span::styled(
                            format!("  #{}", todo.id),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect()
        };

        let mut state = ListState::default();
        if !todos.is_empty() {
            state.select(Some(self.selected_todo));
        }

        let block = Block::default()
            .title(Span::styled(
                format!("Todos {} ({})", selected.format("%Y-%m-%d"), todos.len()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::LightCyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_status(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            self.status.clone(),
            Style::default().fg(Color::Gray),
        )));
        f.render_widget(paragraph, area);
    }

    fn draw_input_popup(&self, f: &mut ratatui::Frame<'_>) {
        let area = centered_rect(60, 20, f.size());
        let block = Block::default()
            .title(format!(
                "New todo for {}",
                self.navigator.selected().format("%Y-%m-%d")
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let text = format!("{}▌", self.store.draft());
        let paragraph = Paragraph::new(text).block(block);
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }
}

fn draw_picker_popup(f: &mut ratatui::Frame<'_>, value: &str) {
    let area = centered_rect(40, 20, f.size());
    let block = Block::default()
        .title("Go to date (YYYY-MM-DD)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(format!("{}▌", value)).block(block);
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
