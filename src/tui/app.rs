//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which drives a `TaskService` from
//! key presses, renders the pending and finished task views, and hosts the
//! add-task form, help screen and delete confirmation.

use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::fields::{priority_label, StoreOrder};
use crate::render::format_deadline;
use crate::service::TaskService;
use crate::task::{TaskCode, TaskRecord};
use crate::tui::{
    colors::{priority_color, DARK_RED},
    enums::{AppState, InputMode},
    task_form::{TaskForm, FIELD_LABELS},
    utils::centered_rect,
};

/// TUI state over one task service.
pub struct App<'a> {
    service: &'a mut TaskService,
    state: AppState,
    input_mode: InputMode,
    task_list_state: TableState,
    task_form: TaskForm,
    filter_text: String,
    category_filter: String,
    status_message: String,
    pending_delete: Option<TaskCode>,
    today: NaiveDate,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(service: &'a mut TaskService) -> Self {
        let today = Local::now().date_naive();
        let mut app = App {
            service,
            state: AppState::TaskList,
            input_mode: InputMode::None,
            task_list_state: TableState::default(),
            task_form: TaskForm::new(today),
            filter_text: String::new(),
            category_filter: String::new(),
            status_message: String::new(),
            pending_delete: None,
            today,
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    /// Tasks shown in the list: the category filter narrows first, then the
    /// search keyword applies within it.
    fn visible_tasks(&self) -> Vec<&TaskRecord> {
        let base: Vec<&TaskRecord> = if self.category_filter.is_empty() {
            self.service.store().iter().collect()
        } else {
            self.service
                .filter_by_category(&self.category_filter)
                .unwrap_or_default()
        };
        if self.filter_text.is_empty() {
            base
        } else {
            base.into_iter()
                .filter(|t| t.matches(&self.filter_text))
                .collect()
        }
    }

    fn is_filtered(&self) -> bool {
        !self.filter_text.is_empty() || !self.category_filter.is_empty()
    }

    fn selected_code(&self) -> Option<TaskCode> {
        let index = self.task_list_state.selected()?;
        self.visible_tasks().get(index).map(|t| t.code)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        let selected = match (len, self.task_list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.task_list_state.select(selected);
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.visible_tasks().len();
        if len == 0 {
            return;
        }
        let current = self.task_list_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.task_list_state.select(Some(next));
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Dispatch one key press to the handler for the current screen.
    pub fn handle_key(&mut self, key: KeyCode) {
        self.status_message.clear();
        match self.state {
            AppState::TaskList => match self.input_mode {
                InputMode::Search | InputMode::Category => self.handle_filter_input(key),
                InputMode::None => self.handle_task_list_input(key),
            },
            AppState::Completed => self.handle_completed_input(key),
            AppState::AddTask => self.handle_form_input(key),
            AppState::Help => self.state = AppState::TaskList,
            AppState::Confirm => self.handle_confirm_input(key),
        }
        self.clamp_selection();
    }

    fn handle_task_list_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('a') => {
                self.task_form = TaskForm::new(self.today);
                self.state = AppState::AddTask;
            }
            KeyCode::Char('d') => match self.selected_code() {
                Some(code) => {
                    self.pending_delete = Some(code);
                    self.state = AppState::Confirm;
                }
                None => self.set_status_message("No task selected".to_string()),
            },
            KeyCode::Char('f') => {
                if let Some(code) = self.selected_code() {
                    let msg = match self.service.finish(code) {
                        Ok(done) => format!("Finished \"{}\"", done.name),
                        Err(e) => e.to_string(),
                    };
                    self.set_status_message(msg);
                }
            }
            KeyCode::Char('r') => {
                let msg = match self.service.redo() {
                    Ok(task) => format!("Restored \"{}\" as task {}", task.name, task.code),
                    Err(e) => e.to_string(),
                };
                self.set_status_message(msg);
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                self.task_list_state.select(Some(0));
            }
            KeyCode::Char('g') => {
                self.input_mode = InputMode::Category;
                self.task_list_state.select(Some(0));
            }
            KeyCode::Char('n') => {
                self.service.sort_by_name();
                self.set_status_message("Sorted by name".to_string());
            }
            KeyCode::Char('p') => {
                self.service.sort_by_priority();
                self.set_status_message("Sorted by priority".to_string());
            }
            KeyCode::Char('t') => {
                self.service.sort_by_deadline();
                self.set_status_message("Sorted by deadline".to_string());
            }
            KeyCode::Char('c') => self.state = AppState::Completed,
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Esc if self.is_filtered() => {
                self.filter_text.clear();
                self.category_filter.clear();
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_filter_input(&mut self, key: KeyCode) {
        let buffer = match self.input_mode {
            InputMode::Category => &mut self.category_filter,
            _ => &mut self.filter_text,
        };
        match key {
            KeyCode::Enter => self.input_mode = InputMode::None,
            KeyCode::Esc => {
                buffer.clear();
                self.input_mode = InputMode::None;
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    fn handle_completed_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q')) {
            self.state = AppState::TaskList;
        }
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::TaskList,
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.current_mut().move_cursor_left(),
            KeyCode::Right => self.task_form.current_mut().move_cursor_right(),
            KeyCode::Backspace => self.task_form.current_mut().handle_backspace(),
            KeyCode::Delete => self.task_form.current_mut().handle_delete(),
            KeyCode::Char(c) => self.task_form.current_mut().handle_char(c),
            KeyCode::Enter => match self.task_form.parse() {
                Ok(draft) => {
                    let code = self.service.add(
                        draft.name.as_str(),
                        draft.priority,
                        draft.deadline,
                        draft.category,
                    );
                    self.set_status_message(format!("Added \"{}\" as task {code}", draft.name));
                    self.state = AppState::TaskList;
                }
                Err(e) => self.set_status_message(e.to_string()),
            },
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(code) = self.pending_delete.take() {
                    let msg = match self.service.delete(code) {
                        Ok(_) => format!("Deleted task {code}, press 'r' to redo"),
                        Err(e) => e.to_string(),
                    };
                    self.set_status_message(msg);
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    /// Wait briefly for a key press and handle it.
    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let order = match self.service.store().order() {
            StoreOrder::Priority => "priority",
            StoreOrder::Deadline => "deadline",
            StoreOrder::Name => "name",
        };
        let context = format!(
            "Pending: {}  Finished: {}  Redo: {}  Order: {}",
            self.service.store().len(),
            self.service.completed().len(),
            self.service.recovery().len(),
            order
        );
        let header_text = vec![Line::from(vec![
            Span::styled("TASK STACK", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                context,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        self.render_header(f, chunks[0]);

        let header_cells = ["Code", "Name", "Priority", "Deadline", "Category"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .height(1);

        let tasks = self.visible_tasks();
        let total = self.service.store().len();
        let rows: Vec<Row> = tasks
            .iter()
            .map(|task| {
                let overdue = task.deadline.as_date().is_some_and(|d| d < self.today);
                let deadline_style = if overdue {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(task.code.to_string()),
                    Cell::from(task.name.clone()),
                    Cell::from(format!("{} {}", task.priority, priority_label(task.priority))),
                    Cell::from(format_deadline(&task.deadline)).style(deadline_style),
                    Cell::from(task.category.clone()),
                ])
                .style(Style::default().fg(priority_color(task.priority)))
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(20),
            Constraint::Length(16),
        ];

        let title = match (self.filter_text.is_empty(), self.category_filter.is_empty()) {
            (true, true) => format!("Tasks ({total}) - Press 'h' for help"),
            (false, true) => format!("Tasks ({}/{total}) matching '{}'", tasks.len(), self.filter_text),
            (true, false) => format!("Tasks ({}/{total}) in '{}'", tasks.len(), self.category_filter),
            (false, false) => format!(
                "Tasks ({}/{total}) in '{}' matching '{}'",
                tasks.len(),
                self.category_filter,
                self.filter_text
            ),
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);
    }

    fn render_completed(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        self.render_header(f, chunks[0]);

        let items: Vec<ListItem> = self
            .service
            .completed()
            .iter()
            .map(|done| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("  {} ", done.name)),
                    Span::styled(
                        format!("[priority: {}]", done.priority),
                        Style::default().fg(priority_color(done.priority)),
                    ),
                ]))
            })
            .collect();
        let title = if items.is_empty() {
            "Finished Tasks - none yet".to_string()
        } else {
            format!("Finished Tasks ({})", items.len())
        };
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(list, chunks[1]);
    }

    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 60, area);
        f.render_widget(Clear, area);

        let outer = Block::default().borders(Borders::ALL).title("Add Task");
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        for (i, (field, label)) in self.task_form.fields.iter().zip(FIELD_LABELS).enumerate() {
            let border = if field.active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let input = Paragraph::new(field.value.as_str())
                .block(Block::default().borders(Borders::ALL).title(label).border_style(border));
            f.render_widget(input, chunks[i]);

            if field.active {
                let offset = u16::try_from(field.cursor).unwrap_or(u16::MAX);
                let max_x = chunks[i].x.saturating_add(chunks[i].width.saturating_sub(2));
                let cursor_x = chunks[i].x.saturating_add(offset).saturating_add(1).min(max_x);
                f.set_cursor_position((cursor_x, chunks[i].y + 1));
            }
        }

        let hint = Paragraph::new("Tab/↑↓ switch field, Enter to add, Esc to cancel")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, chunks[4]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let keys = [
            ("↑/k ↓/j", "Move selection"),
            ("a", "Add task"),
            ("d", "Delete selected task"),
            ("f", "Finish selected task"),
            ("r", "Redo last deleted task"),
            ("/", "Search name and category"),
            ("p", "Sort by priority"),
            ("t", "Sort by deadline"),
            ("n", "Sort by name"),
            ("g", "Filter by exact category"),
            ("c", "Show finished tasks"),
            ("q / Esc", "Quit"),
        ];
        let mut text = vec![Line::from("")];
        for (key, action) in keys {
            text.push(Line::from(vec![
                Span::styled(format!("{key:>10}  "), Style::default().fg(Color::Yellow)),
                Span::raw(action),
            ]));
        }
        text.push(Line::from(""));
        text.push(Line::from("Restored tasks get a new code, 1 Januari 2025 and category General."));
        text.push(Line::from(""));
        text.push(Line::from("Press any key to return"));

        let help = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });
        f.render_widget(help, centered_rect(70, 70, area));
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let target = self
            .pending_delete
            .and_then(|code| self.service.store().get(code))
            .map(|t| format!("Delete task {} \"{}\"", t.code, t.name))
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(target),
            Line::from(""),
            Line::from("Only the name and priority can be restored."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.input_mode == InputMode::Search {
            format!("Search: {} (Esc to clear, Enter to confirm)", self.filter_text)
        } else if self.input_mode == InputMode::Category {
            format!("Category: {} (Esc to clear, Enter to confirm)", self.category_filter)
        } else {
            match self.state {
                AppState::TaskList => "a add | d delete | f finish | r redo | / search | g category | h help".to_string(),
                AppState::Completed => "Finished tasks - Esc to go back".to_string(),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::Completed => self.render_completed(f, chunks[0]),
            AppState::AddTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0]);
            }
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;
            self.handle_input()?;
        }
        Ok(())
    }
}
