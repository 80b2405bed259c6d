//! Main application logic for the terminal user interface.
//!
//! `App` is the view layer around a `TaskListController`: it turns key events
//! into controller commands and renders the resulting state after each one.
//! It holds no task data of its own beyond the ids of the rows on screen.

use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::controller::TaskListController;
use crate::error::TaskError;
use crate::fields::{DuplicatePolicy, Mode};
use crate::task::TaskId;
use crate::tui::{
    colors::{DARK_GREEN, DARK_PURPLE, DARK_RED, GOLD},
    enums::{AppState, ConfirmAction, Focus},
    input::InputField,
    utils::{centered_rect, format_age, scroll_offset},
};

/// Terminal view over a single task list.
pub struct App {
    state: AppState,
    focus: Focus,
    controller: TaskListController,
    draft: InputField,
    search: InputField,
    task_list_state: TableState,
    visible: Vec<TaskId>,
    status_message: String,
}

impl App {
    /// Create an app around an empty controller.
    pub fn new(policy: DuplicatePolicy) -> Self {
        let mut app = App {
            state: AppState::Main,
            focus: Focus::Draft,
            controller: TaskListController::new(policy),
            draft: InputField::new(),
            search: InputField::new(),
            task_list_state: TableState::default(),
            visible: Vec::new(),
            status_message: String::new(),
        };
        app.update_visible();
        app
    }

    pub fn controller(&self) -> &TaskListController {
        &self.controller
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Id of the highlighted row, if any.
    pub fn selected_task(&self) -> Option<TaskId> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied()
    }

    /// Refresh the on-screen rows from the controller, keeping the selection
    /// on the same task id when it is still visible.
    fn update_visible(&mut self) {
        let old_selected_id = self.selected_task();

        self.visible = self.controller.visible_tasks().iter().map(|t| t.id).collect();

        let new_idx = old_selected_id
            .and_then(|old| self.visible.iter().position(|&id| id == old))
            .or_else(|| {
                let prev = self.task_list_state.selected().unwrap_or(0);
                if self.visible.is_empty() {
                    None
                } else {
                    Some(prev.min(self.visible.len() - 1))
                }
            });
        self.task_list_state.select(new_idx);
    }

    /// Copy controller-owned draft back into the input after a command that
    /// changes it.
    fn sync_draft(&mut self) {
        if self.draft.value != self.controller.draft_text() {
            self.draft.set(self.controller.draft_text());
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Surface a rejected command as a blocking notice.
    fn show_error(&mut self, err: TaskError) {
        debug!(error = %err, "action rejected");
        self.state = AppState::Notice(capitalise(&err.to_string()));
    }

    fn mode_color(&self) -> Color {
        match self.controller.mode() {
            Mode::Add => DARK_GREEN,
            Mode::Edit(_) => GOLD,
        }
    }

    /// Add the draft as a new task, or save it over the task under edit.
    fn submit_draft(&mut self) {
        let (result, verb) = match self.controller.mode() {
            Mode::Add => (self.controller.add_task(), "Added"),
            Mode::Edit(_) => (self.controller.save_edit(), "Saved"),
        };
        match result {
            Ok(id) => {
                self.sync_draft();
                self.update_visible();
                self.select_task(id);
                self.set_status_message(format!("{} task {}", verb, id));
            }
            Err(e) => self.show_error(e),
        }
    }

    /// Highlight `id` if it is on screen.
    fn select_task(&mut self, id: TaskId) {
        if let Some(idx) = self.visible.iter().position(|&v| v == id) {
            self.task_list_state.select(Some(idx));
        }
    }

    fn begin_edit_selected(&mut self) {
        let Some(id) = self.selected_task() else {
            self.set_status_message("No task selected".to_string());
            return;
        };
        match self.controller.begin_edit(id) {
            Ok(()) => {
                self.sync_draft();
                self.focus = Focus::Draft;
                self.set_status_message(format!("Editing task {} - Enter to save, Esc to cancel", id));
            }
            Err(e) => self.show_error(e),
        }
    }

    fn cancel_edit(&mut self) {
        let was_editing = self.controller.editing_id().is_some();
        self.controller.cancel_edit();
        self.sync_draft();
        if was_editing {
            self.set_status_message("Edit cancelled".to_string());
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task() {
            match self.controller.toggle_complete(id) {
                Ok(done) => self.set_status_message(format!(
                    "Task {} marked {}",
                    id,
                    if done { "done" } else { "not done" }
                )),
                Err(e) => self.show_error(e),
            }
        }
    }

    fn confirm_remove_selected(&mut self) {
        if let Some(task) = self.selected_task().and_then(|id| self.controller.get(id)) {
            self.state = AppState::Confirm(ConfirmAction::Remove {
                id: task.id,
                text: task.text.clone(),
            });
        }
    }

    fn confirm_clear_all(&mut self) {
        if self.controller.is_empty() {
            self.set_status_message("Nothing to clear".to_string());
        } else {
            self.state = AppState::Confirm(ConfirmAction::ClearAll {
                count: self.controller.len(),
            });
        }
    }

    fn perform(&mut self, action: ConfirmAction) {
        self.state = AppState::Main;
        match action {
            ConfirmAction::Remove { id, .. } => match self.controller.remove_task(id) {
                Ok(task) => {
                    self.sync_draft();
                    self.update_visible();
                    self.set_status_message(format!("Deleted '{}'", task.text));
                }
                Err(e) => self.show_error(e),
            },
            ConfirmAction::ClearAll { .. } => {
                let count = self.controller.len();
                self.controller.clear_all();
                self.update_visible();
                self.set_status_message(format!("Deleted {} task(s)", count));
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.task_list_state.select(None);
            return;
        }
        let last = self.visible.len() as isize - 1;
        let next = match self.task_list_state.selected() {
            Some(current) => (current as isize + delta).clamp(0, last),
            None => 0,
        };
        self.task_list_state.select(Some(next as usize));
    }

    /// Apply a text editing key to `field`. Returns true if the content changed.
    fn edit_field(field: &mut InputField, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                field.handle_char(c);
                true
            }
            KeyCode::Backspace => {
                let before = field.value.len();
                field.handle_backspace();
                before != field.value.len()
            }
            KeyCode::Delete => {
                let before = field.value.len();
                field.handle_delete();
                before != field.value.len()
            }
            KeyCode::Left => {
                field.move_cursor_left();
                false
            }
            KeyCode::Right => {
                field.move_cursor_right();
                false
            }
            KeyCode::Home => {
                field.move_cursor_home();
                false
            }
            KeyCode::End => {
                field.move_cursor_end();
                false
            }
            _ => false,
        }
    }

    fn handle_draft_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Esc => {
                self.cancel_edit();
                self.focus = Focus::List;
            }
            KeyCode::Down => self.focus = Focus::List,
            other => {
                if Self::edit_field(&mut self.draft, other) {
                    self.controller.set_draft_text(self.draft.value.clone());
                }
            }
        }
    }

    fn handle_search_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Down => self.focus = Focus::List,
            KeyCode::Esc => {
                self.search.set("");
                self.controller.set_search_query("");
                self.update_visible();
                self.focus = Focus::List;
            }
            other => {
                if Self::edit_field(&mut self.search, other) {
                    self.controller.set_search_query(self.search.value.clone());
                    self.update_visible();
                }
            }
        }
    }

    /// Returns true if the application should quit.
    fn handle_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => {
                if !self.controller.search_query().is_empty() {
                    self.search.set("");
                    self.controller.set_search_query("");
                    self.update_visible();
                } else {
                    return true;
                }
            }
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home => self.move_selection(isize::MIN / 2),
            KeyCode::End => self.move_selection(isize::MAX / 2),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('e') => self.begin_edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.confirm_remove_selected(),
            KeyCode::Char('C') => self.confirm_clear_all(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('a') | KeyCode::Char('i') => self.focus = Focus::Draft,
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_confirm_input(&mut self, key: KeyCode, action: ConfirmAction) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.perform(action),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.state = AppState::Main,
            _ => {}
        }
    }

    /// Dispatch one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.state.clone() {
            AppState::Notice(_) => {
                self.state = AppState::Main;
                false
            }
            AppState::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
                    self.state = AppState::Main;
                }
                false
            }
            AppState::Confirm(action) => {
                self.handle_confirm_input(key.code, action);
                false
            }
            AppState::Main => {
                if matches!(key.code, KeyCode::Char(_))
                    && key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    return false;
                }
                self.clear_status_message();
                if key.code == KeyCode::Tab {
                    self.focus = self.focus.next();
                    return false;
                }
                match self.focus {
                    Focus::Draft => {
                        self.handle_draft_input(key.code);
                        false
                    }
                    Focus::Search => {
                        self.handle_search_input(key.code);
                        false
                    }
                    Focus::List => self.handle_list_input(key.code),
                }
            }
        }
    }

    /// Poll for and handle keyboard events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let counts = self.controller.counts();
        let variant = match self.controller.policy() {
            DuplicatePolicy::Allow => "duplicates allowed",
            DuplicatePolicy::Reject => "unique tasks",
        };
        let header_text = vec![Line::from(vec![
            Span::styled("TODO LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{} task(s)  {} done  {} left  ({})",
                    counts.total, counts.completed, counts.remaining, variant
                ),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect, field: &InputField, title: String, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::White).bg(DARK_PURPLE)
        } else {
            Style::default()
        };
        let inner_width = area.width.saturating_sub(2);
        let offset = scroll_offset(field.cursor, inner_width);
        let paragraph = Paragraph::new(field.value.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .scroll((0, offset));
        f.render_widget(paragraph, area);

        if focused && matches!(self.state, AppState::Main) {
            let x = (field.cursor as u16).saturating_sub(offset);
            f.set_cursor_position((area.x + 1 + x, area.y + 1));
        }
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let now = Utc::now().timestamp();
        let editing = self.controller.editing_id();

        let header_cells = ["Done", "Task", "Added"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(self.mode_color()).fg(text_color_on(self.mode_color())))
            .height(1);

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&id| self.controller.get(id))
            .map(|task| {
                let style = if Some(task.id) == editing {
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                } else if task.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    Cell::from(if task.completed { "[x]" } else { "[ ]" }),
                    Cell::from(task.text.clone()),
                    Cell::from(format_age(task.created_at_utc, now)),
                ])
                .style(style)
            })
            .collect();

        let widths = [Constraint::Length(5), Constraint::Min(20), Constraint::Length(10)];

        let list_style = if self.focus == Focus::List {
            Style::default().fg(Color::White).bg(DARK_PURPLE)
        } else {
            Style::default()
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(list_style)
                    .title(format!(
                        "Tasks ({}/{}) - Press 'h' for help",
                        self.visible.len(),
                        self.controller.len()
                    )),
            )
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(vec![Span::styled("To-Do List Help", bold)]),
            Line::from(""),
            Line::from(vec![Span::styled("Everywhere:", bold)]),
            Line::from("  Tab          Cycle focus: input, list, search"),
            Line::from("  Ctrl+C       Quit"),
            Line::from(""),
            Line::from(vec![Span::styled("Task Input:", bold)]),
            Line::from("  Enter        Add task (or save while editing)"),
            Line::from("  Esc          Cancel edit and clear input"),
            Line::from(""),
            Line::from(vec![Span::styled("Task List:", bold)]),
            Line::from("  Up/k, Down/j Navigate tasks"),
            Line::from("  Space/Enter  Toggle completion"),
            Line::from("  e            Edit selected task"),
            Line::from("  d/Delete     Delete selected task"),
            Line::from("  C            Clear all tasks"),
            Line::from("  a/i          Focus task input"),
            Line::from("  /            Search tasks"),
            Line::from("  h/?/F1       Show this help"),
            Line::from("  q/Esc        Quit (Esc clears an active search first)"),
            Line::from(""),
            Line::from(vec![Span::styled("Editing:", bold)]),
            Line::from("  Saving checks the text like adding does:"),
            Line::from("  empty text is rejected in every mode,"),
            Line::from("  duplicates only in unique mode"),
            Line::from("  Deleting the task being edited cancels the edit"),
            Line::from(""),
            Line::from(vec![Span::styled("Search:", bold)]),
            Line::from("  Enter        Back to list"),
            Line::from("  Esc          Clear search"),
        ];

        let area = centered_rect(60, 80, area);
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help - Esc to return"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_dialog(&self, f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect, action: &ConfirmAction) {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(action.describe()),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        self.render_dialog(f, area, "Confirm Action", text);
    }

    fn render_notice(&self, f: &mut Frame, area: Rect, message: &str) {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                message.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("Press any key to continue"),
        ];
        self.render_dialog(f, area, "Notice", text);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if !self.controller.search_query().is_empty() {
            format!(
                "Tasks: {} (filtered by '{}') | Press 'h' for help",
                self.visible.len(),
                self.controller.search_query()
            )
        } else {
            match self.focus {
                Focus::Draft => match self.controller.mode() {
                    Mode::Add => "Type a task, Enter to add | Tab to switch focus".to_string(),
                    Mode::Edit(id) => format!("Editing task {} | Enter to save, Esc to cancel", id),
                },
                Focus::List => format!("Tasks: {} | Press 'h' for help", self.visible.len()),
                Focus::Search => "Type to filter | Enter to return, Esc to clear".to_string(),
            }
        };

        let color = self.mode_color();
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(color).fg(text_color_on(color)))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(3), // draft
                Constraint::Length(3), // search
                Constraint::Min(0),    // list
                Constraint::Length(1), // status
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        let draft_title = match self.controller.mode() {
            Mode::Add => "Add Task".to_string(),
            Mode::Edit(id) => format!("Edit Task {}", id),
        };
        self.render_input(f, chunks[1], &self.draft, draft_title, self.focus == Focus::Draft);
        self.render_input(f, chunks[2], &self.search, "Search".to_string(), self.focus == Focus::Search);
        self.render_task_list(f, chunks[3]);
        self.render_status_bar(f, chunks[4]);

        let body = f.area();
        match &self.state {
            AppState::Main => {}
            AppState::Help => self.render_help(f, body),
            AppState::Confirm(action) => self.render_confirm(f, body, action),
            AppState::Notice(message) => self.render_notice(f, body, message),
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!(policy = ?self.controller.policy(), "terminal ui started");
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        info!(tasks = self.controller.len(), "terminal ui closed");
        Ok(())
    }

    #[cfg(test)]
    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|f| self.render(f))?;
        Ok(())
    }
}

/// Foreground that stays readable on `bg`.
fn text_color_on(bg: Color) -> Color {
    match bg {
        GOLD => Color::Rgb(20, 20, 20),
        _ => Color::White,
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App, text: &str) {
        app.focus = Focus::Draft;
        type_text(app, text);
        press(app, KeyCode::Enter);
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 48)).unwrap();
        app.draw(&mut terminal).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_typing_and_enter_adds_task() {
        let mut app = App::new(DuplicatePolicy::Reject);
        add(&mut app, "Wash car");
        assert_eq!(app.controller().len(), 1);
        assert_eq!(app.controller().draft_text(), "");
        assert!(app.draft.value.is_empty());
        assert_eq!(app.selected_task(), Some(app.controller().tasks()[0].id));
    }

    #[test]
    fn test_rejection_shows_notice_until_key() {
        let mut app = App::new(DuplicatePolicy::Reject);
        add(&mut app, "Buy milk");
        add(&mut app, "buy milk ");
        assert_eq!(app.state(), &AppState::Notice("Duplicate task".to_string()));
        assert_eq!(app.controller().len(), 1);
        assert!(screen(&mut app).contains("Duplicate task"));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state(), &AppState::Main);
        assert_eq!(app.controller().draft_text(), "buy milk ");
    }

    #[test]
    fn test_edit_flow_from_list() {
        let mut app = App::new(DuplicatePolicy::Reject);
        add(&mut app, "A");
        add(&mut app, "B");
        app.focus = Focus::List;
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.focus(), Focus::Draft);
        assert_eq!(app.draft.value, "A");
        assert!(screen(&mut app).contains("Edit Task"));

        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter);
        let texts: Vec<&str> = app.controller().tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["A2", "B"]);
        assert_eq!(app.controller().editing_id(), None);
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = App::new(DuplicatePolicy::Reject);
        add(&mut app, "A");
        app.focus = Focus::List;
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "zzz");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller().mode(), Mode::Add);
        assert_eq!(app.focus(), Focus::List);
        assert!(app.draft.value.is_empty());
        assert_eq!(app.controller().tasks()[0].text, "A");
    }

    #[test]
    fn test_toggle_delete_and_clear_with_confirm() {
        let mut app = App::new(DuplicatePolicy::Allow);
        add(&mut app, "A");
        add(&mut app, "B");
        add(&mut app, "C");
        app.focus = Focus::List;

        press(&mut app, KeyCode::Char(' '));
        let selected = app.selected_task().unwrap();
        assert!(app.controller().get(selected).unwrap().completed);

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.state(), AppState::Confirm(ConfirmAction::Remove { .. })));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.controller().len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.controller().len(), 2);
        assert!(app.controller().get(selected).is_none());
        assert!(app.selected_task().is_some());

        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Enter);
        assert!(app.controller().is_empty());
        assert_eq!(app.selected_task(), None);
    }

    #[test]
    fn test_search_filters_rows_and_keeps_selection_by_id() {
        let mut app = App::new(DuplicatePolicy::Reject);
        add(&mut app, "Wash car");
        add(&mut app, "Fix bike");
        app.focus = Focus::List;
        let bike = app.controller().tasks()[1].id;
        assert_eq!(app.selected_task(), Some(bike));

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "BIKE");
        assert_eq!(app.controller().search_query(), "BIKE");
        assert_eq!(app.visible, vec![bike]);
        assert_eq!(app.selected_task(), Some(bike));
        let rendered = screen(&mut app);
        assert!(rendered.contains("Fix bike"));
        assert!(!rendered.contains("Wash car"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller().search_query(), "");
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.selected_task(), Some(bike));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(DuplicatePolicy::Reject);
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        app.focus = Focus::List;
        assert!(press(&mut app, KeyCode::Char('q')));
        app.focus = Focus::Draft;
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.controller().draft_text(), "q");
    }

    #[test]
    fn test_control_and_alt_chords_are_not_typed() {
        let mut app = App::new(DuplicatePolicy::Reject);
        type_text(&mut app, "ab");
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(app.controller().draft_text(), "ab");
        assert_eq!(app.draft.value, "ab");

        app.handle_key(KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT));
        assert_eq!(app.controller().draft_text(), "abC");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Search);
        app.handle_key(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL));
        assert_eq!(app.controller().search_query(), "");
    }

    #[test]
    fn test_long_draft_scrolls_to_cursor() {
        let mut app = App::new(DuplicatePolicy::Reject);
        type_text(&mut app, &"x".repeat(120));
        type_text(&mut app, "END");
        let rendered = screen(&mut app);
        let draft_row = rendered.lines().nth(4).unwrap();
        assert!(draft_row.contains("END"));
        assert_eq!(draft_row.matches('x').count(), 94);

        press(&mut app, KeyCode::Home);
        type_text(&mut app, "BEGIN");
        let rendered = screen(&mut app);
        assert!(rendered.lines().nth(4).unwrap().contains("BEGIN"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = App::new(DuplicatePolicy::Reject);
        app.focus = Focus::List;
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state(), &AppState::Help);
        let rendered = screen(&mut app);
        assert!(rendered.contains("To-Do List Help"));
        assert!(rendered.contains("empty text is rejected in every mode"));
        assert!(rendered.contains("Deleting the task being edited cancels the edit"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), &AppState::Main);
    }
}
