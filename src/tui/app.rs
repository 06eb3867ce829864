use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{prelude::*, widgets::*};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

use crate::board::ColumnKey;
use crate::config::{GlobalConfig, ThemeConfig};
use crate::dnd::{DndContext, DndEvent, PointerInput};
use crate::ids::{IdGenerator, UuidGenerator};

use super::board::BoardState;
use super::input::{byte_index, word_boundary_left, word_boundary_right, InputMode};
use super::terminal::{self, AppTerminal};
use super::widgets::{hex_to_color, ClickMap, Control, DropZone, Item, CARD_HEIGHT};

const INPUT_PLACEHOLDER: &str = "New Task";
const ADD_BUTTON_WIDTH: u16 = 9;

/// Build footer help text based on current UI state
fn build_footer_text(input_mode: InputMode, dragging: bool) -> String {
    if dragging {
        return " Drop on a card or a column...  [Esc] cancel drag ".to_string();
    }
    match input_mode {
        InputMode::Normal => {
            " [a] add  [x] del  [h/j/k/l] navigate  [H/L] move  [J/K] reorder  [mouse] drag  [q] quit "
                .to_string()
        }
        InputMode::InputTitle => " Type a task title... [Enter] add  [Esc] back to board ".to_string(),
    }
}

/// Application state (separate from terminal for borrow checker)
struct AppState {
    should_quit: bool,
    board: BoardState,
    input_mode: InputMode,
    input_buffer: String,
    input_cursor: usize, // Cursor position in input_buffer, in chars
    dnd: DndContext,
    clicks: ClickMap,
    theme: ThemeConfig,
}

impl AppState {
    fn new(config: &GlobalConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            should_quit: false,
            board: BoardState::with_ids(ids),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_cursor: 0,
            dnd: DndContext::new(config.drag.activation_distance, config.drag.collision),
            clicks: ClickMap::default(),
            theme: config.theme.clone(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // A drag in progress owns the keyboard until it ends
        if self.dnd.is_dragging() {
            if key.code == KeyCode::Esc {
                self.dnd.cancel();
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::InputTitle => self.handle_title_input(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::Left => self.board.move_left(),
            KeyCode::Char('l') | KeyCode::Right => self.board.move_right(),
            KeyCode::Char('j') | KeyCode::Down => self.board.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.board.move_up(),
            KeyCode::Char('H') => {
                self.board.move_selected_left();
            }
            KeyCode::Char('L') => {
                self.board.move_selected_right();
            }
            KeyCode::Char('K') => {
                self.board.move_selected_up();
            }
            KeyCode::Char('J') => {
                self.board.move_selected_down();
            }
            KeyCode::Char('a') | KeyCode::Char('o') | KeyCode::Char('i') => {
                self.input_mode = InputMode::InputTitle;
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                self.board.delete_selected();
            }
            _ => {}
        }
    }

    fn handle_title_input(&mut self, key: KeyEvent) {
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);
        let len = self.input_buffer.chars().count();
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => self.submit_input(),
            KeyCode::Left if has_alt => {
                self.input_cursor = word_boundary_left(&self.input_buffer, self.input_cursor);
            }
            KeyCode::Right if has_alt => {
                self.input_cursor = word_boundary_right(&self.input_buffer, self.input_cursor);
            }
            // macOS: Option+Left/Right sends Alt+b / Alt+f
            KeyCode::Char('b') if has_alt => {
                self.input_cursor = word_boundary_left(&self.input_buffer, self.input_cursor);
            }
            KeyCode::Char('f') if has_alt => {
                self.input_cursor = word_boundary_right(&self.input_buffer, self.input_cursor);
            }
            KeyCode::Left => {
                self.input_cursor = self.input_cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.input_cursor < len {
                    self.input_cursor += 1;
                }
            }
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = len,
            KeyCode::Backspace => {
                if self.input_cursor > 0 {
                    self.input_cursor -= 1;
                    let at = byte_index(&self.input_buffer, self.input_cursor);
                    self.input_buffer.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.input_cursor < len {
                    let at = byte_index(&self.input_buffer, self.input_cursor);
                    self.input_buffer.remove(at);
                }
            }
            // Unbound Ctrl chords (Ctrl+U, Ctrl+W, ...) are not text
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = byte_index(&self.input_buffer, self.input_cursor);
                self.input_buffer.insert(at, c);
                self.input_cursor += 1;
            }
            _ => {}
        }
    }

    /// Create a task from the input field; the field is cleared only on success
    fn submit_input(&mut self) {
        if self.board.create_task(&self.input_buffer) {
            self.input_buffer.clear();
            self.input_cursor = 0;
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let input = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerInput::Down(position),
            MouseEventKind::Drag(MouseButton::Left) => PointerInput::Move(position),
            MouseEventKind::Up(MouseButton::Left) => PointerInput::Up(position),
            _ => return,
        };

        match self.dnd.handle(input) {
            Some(DndEvent::Click(at)) => self.handle_click(at),
            Some(DndEvent::DragEnd(event)) => {
                self.board.apply_drag_end(&event);
            }
            Some(DndEvent::DragStart { active }) => {
                self.input_mode = InputMode::Normal;
                self.board.select_task(&active);
            }
            Some(DndEvent::DragOver { active, over }) => {
                tracing::trace!(active = %active, over = ?over, "drag over");
            }
            Some(DndEvent::DragCancel { .. }) | None => {}
        }
    }

    fn handle_click(&mut self, position: Position) {
        match self.clicks.at(position).cloned() {
            Some(Control::Input) => {
                self.input_mode = InputMode::InputTitle;
                return;
            }
            Some(Control::AddButton) => {
                self.submit_input();
                return;
            }
            Some(Control::Delete(id)) => {
                self.board.delete_task(&id);
            }
            None => {
                let hits = self.dnd.hits();
                if let Some(target) = hits.sortable_at(position) {
                    let id = target.id.clone();
                    self.board.select_task(&id);
                } else if let Some(key) = hits
                    .droppable_at(position)
                    .and_then(|t| ColumnKey::from_key(&t.id))
                {
                    self.board.select_column(key.index());
                }
            }
        }
        self.input_mode = InputMode::Normal;
    }
}

pub struct App {
    terminal: AppTerminal,
    state: AppState,
}

impl App {
    pub fn new(config: &GlobalConfig) -> Result<Self> {
        Self::with_ids(config, Arc::new(UuidGenerator))
    }

    pub fn with_ids(config: &GlobalConfig, ids: Arc<dyn IdGenerator>) -> Result<Self> {
        let terminal = terminal::setup_terminal()?;
        let state = AppState::new(config, ids);
        tracing::info!(
            activation_distance = config.drag.activation_distance,
            collision = ?config.drag.collision,
            "board ready"
        );
        Ok(Self { terminal, state })
    }

    pub async fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.draw()?;

            if event::poll(std::time::Duration::from_millis(100))? {
                let event = event::read()?;
                self.state.handle_event(event);
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &mut self.state;
        self.terminal.draw(|frame| render(state, frame))?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = terminal::restore_terminal(&mut self.terminal) {
            tracing::error!("{}", e);
        }
    }
}

/// Draw the whole screen, re-registering every hit region.
fn render(state: &mut AppState, frame: &mut Frame) {
    let area = frame.area();
    state.dnd.hits_mut().clear();
    state.dnd.hits_mut().set_bounds(area);
    state.clicks.clear();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input bar
            Constraint::Min(0),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_input_bar(state, frame, chunks[0]);
    draw_board(state, frame, chunks[1]);

    let footer = Paragraph::new(build_footer_text(state.input_mode, state.dnd.is_dragging()))
        .style(Style::default().fg(hex_to_color(&state.theme.color_dimmed)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    draw_drag_ghost(state, frame, area);
}

fn draw_input_bar(state: &mut AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(ADD_BUTTON_WIDTH)])
        .split(area);

    let focused = state.input_mode == InputMode::InputTitle;
    let border_color = if focused {
        &state.theme.color_selected
    } else {
        &state.theme.color_normal
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(hex_to_color(border_color)));
    let inner = input_block.inner(chunks[0]);

    // Scroll sideways so the cursor cell stays inside the field
    let cursor_col = input_cursor_column(&state.input_buffer, state.input_cursor);
    let scroll = cursor_col.saturating_sub(usize::from(inner.width.saturating_sub(1)));

    let text = if state.input_buffer.is_empty() {
        Paragraph::new(INPUT_PLACEHOLDER)
            .style(Style::default().fg(hex_to_color(&state.theme.color_dimmed)).italic())
    } else {
        Paragraph::new(state.input_buffer.as_str())
            .style(Style::default().fg(hex_to_color(&state.theme.color_text)))
            .scroll((0, scroll as u16))
    };
    frame.render_widget(text.block(input_block), chunks[0]);
    state.clicks.register(Control::Input, chunks[0]);

    if focused && inner.width > 0 {
        let offset = (cursor_col - scroll) as u16;
        frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
    }

    let add = Paragraph::new("Add")
        .alignment(Alignment::Center)
        .style(Style::default().fg(hex_to_color(&state.theme.color_text)).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(hex_to_color(&state.theme.color_normal))),
        );
    frame.render_widget(add, chunks[1]);
    state.clicks.register(Control::AddButton, chunks[1]);
}

/// Screen cells before the cursor (wide chars take two)
fn input_cursor_column(buffer: &str, cursor: usize) -> usize {
    buffer[..byte_index(buffer, cursor)].width()
}

fn draw_board(state: &mut AppState, frame: &mut Frame, area: Rect) {
    let active = state.dnd.active().map(|d| d.id.clone());
    let over = state.dnd.over().map(str::to_string);
    let board = Arc::clone(state.board.board());

    let AppState {
        board: board_state,
        dnd,
        clicks,
        theme,
        input_mode,
        ..
    } = state;
    let hits = dnd.hits_mut();
    let board_focused = *input_mode == InputMode::Normal;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (i, (key, column)) in board.columns().enumerate() {
        let is_selected_column = board_focused && board_state.selected_column == i;

        let inner = DropZone::new(key, column, theme)
            .selected(is_selected_column)
            .over(over.as_deref() == Some(key.as_str()))
            .render(frame, columns[i], hits);

        let tasks = &column.tasks;
        let max_visible_cards = (inner.height / CARD_HEIGHT) as usize;

        // Calculate scroll offset to keep selected task visible
        let scroll_offset = if is_selected_column && tasks.len() > max_visible_cards {
            let selected = board_state.selected_row;
            if selected >= max_visible_cards {
                selected - max_visible_cards + 1
            } else {
                0
            }
        } else {
            0
        };

        let needs_scrollbar = tasks.len() > max_visible_cards && max_visible_cards > 0;
        let card_width = if needs_scrollbar {
            inner.width.saturating_sub(1)
        } else {
            inner.width
        };

        for (j, task) in tasks.iter().skip(scroll_offset).take(max_visible_cards).enumerate() {
            let row = scroll_offset + j;
            let card_area = Rect::new(inner.x, inner.y + j as u16 * CARD_HEIGHT, card_width, CARD_HEIGHT);

            Item::new(task, theme)
                .selected(is_selected_column && board_state.selected_row == row)
                .dragging(active.as_deref() == Some(task.id.as_str()))
                .over(over.as_deref() == Some(task.id.as_str()))
                .render(frame, card_area, hits, clicks);
        }

        if needs_scrollbar {
            let mut scrollbar_state = ScrollbarState::new(tasks.len().saturating_sub(max_visible_cards))
                .position(scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .style(Style::default().fg(hex_to_color(&theme.color_dimmed))),
                inner,
                &mut scrollbar_state,
            );
        }
    }
}

fn draw_drag_ghost(state: &AppState, frame: &mut Frame, bounds: Rect) {
    let Some(drag) = state.dnd.active() else {
        return;
    };
    let Some(task) = state.board.board().task(&drag.id) else {
        return;
    };
    let area = drag.translated_rect(bounds);
    Item::new(task, &state.theme)
        .selected(true)
        .render_ghost(frame, area);
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
