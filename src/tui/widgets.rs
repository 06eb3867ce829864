//! Stateless renderers for board pieces.
//!
//! [`Item`] and [`DropZone`] draw a task card and a column, and register the
//! regions they occupy so the drag-and-drop layer can find them. Any drag
//! feedback they show comes from the flags the caller derives from the live
//! drag state.

use ratatui::{prelude::*, widgets::*};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::board::{Column, ColumnKey, Task};
use crate::config::ThemeConfig;
use crate::dnd::HitMap;

/// Rows per task card: border, title, border
pub const CARD_HEIGHT: u16 = 3;

const DELETE_GLYPH: &str = "✕";

/// Helper to convert hex color string to ratatui Color
pub fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Clickable controls that are not drag sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Input,
    AddButton,
    Delete(String),
}

/// Controls registered during the last render
#[derive(Debug, Default, Clone)]
pub struct ClickMap {
    regions: Vec<(Control, Rect)>,
}

impl ClickMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, control: Control, rect: Rect) {
        if !rect.is_empty() {
            self.regions.push((control, rect));
        }
    }

    pub fn at(&self, position: Position) -> Option<&Control> {
        self.regions
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(position))
            .map(|(control, _)| control)
    }

    pub fn rect(&self, control: &Control) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(c, _)| c == control)
            .map(|(_, rect)| *rect)
    }
}

/// A task card
pub struct Item<'a> {
    task: &'a Task,
    theme: &'a ThemeConfig,
    selected: bool,
    dragging: bool,
    over: bool,
}

impl<'a> Item<'a> {
    pub fn new(task: &'a Task, theme: &'a ThemeConfig) -> Self {
        Self {
            task,
            theme,
            selected: false,
            dragging: false,
            over: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// This card is the one being dragged (drawn dimmed in place)
    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    /// This card is the current drop target
    pub fn over(mut self, over: bool) -> Self {
        self.over = over;
        self
    }

    /// Draw the card and register it as sortable, plus its delete control.
    pub fn render(self, frame: &mut Frame, area: Rect, hits: &mut HitMap, clicks: &mut ClickMap) {
        hits.register_sortable(self.task.id.as_str(), area);
        if let Some(delete_area) = self.draw(frame, area) {
            clicks.register(Control::Delete(self.task.id.clone()), delete_area);
        }
    }

    /// Draw the card following the pointer; registers nothing.
    pub fn render_ghost(self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        self.draw(frame, area);
    }

    /// Returns the delete glyph's rect when there was room for it.
    fn draw(&self, frame: &mut Frame, area: Rect) -> Option<Rect> {
        let theme = self.theme;
        let (border_color, border_type) = if self.dragging {
            (&theme.color_dimmed, BorderType::Plain)
        } else if self.over {
            (&theme.color_drop_target, BorderType::Double)
        } else if self.selected {
            (&theme.color_selected, BorderType::Thick)
        } else {
            (&theme.color_normal, BorderType::Plain)
        };

        let title_style = if self.dragging {
            Style::default().fg(hex_to_color(&theme.color_dimmed)).italic()
        } else if self.selected {
            Style::default().fg(hex_to_color(&theme.color_selected)).bold()
        } else {
            Style::default().fg(hex_to_color(&theme.color_text)).bold()
        };

        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(hex_to_color(border_color)))
            .border_type(border_type);
        let inner = card_block.inner(area);
        frame.render_widget(card_block, area);

        if inner.height == 0 || inner.width == 0 {
            return None;
        }

        // Title on the left, delete glyph in the last column
        let has_delete = inner.width >= 3;
        let title_width = if has_delete { inner.width - 2 } else { inner.width };
        let title = truncate(&self.task.title, title_width as usize);
        frame.render_widget(
            Paragraph::new(title).style(title_style),
            Rect::new(inner.x, inner.y, title_width, 1),
        );

        if !has_delete {
            return None;
        }
        let delete_area = Rect::new(inner.right() - 1, inner.y, 1, 1);
        frame.render_widget(
            Paragraph::new(DELETE_GLYPH).style(Style::default().fg(hex_to_color(&theme.color_delete))),
            delete_area,
        );
        Some(delete_area)
    }
}

/// A column drop target
pub struct DropZone<'a> {
    key: ColumnKey,
    column: &'a Column,
    theme: &'a ThemeConfig,
    selected: bool,
    over: bool,
}

impl<'a> DropZone<'a> {
    pub fn new(key: ColumnKey, column: &'a Column, theme: &'a ThemeConfig) -> Self {
        Self {
            key,
            column,
            theme,
            selected: false,
            over: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn over(mut self, over: bool) -> Self {
        self.over = over;
        self
    }

    /// Draw the column frame and header, register it as droppable, and
    /// return the area left for its cards.
    pub fn render(self, frame: &mut Frame, area: Rect, hits: &mut HitMap) -> Rect {
        hits.register_droppable(self.key.as_str(), area);

        let theme = self.theme;
        let (border_style, title_style) = if self.over {
            let style = Style::default().fg(hex_to_color(&theme.color_drop_target));
            (style, style.bold())
        } else if self.selected {
            let style = Style::default().fg(hex_to_color(&theme.color_selected));
            (style, style)
        } else {
            (
                Style::default().fg(hex_to_color(&theme.color_normal)),
                Style::default().fg(hex_to_color(&theme.color_column_header)),
            )
        };

        let title = format!(" {} ({}) ", self.column.name, self.column.tasks.len());
        let block = Block::default()
            .title(title)
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}

/// Truncate to `max` screen cells, ending in "..." when cut
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let (budget, ellipsis) = if max <= 3 { (max, "") } else { (max - 3, "...") };
    let mut kept = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }
    kept.push_str(ellipsis);
    kept
}
