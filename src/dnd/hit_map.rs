use ratatui::layout::{Position, Rect};

/// A registered region keyed by the id the board understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    pub rect: Rect,
}

/// Regions registered during the last render.
///
/// Sortables are both drag sources and drop targets (task cards);
/// droppables are drop targets only (column areas).
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    sortables: Vec<Target>,
    droppables: Vec<Target>,
    bounds: Option<Rect>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.sortables.clear();
        self.droppables.clear();
        self.bounds = None;
    }

    /// Area a dragged card is kept inside (the whole frame)
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    /// Falls back to the full coordinate space when no frame was drawn
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or_else(|| Rect::new(0, 0, u16::MAX, u16::MAX))
    }

    pub fn register_sortable(&mut self, id: impl Into<String>, rect: Rect) {
        if !rect.is_empty() {
            self.sortables.push(Target { id: id.into(), rect });
        }
    }

    pub fn register_droppable(&mut self, id: impl Into<String>, rect: Rect) {
        if !rect.is_empty() {
            self.droppables.push(Target { id: id.into(), rect });
        }
    }

    /// Topmost sortable under a position
    pub fn sortable_at(&self, position: Position) -> Option<&Target> {
        self.sortables.iter().rev().find(|t| t.rect.contains(position))
    }

    /// Topmost droppable under a position
    pub fn droppable_at(&self, position: Position) -> Option<&Target> {
        self.droppables.iter().rev().find(|t| t.rect.contains(position))
    }

    pub fn sortable(&self, id: &str) -> Option<&Target> {
        self.sortables.iter().find(|t| t.id == id)
    }

    pub fn droppable(&self, id: &str) -> Option<&Target> {
        self.droppables.iter().find(|t| t.id == id)
    }

    /// Every drop target: sortables first, then droppables
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.sortables.iter().chain(self.droppables.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sortables.is_empty() && self.droppables.is_empty()
    }
}
