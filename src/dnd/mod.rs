//! Pointer drag-and-drop for the board.
//!
//! Renderers register drag sources and drop targets in a [`HitMap`] every
//! frame. [`DndContext`] turns raw pointer input into gestures: a press that
//! never travels `activation_distance` cells is a click, anything further is
//! a drag that ends in exactly one [`DragEndEvent`]. The board only ever sees
//! that event.

mod collision;
mod hit_map;

pub use collision::CollisionDetection;
pub use hit_map::{HitMap, Target};

use ratatui::layout::{Position, Rect};

/// Completion of a drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEndEvent {
    /// Id of the dragged task
    pub active: String,
    /// Id of the resolved drop target (task id or column key), if any
    pub over: Option<String>,
}

impl DragEndEvent {
    pub fn dropped(active: impl Into<String>, over: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            over: Some(over.into()),
        }
    }

    pub fn cancelled(active: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            over: None,
        }
    }
}

/// Left-button pointer input, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    Down(Position),
    Move(Position),
    Up(Position),
}

/// Gestures recognised by [`DndContext`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DndEvent {
    /// Press and release without crossing the activation distance
    Click(Position),
    DragStart { active: String },
    /// The drop target under the drag changed
    DragOver { active: String, over: Option<String> },
    DragEnd(DragEndEvent),
    DragCancel { active: String },
}

/// A drag in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub id: String,
    pub origin: Position,
    pub pointer: Position,
    /// Rect of the dragged card when the press started
    pub initial_rect: Rect,
}

impl ActiveDrag {
    /// Pointer travel since the press
    pub fn delta(&self) -> (i32, i32) {
        (
            i32::from(self.pointer.x) - i32::from(self.origin.x),
            i32::from(self.pointer.y) - i32::from(self.origin.y),
        )
    }

    /// The dragged card's rect following the pointer, kept inside `bounds`
    pub fn translated_rect(&self, bounds: Rect) -> Rect {
        let (dx, dy) = self.delta();
        let width = self.initial_rect.width.min(bounds.width);
        let height = self.initial_rect.height.min(bounds.height);
        let max_x = i32::from(bounds.right()) - i32::from(width);
        let max_y = i32::from(bounds.bottom()) - i32::from(height);
        let x = (i32::from(self.initial_rect.x) + dx).clamp(i32::from(bounds.x), max_x);
        let y = (i32::from(self.initial_rect.y) + dy).clamp(i32::from(bounds.y), max_y);
        Rect::new(x as u16, y as u16, width, height)
    }
}

#[derive(Debug, Clone, Default)]
enum SensorState {
    #[default]
    Idle,
    Pending {
        origin: Position,
        source: Option<Target>,
    },
    Dragging(ActiveDrag),
}

/// Pointer sensor, collision detection and the live drag state
#[derive(Debug)]
pub struct DndContext {
    activation_distance: u16,
    collision: CollisionDetection,
    hits: HitMap,
    state: SensorState,
    over: Option<String>,
}

impl DndContext {
    pub fn new(activation_distance: u16, collision: CollisionDetection) -> Self {
        Self {
            activation_distance,
            collision,
            hits: HitMap::new(),
            state: SensorState::Idle,
            over: None,
        }
    }

    pub fn hits(&self) -> &HitMap {
        &self.hits
    }

    pub fn hits_mut(&mut self) -> &mut HitMap {
        &mut self.hits
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            SensorState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    /// Current drop target while dragging
    pub fn over(&self) -> Option<&str> {
        self.active().and(self.over.as_deref())
    }

    pub fn is_dragging(&self) -> bool {
        self.active().is_some()
    }

    pub fn handle(&mut self, input: PointerInput) -> Option<DndEvent> {
        match input {
            PointerInput::Down(position) => {
                if let SensorState::Dragging(drag) = &self.state {
                    tracing::debug!(active = %drag.id, "pointer pressed mid-drag, dropping stale drag");
                }
                let source = self.hits.sortable_at(position).cloned();
                self.state = SensorState::Pending {
                    origin: position,
                    source,
                };
                self.over = None;
                None
            }
            PointerInput::Move(position) => self.pointer_moved(position),
            PointerInput::Up(position) => self.pointer_released(position),
        }
    }

    /// Abort the current drag without dropping
    pub fn cancel(&mut self) -> Option<DndEvent> {
        self.over = None;
        match std::mem::take(&mut self.state) {
            SensorState::Dragging(drag) => {
                tracing::debug!(active = %drag.id, "drag cancelled");
                Some(DndEvent::DragCancel { active: drag.id })
            }
            _ => None,
        }
    }

    fn pointer_moved(&mut self, position: Position) -> Option<DndEvent> {
        match &mut self.state {
            SensorState::Idle => None,
            SensorState::Pending { origin, source } => {
                let origin = *origin;
                let source = source.as_ref()?;
                if !exceeds(origin, position, self.activation_distance) {
                    return None;
                }
                let drag = ActiveDrag {
                    id: source.id.clone(),
                    origin,
                    pointer: position,
                    initial_rect: source.rect,
                };
                self.over = self.collision.detect(&self.hits, &drag);
                tracing::debug!(active = %drag.id, "drag started");
                let active = drag.id.clone();
                self.state = SensorState::Dragging(drag);
                Some(DndEvent::DragStart { active })
            }
            SensorState::Dragging(drag) => {
                drag.pointer = position;
                let over = self.collision.detect(&self.hits, drag);
                if over == self.over {
                    return None;
                }
                self.over = over.clone();
                Some(DndEvent::DragOver {
                    active: drag.id.clone(),
                    over,
                })
            }
        }
    }

    fn pointer_released(&mut self, position: Position) -> Option<DndEvent> {
        self.over = None;
        match std::mem::take(&mut self.state) {
            SensorState::Idle => None,
            SensorState::Pending { origin, .. } => Some(DndEvent::Click(origin)),
            SensorState::Dragging(mut drag) => {
                drag.pointer = position;
                let over = self.collision.detect(&self.hits, &drag);
                Some(DndEvent::DragEnd(DragEndEvent {
                    active: drag.id,
                    over,
                }))
            }
        }
    }
}

fn exceeds(origin: Position, position: Position, distance: u16) -> bool {
    let dx = i32::from(position.x) - i32::from(origin.x);
    let dy = i32::from(position.y) - i32::from(origin.y);
    let distance = i32::from(distance);
    dx * dx + dy * dy >= distance * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeds_threshold() {
        let origin = Position::new(10, 10);
        assert!(!exceeds(origin, Position::new(11, 10), 2));
        assert!(exceeds(origin, Position::new(12, 10), 2));
        assert!(exceeds(origin, Position::new(11, 11), 1));
        assert!(exceeds(origin, origin, 0));
    }

    #[test]
    fn test_translated_rect_clamps_to_bounds() {
        let drag = ActiveDrag {
            id: "a".to_string(),
            origin: Position::new(5, 5),
            pointer: Position::new(0, 0),
            initial_rect: Rect::new(2, 4, 10, 3),
        };
        let bounds = Rect::new(0, 0, 40, 20);
        assert_eq!(drag.translated_rect(bounds), Rect::new(0, 0, 10, 3));

        let far = ActiveDrag {
            pointer: Position::new(100, 100),
            ..drag
        };
        assert_eq!(far.translated_rect(bounds), Rect::new(30, 17, 10, 3));
    }
}
