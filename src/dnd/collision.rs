use ratatui::layout::{Position, Rect};
use serde::{Deserialize, Serialize};

use super::{ActiveDrag, HitMap};

/// How the drop target is picked while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionDetection {
    /// Card under the pointer, else column under the pointer
    #[default]
    PointerWithin,
    /// Target whose center is nearest the dragged card's center
    ClosestCenter,
}

impl CollisionDetection {
    pub fn detect(&self, hits: &HitMap, drag: &ActiveDrag) -> Option<String> {
        match self {
            CollisionDetection::PointerWithin => pointer_within(hits, drag.pointer),
            CollisionDetection::ClosestCenter => closest_center(hits, drag),
        }
    }
}

fn pointer_within(hits: &HitMap, pointer: Position) -> Option<String> {
    hits.sortable_at(pointer)
        .or_else(|| hits.droppable_at(pointer))
        .map(|t| t.id.clone())
}

// Measured from the same clamped rect the drag ghost is drawn at.
fn closest_center(hits: &HitMap, drag: &ActiveDrag) -> Option<String> {
    let (cx, cy) = doubled_center(drag.translated_rect(hits.bounds()));

    hits.targets()
        .min_by_key(|t| {
            let (tx, ty) = doubled_center(t.rect);
            let (ex, ey) = (i64::from(tx - cx), i64::from(ty - cy));
            ex * ex + ey * ey
        })
        .map(|t| t.id.clone())
}

// Centers are kept doubled so they stay integral.
fn doubled_center(rect: Rect) -> (i32, i32) {
    (
        2 * i32::from(rect.x) + i32::from(rect.width),
        2 * i32::from(rect.y) + i32::from(rect.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubled_center() {
        assert_eq!(doubled_center(Rect::new(0, 0, 4, 3)), (4, 3));
        assert_eq!(doubled_center(Rect::new(10, 5, 1, 1)), (21, 11));
    }

    #[test]
    fn test_collision_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            collision: CollisionDetection,
        }

        let parsed: Wrapper = toml::from_str("collision = \"closest-center\"").unwrap();
        assert_eq!(parsed.collision, CollisionDetection::ClosestCenter);
        let parsed: Wrapper = toml::from_str("collision = \"pointer-within\"").unwrap();
        assert_eq!(parsed.collision, CollisionDetection::PointerWithin);
    }
}
