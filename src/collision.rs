use crate::entities::{Body, Rect};

/// Axis-aligned rectangle overlap.  Touching edges do not count.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

pub fn collides(a: &impl Body, b: &impl Body) -> bool {
    overlaps(a.rect(), b.rect())
}
