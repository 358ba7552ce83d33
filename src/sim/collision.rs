//! Collision predicates
//!
//! Pure geometry between the player rectangle and obstacle shapes, with no
//! state and no side effects. The two predicates deliberately disagree at
//! the boundary: the circle test is strict (exact tangency misses) while
//! the rectangle test is non-strict (exact edge contact hits). Both
//! behaviors are load-bearing and pinned by tests.

use glam::Vec2;

/// Axis-aligned rect (top-left `rect_min`, extent `rect_size`) vs circle.
///
/// Nearest-point test: clamp the circle center into the rectangle, then
/// compare squared distance against squared radius with strict `<`. A
/// circle exactly tangent to an edge or corner is a miss.
#[inline]
pub fn rect_circle_hit(rect_min: Vec2, rect_size: Vec2, center: Vec2, radius: f32) -> bool {
    let nearest = center.clamp(rect_min, rect_min + rect_size);
    center.distance_squared(nearest) < radius * radius
}

/// Axis-aligned rect vs rect, non-strict overlap on both axes. Rects that
/// share only an edge or corner count as overlapping.
#[inline]
pub fn rects_overlap(a_min: Vec2, a_size: Vec2, b_min: Vec2, b_size: Vec2) -> bool {
    a_min.x <= b_min.x + b_size.x
        && a_min.x + a_size.x >= b_min.x
        && a_min.y <= b_min.y + b_size.y
        && a_min.y + a_size.y >= b_min.y
}
