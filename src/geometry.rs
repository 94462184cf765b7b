/// Radius, in screen pixels, within which a point counts as hovered.
pub const POINT_RADIUS: f32 = 5.0;

/// A vertex in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Whether `point` lies inside (or on) the circle at `center` with `radius`.
#[inline]
pub fn is_in_circle(point: Point, center: Point, radius: f32) -> bool {
    let dx = (point.x - center.x).abs();
    let dy = (point.y - center.y).abs();
    if dx > radius || dy > radius {
        return false;
    }
    // inside the inscribed diamond, no need for the squares
    dx + dy <= radius || dx * dx + dy * dy <= radius * radius
}

/// Index of the first point within `radius` of `pos`, scanning in order.
pub fn hit_test(points: &[Point], pos: Point, radius: f32) -> Option<usize> {
    points.iter().position(|&p| is_in_circle(pos, p, radius))
}
