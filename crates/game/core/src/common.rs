use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Unique identifier for any entity tracked in a world snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side an entity fights for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Team {
    #[default]
    Blue,
    Red,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

/// Continuous map position in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Returns true if the segment `start → end` passes within `radius` of `center`.
///
/// Projects the circle center onto the segment, clamps the projection to the
/// segment's extent and compares the closest-point distance against `radius`.
/// A degenerate segment (start == end) degrades to a point-in-circle test.
pub fn segment_intersects_circle(start: Vec2, end: Vec2, center: Vec2, radius: f32) -> bool {
    let segment = end - start;
    let len_sq = segment.length_squared();

    let closest = if len_sq <= f32::EPSILON {
        start
    } else {
        let t = ((center - start).dot(segment) / len_sq).clamp(0.0, 1.0);
        start + segment * t
    };

    closest.distance(center) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn segment_passing_through_circle_intersects() {
        let hit = segment_intersects_circle(
            Vec2::new(-100.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 10.0),
            20.0,
        );
        assert!(hit);
    }

    #[test]
    fn segment_stopping_short_does_not_intersect() {
        // Closest point is the segment end, 50 units away.
        let hit = segment_intersects_circle(
            Vec2::new(-100.0, 0.0),
            Vec2::new(-50.0, 0.0),
            Vec2::ZERO,
            20.0,
        );
        assert!(!hit);
    }

    #[test]
    fn degenerate_segment_is_point_test() {
        assert!(segment_intersects_circle(
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::ZERO,
            6.0
        ));
        assert!(!segment_intersects_circle(
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::ZERO,
            4.0
        ));
    }

    #[test]
    fn opponent_flips_team() {
        assert_eq!(Team::Blue.opponent(), Team::Red);
        assert_eq!(Team::Red.opponent(), Team::Blue);
    }
}
