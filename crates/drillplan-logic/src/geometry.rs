//! Room geometry primitives.
//!
//! The room is centered at the origin with Y up. The front wall (board side)
//! sits at `z = -depth/2`, the back wall (door side) at `z = +depth/2`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point or offset in room space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn distance(self, other: Vec3) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Interior dimensions of the classroom in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSpec {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Default for RoomSpec {
    fn default() -> Self {
        Self {
            width: 10.0,
            depth: 8.0,
            height: 3.0,
        }
    }
}

impl RoomSpec {
    pub fn new(width: f32, depth: f32, height: f32) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.depth / 2.0
    }

    /// Z of the board wall.
    pub fn front_wall_z(&self) -> f32 {
        -self.half_depth()
    }

    /// Z of the door wall.
    pub fn back_wall_z(&self) -> f32 {
        self.half_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_extents() {
        let room = RoomSpec::new(10.0, 8.0, 3.0);
        assert_eq!(room.half_width(), 5.0);
        assert_eq!(room.half_depth(), 4.0);
        assert_eq!(room.front_wall_z(), -4.0);
        assert_eq!(room.back_wall_z(), 4.0);
    }

    #[test]
    fn test_vec_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, 0.0, -1.0);
        assert_eq!(a + b, Vec3::new(1.5, 2.0, 2.0));
        assert_eq!(a - b, Vec3::new(0.5, 2.0, 4.0));
        assert_eq!(b.scale(2.0), Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_distance() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_detected() {
        assert!(Vec3::new(1.0, 0.0, 2.0).is_finite());
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f32::INFINITY, 0.0).is_finite());
    }
}
