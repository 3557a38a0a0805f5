//! Boundary checks and corrective clamps for positions inside the room.
//!
//! Three policies are in use:
//! - **soft** (desks): out-of-bounds positions are reported, never moved
//! - **hard** (manual door): an out-of-bounds value is discarded as a whole
//! - **clearance** (board): too close to the desks is corrected by a shift,
//!   then the result is kept off the front wall
//!
//! Wall tests always go through [`is_on_wall`]; no exact float compares.

use serde::Serialize;

use crate::constants::{board, walls};
use crate::geometry::{RoomSpec, Vec3};

/// A non-fatal anomaly found (and possibly corrected) during generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutWarning {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Warning severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Reported only, nothing was changed.
    Notice,
    /// The offending value was replaced or moved.
    Corrected,
}

impl LayoutWarning {
    /// Build a warning and log it.
    pub fn emit(category: &'static str, severity: Severity, message: String) -> Self {
        log::warn!("[{}] {}", category, message);
        Self {
            category,
            severity,
            message,
        }
    }
}

/// Inclusive containment test on the floor plane.
pub fn is_within_room(room: &RoomSpec, x: f32, z: f32) -> bool {
    x.abs() <= room.half_width() && z.abs() <= room.half_depth()
}

/// Whether `z` lies on the wall at `wall_z`, within [`walls::WALL_EPSILON`].
pub fn is_on_wall(z: f32, wall_z: f32) -> bool {
    (z - wall_z).abs() < walls::WALL_EPSILON
}

/// Soft policy: report every labelled point that lies outside the room.
pub fn out_of_bounds_warnings<'a, I>(room: &RoomSpec, points: I) -> Vec<LayoutWarning>
where
    I: IntoIterator<Item = (&'a str, Vec3)>,
{
    let mut warnings = Vec::new();
    for (label, p) in points {
        if !is_within_room(room, p.x, p.z) {
            warnings.push(LayoutWarning::emit(
                "desk_bounds",
                Severity::Notice,
                format!(
                    "{} at ({:.2}, {:.2}) lies outside room {}×{}",
                    label, p.x, p.z, room.width, room.depth
                ),
            ));
        }
    }
    warnings
}

/// Hard policy: keep the manual door position verbatim or drop it entirely.
pub fn accept_manual_door(room: &RoomSpec, manual: Vec3) -> Option<Vec3> {
    if manual.is_finite() && is_within_room(room, manual.x, manual.z) {
        Some(manual)
    } else {
        None
    }
}

/// Clearance policy: a board closer than [`board::MIN_CLEARANCE`] to the
/// front desk row is moved to [`board::CLEARANCE_TARGET`] in front of it.
///
/// Returns the (possibly shifted) position and whether a shift happened.
pub fn enforce_board_clearance(position: Vec3, grid_front_z: f32) -> (Vec3, bool) {
    let clearance = grid_front_z - position.z;
    if clearance < board::MIN_CLEARANCE {
        (
            Vec3::new(
                position.x,
                position.y,
                grid_front_z - board::CLEARANCE_TARGET,
            ),
            true,
        )
    } else {
        (position, false)
    }
}

/// Keep a position off the front wall: anything on or behind the wall plane
/// is pulled in to [`walls::FRONT_WALL_INSET`].
///
/// Returns the (possibly clamped) position and whether a clamp happened.
pub fn clamp_to_front_wall(room: &RoomSpec, position: Vec3) -> (Vec3, bool) {
    let wall_z = room.front_wall_z();
    if position.z <= wall_z {
        (
            Vec3::new(position.x, position.y, wall_z + walls::FRONT_WALL_INSET),
            true,
        )
    } else {
        (position, false)
    }
}
