//! Door, board, and outside anchor resolution.
//!
//! Each anchor is either a validated manual override or a computed default.
//! Anchors are resolved once per layout and shared read-only by the route
//! generator.
//!
//! # Resolution rules
//!
//! | Anchor | Default | Manual override |
//! |--------|---------|-----------------|
//! | door | back wall, 60% of the width from the left edge | kept verbatim if inside the room, else discarded |
//! | board | front wall center, 1.5m up, 0.1m off the wall | treated as the target line for the board's front face |
//! | outside | 2m beyond the door, away from the wall it sits on | — |

use serde::{Deserialize, Serialize};

use crate::bounds::{self, LayoutWarning, Severity};
use crate::constants::{board, door, walls};
use crate::geometry::{RoomSpec, Vec3};
use crate::grid::{grid_bounds, GridSpec};

/// Door placement input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorSpec {
    #[serde(default)]
    pub manual_position: Option<Vec3>,
}

/// Board placement input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSpec {
    /// Target line for the board's front face.
    #[serde(default)]
    pub manual_position: Option<Vec3>,
    /// Caller-provided size; only Z (depth) is used.
    #[serde(default)]
    pub explicit_size: Option<Vec3>,
    /// Size measured from the board asset, when the host knows it.
    #[serde(default)]
    pub detected_size: Option<Vec3>,
}

/// Resolved reference points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorSet {
    pub door: Vec3,
    pub board: Vec3,
    pub outside: Vec3,
}

/// Anchors plus the corrections made while resolving them.
#[derive(Debug, Clone)]
pub struct ResolvedAnchors {
    pub anchors: AnchorSet,
    pub warnings: Vec<LayoutWarning>,
}

/// Default door: on the back wall, 60% of the way from the left edge.
pub fn default_door(room: &RoomSpec) -> Vec3 {
    Vec3::new(
        -room.half_width() + door::WIDTH_RATIO * room.width,
        0.0,
        room.back_wall_z(),
    )
}

/// Default board target: front wall center, inset from the wall.
pub fn default_board(room: &RoomSpec) -> Vec3 {
    Vec3::new(
        0.0,
        board::DEFAULT_HEIGHT,
        room.front_wall_z() + walls::FRONT_WALL_INSET,
    )
}

/// Manual door if it passes the hard boundary policy, else the default.
pub fn resolve_door(
    room: &RoomSpec,
    spec: &DoorSpec,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec3 {
    let Some(manual) = spec.manual_position else {
        return default_door(room);
    };
    match bounds::accept_manual_door(room, manual) {
        Some(p) => p,
        None => {
            let fallback = default_door(room);
            warnings.push(LayoutWarning::emit(
                "door",
                Severity::Corrected,
                format!(
                    "Manual door ({:.2}, {:.2}) outside room {}×{}; using default ({:.2}, {:.2})",
                    manual.x, manual.z, room.width, room.depth, fallback.x, fallback.z
                ),
            ));
            fallback
        }
    }
}

/// Board depth: explicit size, then detected size, then the fallback.
/// Non-positive or non-finite depths are skipped.
pub fn board_depth(spec: &BoardSpec) -> f32 {
    [spec.explicit_size, spec.detected_size]
        .into_iter()
        .flatten()
        .map(|size| size.z)
        .find(|z| z.is_finite() && *z > 0.0)
        .unwrap_or(board::FALLBACK_DEPTH)
}

/// Board center such that its front face sits on the target line, kept clear
/// of the front desk row and off the front wall.
pub fn resolve_board(
    room: &RoomSpec,
    grid: &GridSpec,
    spec: &BoardSpec,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec3 {
    let target = match spec.manual_position {
        Some(p) if p.is_finite() => p,
        Some(p) => {
            warnings.push(LayoutWarning::emit(
                "board",
                Severity::Corrected,
                format!(
                    "Manual board ({}, {}, {}) is not finite; using default",
                    p.x, p.y, p.z
                ),
            ));
            default_board(room)
        }
        None => default_board(room),
    };

    // Front face faces +Z (into the room), so the center sits half a depth behind it.
    let depth = board_depth(spec);
    let face_aligned = target - Vec3::new(0.0, 0.0, depth / 2.0);

    let front_z = grid_bounds(room, grid).front_z;
    let (cleared, shifted) = bounds::enforce_board_clearance(face_aligned, front_z);
    if shifted {
        warnings.push(LayoutWarning::emit(
            "board",
            Severity::Corrected,
            format!(
                "Board at z={:.2} is closer than {:.1}m to the front row (z={:.2}); moved to z={:.2}",
                face_aligned.z,
                board::MIN_CLEARANCE,
                front_z,
                cleared.z
            ),
        ));
    }

    let (position, clamped) = bounds::clamp_to_front_wall(room, cleared);
    if clamped {
        warnings.push(LayoutWarning::emit(
            "board",
            Severity::Corrected,
            format!(
                "Board at z={:.2} is behind the front wall (z={:.2}); pulled in to z={:.2}",
                cleared.z,
                room.front_wall_z(),
                position.z
            ),
        ));
    }

    if position.x.abs() > room.half_width() {
        warnings.push(LayoutWarning::emit(
            "board",
            Severity::Notice,
            format!(
                "Board x={:.2} lies outside room width {}",
                position.x, room.width
            ),
        ));
    }

    position
}

/// Outside point: 2m beyond the door, pointing away from the door's wall.
/// A door on neither the front nor the back wall is assumed to open to +Z.
pub fn resolve_outside(
    room: &RoomSpec,
    door_pos: Vec3,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec3 {
    let direction = if bounds::is_on_wall(door_pos.z, room.back_wall_z()) {
        1.0
    } else if bounds::is_on_wall(door_pos.z, room.front_wall_z()) {
        -1.0
    } else {
        warnings.push(LayoutWarning::emit(
            "outside",
            Severity::Notice,
            format!(
                "Door z={:.2} is on neither front nor back wall; assuming outside is +Z",
                door_pos.z
            ),
        ));
        1.0
    };
    door_pos + Vec3::new(0.0, 0.0, direction * door::OUTSIDE_OFFSET)
}

/// Resolve all three anchors. Door comes first since outside depends on it.
pub fn resolve_anchors(
    room: &RoomSpec,
    grid: &GridSpec,
    door_spec: &DoorSpec,
    board_spec: &BoardSpec,
) -> ResolvedAnchors {
    let mut warnings = Vec::new();
    let door = resolve_door(room, door_spec, &mut warnings);
    let board = resolve_board(room, grid, board_spec, &mut warnings);
    let outside = resolve_outside(room, door, &mut warnings);
    ResolvedAnchors {
        anchors: AnchorSet {
            door,
            board,
            outside,
        },
        warnings,
    }
}
