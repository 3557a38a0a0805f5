//! Desk grid layout — two rows of desks centered in the room.
//!
//! The grid is centered on the room origin. An aisle is opened between the
//! front row (row 0, board side) and the back row (row 1) by pushing each row
//! half an aisle away from the center line.
//!
//! ```
//! use drillplan_logic::geometry::RoomSpec;
//! use drillplan_logic::grid::{generate_desks, GridSpec};
//!
//! let room = RoomSpec::new(10.0, 8.0, 3.0);
//! let grid = GridSpec { occupant_count: 6, spacing_x: 2.0, spacing_z: 2.5, aisle_width: 1.5, ..GridSpec::default() };
//! let layout = generate_desks(&room, &grid);
//! assert_eq!(layout.desks.len(), 6);
//! assert_eq!(layout.desks[0].id, "Desk_0_0");
//! ```

use serde::{Deserialize, Serialize};

use crate::bounds::{self, LayoutWarning};
use crate::constants::grid as consts;
use crate::geometry::{RoomSpec, Vec3};

/// Desk grid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub spacing_x: f32,
    pub spacing_z: f32,
    pub aisle_width: f32,
    pub occupant_count: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: consts::ROWS,
            spacing_x: 2.0,
            spacing_z: 2.5,
            aisle_width: 1.5,
            occupant_count: 6,
        }
    }
}

impl GridSpec {
    /// Desks per row. Derived, never stored.
    pub fn columns(&self) -> u32 {
        if self.rows == 0 {
            0
        } else {
            self.occupant_count / self.rows
        }
    }

    /// Distance between the outermost desk centers along X.
    pub fn grid_width(&self) -> f32 {
        self.columns().saturating_sub(1) as f32 * self.spacing_x
    }

    /// Distance between the first and last row centers along Z, before the
    /// aisle is opened.
    pub fn grid_depth(&self) -> f32 {
        self.rows.saturating_sub(1) as f32 * self.spacing_z
    }
}

/// One generated desk. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskSlot {
    pub id: String,
    pub row: u32,
    pub col: u32,
    pub center: Vec3,
}

impl DeskSlot {
    pub fn new(row: u32, col: u32, center: Vec3) -> Self {
        Self {
            id: format!("Desk_{}_{}", row, col),
            row,
            col,
            center,
        }
    }

    /// Where the occupant stands, offset along the desk's forward axis.
    pub fn occupant_stand_position(&self) -> Vec3 {
        self.center + Vec3::new(0.0, 0.0, consts::OCCUPANT_STAND_OFFSET)
    }

    /// Top of the desk, where props are placed.
    pub fn surface_anchor(&self) -> Vec3 {
        self.center + Vec3::new(0.0, consts::SURFACE_ANCHOR_HEIGHT, 0.0)
    }
}

/// Inclusive Z range covered by the desk rows, aisle included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Board-side edge (smaller Z).
    pub front_z: f32,
    /// Door-side edge (larger Z).
    pub back_z: f32,
}

/// Desks plus the anomalies reported while placing them.
#[derive(Debug, Clone)]
pub struct DeskGrid {
    pub desks: Vec<DeskSlot>,
    pub warnings: Vec<LayoutWarning>,
}

/// Lay out `rows × columns` desks, row-major, front row first.
///
/// Deterministic: identical inputs give an identical, identically ordered
/// list. Desks that fall outside the room are reported, not moved.
pub fn generate_desks(room: &RoomSpec, grid: &GridSpec) -> DeskGrid {
    let columns = grid.columns();
    let start_x = -grid.grid_width() / 2.0;
    let start_z = -grid.grid_depth() / 2.0;
    let half_aisle = grid.aisle_width / 2.0;

    let mut desks = Vec::with_capacity((grid.rows * columns) as usize);
    for row in 0..grid.rows {
        for col in 0..columns {
            let x = start_x + col as f32 * grid.spacing_x;
            let mut z = start_z + row as f32 * grid.spacing_z;
            if row == 0 {
                z -= half_aisle;
            } else {
                z += half_aisle;
            }
            desks.push(DeskSlot::new(row, col, Vec3::new(x, 0.0, z)));
        }
    }

    let warnings =
        bounds::out_of_bounds_warnings(room, desks.iter().map(|d| (d.id.as_str(), d.center)));

    log::debug!(
        "Placed {} desks ({}×{}), {} out of bounds",
        desks.len(),
        grid.rows,
        columns,
        warnings.len()
    );

    DeskGrid { desks, warnings }
}

/// Z extent of the desk grid including the aisle offset.
///
/// The extent depends on the grid alone; `_room` is taken so the call reads
/// like the other layout entry points (`generate_desks`, `resolve_anchors`).
pub fn grid_bounds(_room: &RoomSpec, grid: &GridSpec) -> GridBounds {
    let half_depth = grid.grid_depth() / 2.0;
    let half_aisle = grid.aisle_width / 2.0;
    let mut front_z = -half_depth - half_aisle;
    let mut back_z =
        -half_depth + grid.rows.saturating_sub(1) as f32 * grid.spacing_z + half_aisle;
    if front_z > back_z {
        std::mem::swap(&mut front_z, &mut back_z);
    }
    GridBounds { front_z, back_z }
}
