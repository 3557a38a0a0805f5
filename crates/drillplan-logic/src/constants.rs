//! Layout constants — tolerances, offsets, and fixed business ratios.
//!
//! Distances are in meters, speeds in meters per second.

pub mod grid {
    /// Classroom layouts always have a front and a back row.
    pub const ROWS: u32 = 2;
    /// Where an occupant stands, along the desk's local forward axis.
    pub const OCCUPANT_STAND_OFFSET: f32 = -0.3;
    /// Height of the desk surface above the desk origin.
    pub const SURFACE_ANCHOR_HEIGHT: f32 = 0.8;
}

pub mod walls {
    /// Tolerance when deciding whether a Z coordinate is "on" a wall.
    pub const WALL_EPSILON: f32 = 0.1;
    /// Gap kept between the board and the front wall plane.
    pub const FRONT_WALL_INSET: f32 = 0.1;
}

pub mod door {
    /// Default door X, as a fraction of room width from the left edge.
    pub const WIDTH_RATIO: f32 = 0.6;
    /// Distance from the door to the outside assembly point.
    pub const OUTSIDE_OFFSET: f32 = 2.0;
}

pub mod board {
    pub const DEFAULT_HEIGHT: f32 = 1.5;
    /// Used when neither an explicit nor a detected size is known.
    pub const FALLBACK_DEPTH: f32 = 0.1;
    /// Closest the board may sit to the front desk row.
    pub const MIN_CLEARANCE: f32 = 1.0;
    /// Where the board is moved to when clearance is violated.
    pub const CLEARANCE_TARGET: f32 = 1.5;
}

pub mod routes {
    pub const ESCAPE_SPEED: f32 = 3.0;
    pub const RETURN_SPEED: f32 = 2.0;
    /// Degrees per second.
    pub const ROTATION_SPEED: f32 = 120.0;
    pub const WAYPOINTS_PER_ROUTE: usize = 4;
}

pub mod agents {
    pub const DEFAULT_ID_PREFIX: &str = "Student";
}

pub mod limits {
    pub const OCCUPANTS_MIN: u32 = 4;
    pub const OCCUPANTS_MAX: u32 = 10;
    pub const SPACING_MIN: f32 = 1.0;
    pub const SPACING_MAX: f32 = 5.0;
    pub const AISLE_MIN: f32 = 1.0;
    pub const AISLE_MAX: f32 = 3.0;
    pub const ROOM_SIDE_MIN: f32 = 5.0;
    pub const ROOM_SIDE_MAX: f32 = 30.0;
    pub const ROOM_HEIGHT_MIN: f32 = 2.0;
    pub const ROOM_HEIGHT_MAX: f32 = 10.0;
}
