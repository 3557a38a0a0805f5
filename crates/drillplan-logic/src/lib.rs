//! Pure classroom layout logic for drillplan.
//!
//! This crate turns a small declarative schema (occupant count, spacing,
//! room size, optional anchor overrides) into a desk grid, door/board/outside
//! anchors, and per-occupant evacuation routes. Functions take plain data and
//! return plain data; scene assembly and asset binding live with the caller.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`anchors`] | Door, board, and outside anchor resolution |
//! | [`bounds`] | Room containment, wall tests, clamp and clearance policies |
//! | [`constants`] | Tolerances, offsets, default speeds, schema limits |
//! | [`error`] | Schema and layout error types |
//! | [`geometry`] | `Vec3` and room dimensions |
//! | [`grid`] | Two-row desk grid and its Z extent |
//! | [`layout`] | End-to-end pipeline producing a `ClassroomLayout` |
//! | [`routes`] | Agents, escape/return waypoint routes, route lookup |
//! | [`schema`] | JSON input schema and batch validation |

pub mod anchors;
pub mod bounds;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod routes;
pub mod schema;

pub use error::{LayoutError, SchemaError};
pub use layout::{generate_layout, generate_layout_from_json, ClassroomLayout};
pub use schema::LayoutSchema;
