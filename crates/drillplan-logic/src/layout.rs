//! End-to-end layout pipeline.
//!
//! validate → desk grid → anchors → agents → routes
//!
//! The order matters: board clearance needs the grid bounds, and routes need
//! both desks and anchors. Generation is a pure function of the schema, so
//! calling it twice with the same schema yields identical output.

use serde::Serialize;

use crate::anchors::{resolve_anchors, AnchorSet};
use crate::bounds::LayoutWarning;
use crate::error::LayoutError;
use crate::geometry::RoomSpec;
use crate::grid::{generate_desks, grid_bounds, DeskSlot, GridBounds, GridSpec};
use crate::routes::{assign_agents, find_route, generate_routes, Agent, Route, RouteKind};
use crate::schema::{validate_schema, LayoutSchema};

/// Everything the scene builder needs, as plain data.
#[derive(Debug, Clone, Serialize)]
pub struct ClassroomLayout {
    pub room: RoomSpec,
    pub grid: GridSpec,
    pub desks: Vec<DeskSlot>,
    pub grid_bounds: GridBounds,
    pub anchors: AnchorSet,
    pub agents: Vec<Agent>,
    pub routes: Vec<Route>,
    pub warnings: Vec<LayoutWarning>,
}

impl ClassroomLayout {
    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Both routes of one agent, escape first.
    pub fn routes_for(&self, agent_id: &str) -> Option<(&Route, &Route)> {
        let escape = find_route(&self.routes, agent_id, RouteKind::Escape)?;
        let ret = find_route(&self.routes, agent_id, RouteKind::Return)?;
        Some((escape, ret))
    }

    pub fn desk(&self, id: &str) -> Option<&DeskSlot> {
        self.desks.iter().find(|d| d.id == id)
    }
}

/// Generate a complete layout from a schema.
///
/// Schema violations are fatal and reported together; geometric anomalies
/// are corrected or reported in `warnings` and never stop generation.
pub fn generate_layout(schema: &LayoutSchema) -> Result<ClassroomLayout, LayoutError> {
    let schema = schema.normalized();
    let errors = validate_schema(&schema);
    if !errors.is_empty() {
        log::warn!("Schema rejected with {} errors", errors.len());
        return Err(LayoutError::InvalidSchema(errors));
    }

    let room = schema.room;
    let grid = schema.grid();

    let desk_grid = generate_desks(&room, &grid);
    let bounds = grid_bounds(&room, &grid);
    let resolved = resolve_anchors(&room, &grid, &schema.door, &schema.board);
    let agents = assign_agents(&desk_grid.desks, schema.agent_id_prefix.trim());
    let routes = generate_routes(&agents, &resolved.anchors, &schema.route);

    let mut warnings = desk_grid.warnings;
    warnings.extend(resolved.warnings);

    log::info!(
        "Classroom {}×{}: {} desks ({}×{}), {} routes, {} warnings",
        room.width,
        room.depth,
        desk_grid.desks.len(),
        grid.rows,
        grid.columns(),
        routes.len(),
        warnings.len()
    );

    Ok(ClassroomLayout {
        room,
        grid,
        desks: desk_grid.desks,
        grid_bounds: bounds,
        anchors: resolved.anchors,
        agents,
        routes,
        warnings,
    })
}

/// Parse a JSON schema and generate its layout.
pub fn generate_layout_from_json(json: &str) -> Result<ClassroomLayout, LayoutError> {
    let schema = LayoutSchema::from_json(json)?;
    generate_layout(&schema)
}
