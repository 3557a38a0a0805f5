//! Error types for schema validation and layout generation.

use thiserror::Error;

/// A single schema field violation. Validation collects all of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("occupantCount {0} is outside 4–10")]
    OccupantCountOutOfRange(u32),

    #[error("occupantCount {0} must be even (two rows)")]
    OccupantCountOdd(u32),

    #[error("spacingX {0} is outside 1.0–5.0")]
    SpacingXOutOfRange(f32),

    #[error("spacingZ {0} is outside 1.0–5.0")]
    SpacingZOutOfRange(f32),

    #[error("aisleWidth {0} is outside 1.0–3.0")]
    AisleWidthOutOfRange(f32),

    #[error("room.width {0} is outside 5.0–30.0")]
    RoomWidthOutOfRange(f32),

    #[error("room.depth {0} is outside 5.0–30.0")]
    RoomDepthOutOfRange(f32),

    #[error("room.height {0} is outside 2.0–10.0")]
    RoomHeightOutOfRange(f32),

    #[error("route.{field} must be positive, got {value}")]
    NonPositiveSpeed { field: &'static str, value: f32 },

    #[error("route.waypointWait must be non-negative, got {0}")]
    NegativeWaypointWait(f32),

    #[error("{0} contains a non-finite component")]
    NonFiniteVector(&'static str),

    #[error("agentIdPrefix must not be empty")]
    EmptyAgentIdPrefix,

    #[error("agentIdPrefix {0:?} contains a route keyword (escape/return)")]
    AgentIdPrefixRouteKeyword(String),
}

/// Errors that stop layout generation. No partial output accompanies them.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid schema ({} problems): {}", .0.len(), join_errors(.0))]
    InvalidSchema(Vec<SchemaError>),

    #[error("schema JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
