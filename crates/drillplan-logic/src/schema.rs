//! Declarative classroom schema and its validation.
//!
//! The schema is the whole input to layout generation. Every field has a
//! default so partial JSON documents are accepted; range checks happen in
//! [`validate_schema`], which reports every violation at once.
//!
//! ```
//! use drillplan_logic::schema::{validate_schema, LayoutSchema};
//!
//! let schema = LayoutSchema::from_json(r#"{ "occupantCount": 8, "room": { "width": 12, "depth": 9, "height": 3 } }"#).unwrap();
//! assert_eq!(schema.grid().columns(), 4);
//! assert!(validate_schema(&schema).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::anchors::{BoardSpec, DoorSpec};
use crate::constants::{agents, grid as grid_consts, limits};
use crate::error::{LayoutError, SchemaError};
use crate::geometry::{RoomSpec, Vec3};
use crate::grid::GridSpec;
use crate::routes::{RouteKind, RouteSettings};

/// Full layout input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSchema {
    pub occupant_count: u32,
    /// Always 2 after [`LayoutSchema::normalized`].
    pub rows: u32,
    pub spacing_x: f32,
    pub spacing_z: f32,
    pub aisle_width: f32,
    pub room: RoomSpec,
    pub door: DoorSpec,
    pub board: BoardSpec,
    pub route: RouteSettings,
    pub agent_id_prefix: String,
}

impl Default for LayoutSchema {
    fn default() -> Self {
        let grid = GridSpec::default();
        Self {
            occupant_count: grid.occupant_count,
            rows: grid.rows,
            spacing_x: grid.spacing_x,
            spacing_z: grid.spacing_z,
            aisle_width: grid.aisle_width,
            room: RoomSpec::default(),
            door: DoorSpec::default(),
            board: BoardSpec::default(),
            route: RouteSettings::default(),
            agent_id_prefix: agents::DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl LayoutSchema {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Copy with `rows` forced to the two-row classroom rule.
    pub fn normalized(&self) -> Self {
        let mut schema = self.clone();
        if schema.rows != grid_consts::ROWS {
            log::debug!(
                "rows={} overridden to {}",
                schema.rows,
                grid_consts::ROWS
            );
            schema.rows = grid_consts::ROWS;
        }
        schema
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec {
            rows: self.rows,
            spacing_x: self.spacing_x,
            spacing_z: self.spacing_z,
            aisle_width: self.aisle_width,
            occupant_count: self.occupant_count,
        }
    }
}

fn check_range(value: f32, min: f32, max: f32) -> bool {
    // NaN fails `contains`, which is what we want.
    (min..=max).contains(&value)
}

fn check_vector(name: &'static str, v: Option<Vec3>, errors: &mut Vec<SchemaError>) {
    if let Some(v) = v {
        if !v.is_finite() {
            errors.push(SchemaError::NonFiniteVector(name));
        }
    }
}

/// Validate a schema, returning all errors found.
///
/// `rows` is not checked: any value is overridden to 2 before generation.
pub fn validate_schema(schema: &LayoutSchema) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    let n = schema.occupant_count;
    if !(limits::OCCUPANTS_MIN..=limits::OCCUPANTS_MAX).contains(&n) {
        errors.push(SchemaError::OccupantCountOutOfRange(n));
    }
    if n % 2 != 0 {
        errors.push(SchemaError::OccupantCountOdd(n));
    }

    if !check_range(schema.spacing_x, limits::SPACING_MIN, limits::SPACING_MAX) {
        errors.push(SchemaError::SpacingXOutOfRange(schema.spacing_x));
    }
    if !check_range(schema.spacing_z, limits::SPACING_MIN, limits::SPACING_MAX) {
        errors.push(SchemaError::SpacingZOutOfRange(schema.spacing_z));
    }
    if !check_range(schema.aisle_width, limits::AISLE_MIN, limits::AISLE_MAX) {
        errors.push(SchemaError::AisleWidthOutOfRange(schema.aisle_width));
    }

    let room = &schema.room;
    if !check_range(room.width, limits::ROOM_SIDE_MIN, limits::ROOM_SIDE_MAX) {
        errors.push(SchemaError::RoomWidthOutOfRange(room.width));
    }
    if !check_range(room.depth, limits::ROOM_SIDE_MIN, limits::ROOM_SIDE_MAX) {
        errors.push(SchemaError::RoomDepthOutOfRange(room.depth));
    }
    if !check_range(room.height, limits::ROOM_HEIGHT_MIN, limits::ROOM_HEIGHT_MAX) {
        errors.push(SchemaError::RoomHeightOutOfRange(room.height));
    }

    let route = &schema.route;
    for (field, value) in [
        ("escapeSpeed", route.escape_speed),
        ("returnSpeed", route.return_speed),
        ("rotationSpeed", route.rotation_speed),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(SchemaError::NonPositiveSpeed { field, value });
        }
    }
    if !(route.waypoint_wait.is_finite() && route.waypoint_wait >= 0.0) {
        errors.push(SchemaError::NegativeWaypointWait(route.waypoint_wait));
    }

    check_vector("door.manualPosition", schema.door.manual_position, &mut errors);
    check_vector("board.manualPosition", schema.board.manual_position, &mut errors);
    check_vector("board.explicitSize", schema.board.explicit_size, &mut errors);
    check_vector("board.detectedSize", schema.board.detected_size, &mut errors);

    if schema.agent_id_prefix.trim().is_empty() {
        errors.push(SchemaError::EmptyAgentIdPrefix);
    } else if RouteKind::from_route_name(&schema.agent_id_prefix).is_some() {
        // Route names embed the agent id; a keyword here breaks classification.
        errors.push(SchemaError::AgentIdPrefixRouteKeyword(
            schema.agent_id_prefix.clone(),
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_valid() {
        let errors = validate_schema(&LayoutSchema::default());
        assert!(errors.is_empty(), "default schema should be valid: {errors:?}");
    }

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "occupantCount": 6,
            "rows": 2,
            "spacingX": 2.0,
            "spacingZ": 2.5,
            "aisleWidth": 1.5,
            "room": { "width": 10, "depth": 8, "height": 3 },
            "door": { "manualPosition": { "x": -3.0, "y": 0.0, "z": 4.0 } },
            "board": {
                "manualPosition": { "x": 0.0, "y": 1.5, "z": -3.0 },
                "explicitSize": { "x": 4.0, "y": 1.2, "z": 0.2 }
            },
            "route": { "escapeSpeed": 3.5, "returnSpeed": 1.5, "isRunning": true },
            "agentIdPrefix": "Pupil"
        }"#;
        let schema = LayoutSchema::from_json(json).expect("parse");
        assert_eq!(schema.occupant_count, 6);
        assert_eq!(schema.room.depth, 8.0);
        assert_eq!(schema.door.manual_position, Some(Vec3::new(-3.0, 0.0, 4.0)));
        assert_eq!(schema.board.explicit_size.map(|s| s.z), Some(0.2));
        assert_eq!(schema.board.detected_size, None);
        assert_eq!(schema.route.escape_speed, 3.5);
        assert!(schema.route.is_running);
        assert!(!schema.route.is_looping);
        assert_eq!(schema.route.rotation_speed, RouteSettings::default().rotation_speed);
        assert_eq!(schema.agent_id_prefix, "Pupil");
    }

    #[test]
    fn test_parse_defaults_for_missing_sections() {
        let schema = LayoutSchema::from_json(r#"{ "occupantCount": 4 }"#).expect("parse");
        assert_eq!(schema.occupant_count, 4);
        assert_eq!(schema.room, RoomSpec::default());
        assert_eq!(schema.route, RouteSettings::default());
        assert_eq!(schema.door.manual_position, None);
    }

    #[test]
    fn test_parse_error() {
        let err = LayoutSchema::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
        let err = LayoutSchema::from_json(r#"{ "occupantCount": -4 }"#).unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }

    #[test]
    fn test_rows_normalized() {
        let schema = LayoutSchema {
            rows: 5,
            ..LayoutSchema::default()
        };
        assert_eq!(schema.normalized().rows, 2);
        assert!(validate_schema(&schema).is_empty());
    }

    #[test]
    fn test_occupant_count_rules() {
        for (n, expect_range, expect_odd) in [
            (2, true, false),
            (5, false, true),
            (11, true, true),
            (12, true, false),
            (4, false, false),
            (10, false, false),
        ] {
            let schema = LayoutSchema {
                occupant_count: n,
                ..LayoutSchema::default()
            };
            let errors = validate_schema(&schema);
            assert_eq!(
                errors.contains(&SchemaError::OccupantCountOutOfRange(n)),
                expect_range,
                "n={n}"
            );
            assert_eq!(errors.contains(&SchemaError::OccupantCountOdd(n)), expect_odd, "n={n}");
        }
    }

    #[test]
    fn test_errors_collected_together() {
        let schema = LayoutSchema {
            occupant_count: 3,
            spacing_x: 0.5,
            spacing_z: 6.0,
            aisle_width: 4.0,
            room: RoomSpec::new(4.0, 31.0, 1.0),
            ..LayoutSchema::default()
        };
        let errors = validate_schema(&schema);
        assert_eq!(errors.len(), 8, "{errors:?}");
        assert!(errors.contains(&SchemaError::SpacingXOutOfRange(0.5)));
        assert!(errors.contains(&SchemaError::RoomDepthOutOfRange(31.0)));
        assert!(errors.contains(&SchemaError::RoomHeightOutOfRange(1.0)));
    }

    #[test]
    fn test_nan_rejected() {
        let schema = LayoutSchema {
            spacing_x: f32::NAN,
            ..LayoutSchema::default()
        };
        let errors = validate_schema(&schema);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SchemaError::SpacingXOutOfRange(_)));
    }

    #[test]
    fn test_route_settings_checked() {
        let mut schema = LayoutSchema::default();
        schema.route.return_speed = 0.0;
        schema.route.waypoint_wait = -1.0;
        let errors = validate_schema(&schema);
        assert!(errors.contains(&SchemaError::NonPositiveSpeed {
            field: "returnSpeed",
            value: 0.0
        }));
        assert!(errors.contains(&SchemaError::NegativeWaypointWait(-1.0)));
    }

    #[test]
    fn test_non_finite_manual_position() {
        let mut schema = LayoutSchema::default();
        schema.door.manual_position = Some(Vec3::new(f32::INFINITY, 0.0, 4.0));
        let errors = validate_schema(&schema);
        assert_eq!(errors, vec![SchemaError::NonFiniteVector("door.manualPosition")]);
    }

    #[test]
    fn test_empty_prefix() {
        let schema = LayoutSchema {
            agent_id_prefix: "  ".to_string(),
            ..LayoutSchema::default()
        };
        assert!(validate_schema(&schema).contains(&SchemaError::EmptyAgentIdPrefix));
    }

    #[test]
    fn test_prefix_with_route_keyword_rejected() {
        for prefix in ["Escapee", "RETURNer", "fire_escape"] {
            let schema = LayoutSchema {
                agent_id_prefix: prefix.to_string(),
                ..LayoutSchema::default()
            };
            assert_eq!(
                validate_schema(&schema),
                vec![SchemaError::AgentIdPrefixRouteKeyword(prefix.to_string())],
                "prefix {prefix}"
            );
        }
        let schema = LayoutSchema {
            agent_id_prefix: "Pupil".to_string(),
            ..LayoutSchema::default()
        };
        assert!(validate_schema(&schema).is_empty());
    }
}
