//! Per-agent escape and return routes.
//!
//! Every agent gets two straight-line routes through the center aisle:
//!
//! ```text
//! escape:  Desk → Aisle → Door → Outside
//! return:  Outside → Door → Aisle → Desk
//! ```
//!
//! Downstream consumers pick routes by a case-insensitive substring match on
//! the route name ("escape" / "return"), so the naming scheme here is a
//! contract: routes are `{agentId}_EscapeRoute` / `{agentId}_ReturnRoute`,
//! waypoints are `{agentId}_{Escape|Return}_{NN}_{label}`.
//!
//! Door and outside waypoints are created per agent. They share a position
//! with the anchor but carry their own name and wait time.

use serde::{Deserialize, Serialize};

use crate::anchors::AnchorSet;
use crate::constants::{agents as agent_consts, routes as consts};
use crate::geometry::Vec3;
use crate::grid::DeskSlot;

/// An occupant bound to one desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub desk: DeskSlot,
}

/// One agent per desk, in desk order, ids `{prefix}_{n:02}` starting at 1.
pub fn assign_agents(desks: &[DeskSlot], id_prefix: &str) -> Vec<Agent> {
    let prefix = if id_prefix.is_empty() {
        agent_consts::DEFAULT_ID_PREFIX
    } else {
        id_prefix
    };
    desks
        .iter()
        .enumerate()
        .map(|(i, desk)| Agent {
            id: format!("{}_{:02}", prefix, i + 1),
            desk: desk.clone(),
        })
        .collect()
}

/// Which direction a route runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKind {
    Escape,
    Return,
}

impl RouteKind {
    pub fn label(self) -> &'static str {
        match self {
            RouteKind::Escape => "Escape",
            RouteKind::Return => "Return",
        }
    }

    /// Classify a route by name the way consumers do: case-insensitive
    /// substring, "escape" checked first.
    pub fn from_route_name(name: &str) -> Option<RouteKind> {
        let lower = name.to_lowercase();
        if lower.contains("escape") {
            Some(RouteKind::Escape)
        } else if lower.contains("return") {
            Some(RouteKind::Return)
        } else {
            None
        }
    }
}

/// Movement parameters copied onto every generated route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteSettings {
    pub escape_speed: f32,
    pub return_speed: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
    pub is_running: bool,
    pub is_looping: bool,
    pub is_ping_pong: bool,
    /// Seconds spent at each waypoint.
    pub waypoint_wait: f32,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            escape_speed: consts::ESCAPE_SPEED,
            return_speed: consts::RETURN_SPEED,
            rotation_speed: consts::ROTATION_SPEED,
            is_running: false,
            is_looping: false,
            is_ping_pong: false,
            waypoint_wait: 0.0,
        }
    }
}

/// A named point on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
    pub wait_duration: f32,
}

/// An ordered waypoint sequence. Order is traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub kind: RouteKind,
    pub agent_id: String,
    pub waypoints: Vec<Waypoint>,
    pub movement_speed: f32,
    pub rotation_speed: f32,
    pub is_running: bool,
    pub is_looping: bool,
    pub is_ping_pong: bool,
}

impl Route {
    pub fn start(&self) -> Option<Vec3> {
        self.waypoints.first().map(|w| w.position)
    }

    pub fn end(&self) -> Option<Vec3> {
        self.waypoints.last().map(|w| w.position)
    }

    /// Sum of straight-line leg lengths.
    pub fn path_length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|leg| leg[0].position.distance(leg[1].position))
            .sum()
    }

    /// Walking time plus waits, in seconds. Infinite if the route cannot move.
    pub fn estimated_duration(&self) -> f32 {
        let waits: f32 = self.waypoints.iter().map(|w| w.wait_duration).sum();
        if self.movement_speed <= 0.0 {
            return f32::INFINITY;
        }
        self.path_length() / self.movement_speed + waits
    }
}

/// Aisle point for an agent: the room's center line (x = 0), halfway between
/// the desk and the door along Z.
pub fn aisle_midpoint(desk: Vec3, door: Vec3) -> Vec3 {
    Vec3::new(0.0, desk.y, (desk.z + door.z) / 2.0)
}

fn build_route(
    agent_id: &str,
    kind: RouteKind,
    stops: [(Vec3, &str); consts::WAYPOINTS_PER_ROUTE],
    speed: f32,
    settings: &RouteSettings,
) -> Route {
    let waypoints = stops
        .iter()
        .enumerate()
        .map(|(i, (position, label))| Waypoint {
            name: format!("{}_{}_{:02}_{}", agent_id, kind.label(), i + 1, label),
            position: *position,
            wait_duration: settings.waypoint_wait,
        })
        .collect();

    Route {
        name: format!("{}_{}Route", agent_id, kind.label()),
        kind,
        agent_id: agent_id.to_string(),
        waypoints,
        movement_speed: speed,
        rotation_speed: settings.rotation_speed,
        is_running: settings.is_running,
        is_looping: settings.is_looping,
        is_ping_pong: settings.is_ping_pong,
    }
}

/// Escape and return routes for every agent, escape first, in agent order.
pub fn generate_routes(
    agents: &[Agent],
    anchors: &AnchorSet,
    settings: &RouteSettings,
) -> Vec<Route> {
    let mut routes = Vec::with_capacity(agents.len() * 2);
    for agent in agents {
        let desk = agent.desk.center;
        let aisle = aisle_midpoint(desk, anchors.door);

        routes.push(build_route(
            &agent.id,
            RouteKind::Escape,
            [
                (desk, "Desk"),
                (aisle, "Aisle"),
                (anchors.door, "Door"),
                (anchors.outside, "Outside"),
            ],
            settings.escape_speed,
            settings,
        ));
        routes.push(build_route(
            &agent.id,
            RouteKind::Return,
            [
                (anchors.outside, "Outside"),
                (anchors.door, "Door"),
                (aisle, "Aisle"),
                (desk, "Desk"),
            ],
            settings.return_speed,
            settings,
        ));
    }
    log::debug!("Generated {} routes for {} agents", routes.len(), agents.len());
    routes
}

/// Look up an agent's route. The agent is matched exactly; the kind is read
/// from the route name, the way consumers classify routes.
pub fn find_route<'a>(routes: &'a [Route], agent_id: &str, kind: RouteKind) -> Option<&'a Route> {
    routes
        .iter()
        .find(|r| r.agent_id == agent_id && RouteKind::from_route_name(&r.name) == Some(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> AnchorSet {
        AnchorSet {
            door: Vec3::new(1.0, 0.0, 4.0),
            board: Vec3::new(0.0, 1.5, -3.95),
            outside: Vec3::new(1.0, 0.0, 6.0),
        }
    }

    fn desks() -> Vec<DeskSlot> {
        vec![
            DeskSlot::new(0, 0, Vec3::new(-2.0, 0.0, -2.0)),
            DeskSlot::new(0, 1, Vec3::new(0.0, 0.0, -2.0)),
            DeskSlot::new(1, 0, Vec3::new(-2.0, 0.0, 2.0)),
        ]
    }

    #[test]
    fn test_assign_agents() {
        let agents = assign_agents(&desks(), "Student");
        assert_eq!(agents.len(), 3);
        assert_eq!(agents[0].id, "Student_01");
        assert_eq!(agents[2].id, "Student_03");
        assert_eq!(agents[2].desk.id, "Desk_1_0");
    }

    #[test]
    fn test_assign_agents_empty_prefix_uses_default() {
        let agents = assign_agents(&desks(), "");
        assert_eq!(agents[0].id, "Student_01");
    }

    #[test]
    fn test_two_routes_per_agent() {
        let agents = assign_agents(&desks(), "Student");
        let routes = generate_routes(&agents, &anchors(), &RouteSettings::default());
        assert_eq!(routes.len(), 6);
        assert_eq!(routes[0].kind, RouteKind::Escape);
        assert_eq!(routes[1].kind, RouteKind::Return);
        assert_eq!(routes[0].name, "Student_01_EscapeRoute");
        assert_eq!(routes[1].name, "Student_01_ReturnRoute");
    }

    #[test]
    fn test_escape_waypoints() {
        let agents = assign_agents(&desks(), "Student");
        let routes = generate_routes(&agents, &anchors(), &RouteSettings::default());
        let escape = &routes[0];
        let names: Vec<&str> = escape.waypoints.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Student_01_Escape_01_Desk",
                "Student_01_Escape_02_Aisle",
                "Student_01_Escape_03_Door",
                "Student_01_Escape_04_Outside",
            ]
        );
        assert_eq!(escape.start(), Some(Vec3::new(-2.0, 0.0, -2.0)));
        assert_eq!(escape.end(), Some(anchors().outside));
        // aisle: x forced to 0, z halfway between desk (-2) and door (4)
        assert_eq!(escape.waypoints[1].position, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_return_is_reverse_of_escape() {
        let agents = assign_agents(&desks(), "Student");
        let routes = generate_routes(&agents, &anchors(), &RouteSettings::default());
        for pair in routes.chunks(2) {
            let escape: Vec<Vec3> = pair[0].waypoints.iter().map(|w| w.position).collect();
            let mut ret: Vec<Vec3> = pair[1].waypoints.iter().map(|w| w.position).collect();
            ret.reverse();
            assert_eq!(escape, ret);
        }
        let names: Vec<&str> = routes[1].waypoints.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Student_01_Return_01_Outside",
                "Student_01_Return_02_Door",
                "Student_01_Return_03_Aisle",
                "Student_01_Return_04_Desk",
            ]
        );
    }

    #[test]
    fn test_door_waypoints_are_per_agent() {
        let agents = assign_agents(&desks(), "Student");
        let routes = generate_routes(&agents, &anchors(), &RouteSettings::default());
        let doors: Vec<&Waypoint> = routes
            .iter()
            .filter(|r| r.kind == RouteKind::Escape)
            .map(|r| &r.waypoints[2])
            .collect();
        assert_eq!(doors.len(), 3);
        assert!(doors.iter().all(|w| w.position == anchors().door));
        let unique: std::collections::HashSet<&str> =
            doors.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_settings_applied() {
        let settings = RouteSettings {
            is_running: true,
            waypoint_wait: 0.5,
            ..RouteSettings::default()
        };
        let agents = assign_agents(&desks(), "Student");
        let routes = generate_routes(&agents, &anchors(), &settings);
        assert_eq!(routes[0].movement_speed, 3.0);
        assert_eq!(routes[1].movement_speed, 2.0);
        assert!(routes.iter().all(|r| r.is_running && !r.is_looping && !r.is_ping_pong));
        assert!(routes
            .iter()
            .flat_map(|r| r.waypoints.iter())
            .all(|w| w.wait_duration == 0.5));
    }

    #[test]
    fn test_route_kind_from_name() {
        assert_eq!(
            RouteKind::from_route_name("Student_01_EscapeRoute"),
            Some(RouteKind::Escape)
        );
        assert_eq!(
            RouteKind::from_route_name("student_01_RETURNroute"),
            Some(RouteKind::Return)
        );
        assert_eq!(RouteKind::from_route_name("Student_01_Patrol"), None);
    }

    #[test]
    fn test_find_route() {
        let desks: Vec<DeskSlot> = (0..10)
            .map(|i| DeskSlot::new(i / 5, i % 5, Vec3::new(i as f32, 0.0, -2.0)))
            .collect();
        let agents = assign_agents(&desks, "Student");
        let routes = generate_routes(&agents, &anchors(), &RouteSettings::default());
        let r = find_route(&routes, "Student_10", RouteKind::Return).expect("route");
        assert_eq!(r.name, "Student_10_ReturnRoute");
        let r = find_route(&routes, "Student_01", RouteKind::Escape).expect("route");
        assert_eq!(r.agent_id, "Student_01");
        assert!(find_route(&routes, "Student_11", RouteKind::Escape).is_none());
    }

    #[test]
    fn test_find_route_does_not_match_longer_agent_id() {
        // Prefix "Student_01" yields "Student_01_01", "Student_01_02", ...
        let agents = assign_agents(&desks(), "Student_01");
        let routes = generate_routes(&agents, &anchors(), &RouteSettings::default());
        assert!(find_route(&routes, "Student_01", RouteKind::Escape).is_none());
        let r = find_route(&routes, "Student_01_02", RouteKind::Return).expect("route");
        assert_eq!(r.agent_id, "Student_01_02");
        assert_eq!(r.name, "Student_01_02_ReturnRoute");
    }

    #[test]
    fn test_path_length_and_duration() {
        let agents = assign_agents(&desks()[1..2], "Student");
        let routes = generate_routes(&agents, &anchors(), &RouteSettings::default());
        let escape = &routes[0];
        // desk (0,-2) → aisle (0,1) → door (1,4) → outside (1,6)
        let expected = 3.0 + (1.0f32 + 9.0).sqrt() + 2.0;
        assert!((escape.path_length() - expected).abs() < 1e-4);
        assert!((escape.estimated_duration() - expected / 3.0).abs() < 1e-4);
        assert!((routes[1].path_length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_zero_speed_duration_infinite() {
        let settings = RouteSettings {
            escape_speed: 0.0,
            ..RouteSettings::default()
        };
        let agents = assign_agents(&desks(), "Student");
        let routes = generate_routes(&agents, &anchors(), &settings);
        assert!(routes[0].estimated_duration().is_infinite());
    }
}
