//! Perception: distance, field of view and line of sight

use crate::state_machine::AgentState;
use glam::Vec3;
use onslaught_core::{ObjectId, Role};
use onslaught_physics::{angle_between, RayQuery, RoleQuery, SpatialQuery};
use serde::{Deserialize, Serialize};

/// Sight parameters of a hostile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightConfig {
    /// Beyond this distance the player is undetected
    pub detection_radius: f32,
    /// Full cone angle in degrees
    pub field_of_view: f32,
    /// Height of the sight ray origin above the agent position
    pub eye_height: f32,
    /// Maximum distance to start shooting
    pub shooting_range: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            detection_radius: 30.0,
            field_of_view: 120.0,
            eye_height: 1.0,
            shooting_range: 10.0,
        }
    }
}

/// What a hostile perceived this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    /// Distance to the player
    pub distance: f32,
    /// Angle in degrees between forward and the direction to the player
    pub angle: f32,
    /// The sight ray reached the player
    pub line_of_sight: bool,
    /// State these readings select
    pub state: AgentState,
}

/// Select the behavioural state from raw readings
///
/// Detection radius is checked first and overrides everything else.
pub fn classify(
    distance: f32,
    angle: f32,
    line_of_sight: bool,
    shooting_range: f32,
    detection_radius: f32,
    field_of_view: f32,
) -> AgentState {
    if distance > detection_radius {
        return AgentState::Idle;
    }

    let sees_player = line_of_sight && angle <= field_of_view * 0.5;
    if distance <= shooting_range && sees_player {
        AgentState::Shooting
    } else {
        AgentState::Chasing
    }
}

/// Perceive the player from `position` facing `forward`
///
/// The sight ray is only cast when the player is inside the detection
/// radius and the view cone. It starts at eye height, ignores the agent
/// itself and confirms sight only if its first hit is the player.
pub fn perceive(
    agent: ObjectId,
    position: Vec3,
    forward: Vec3,
    player_position: Vec3,
    sight: &SightConfig,
    query: &dyn SpatialQuery,
    roles: &dyn RoleQuery,
) -> Perception {
    let to_player = player_position - position;
    let distance = to_player.length();
    let angle = angle_between(forward, to_player);

    let line_of_sight = distance <= sight.detection_radius
        && angle <= sight.field_of_view * 0.5
        && has_line_of_sight(agent, position, player_position, sight.eye_height, query, roles);

    Perception {
        distance,
        angle,
        line_of_sight,
        state: classify(
            distance,
            angle,
            line_of_sight,
            sight.shooting_range,
            sight.detection_radius,
            sight.field_of_view,
        ),
    }
}

fn has_line_of_sight(
    agent: ObjectId,
    position: Vec3,
    player_position: Vec3,
    eye_height: f32,
    query: &dyn SpatialQuery,
    roles: &dyn RoleQuery,
) -> bool {
    let eye = position + Vec3::Y * eye_height;
    let to_player = player_position - eye;
    let reach = to_player.length();
    if reach <= f32::EPSILON {
        return true;
    }

    let ray = RayQuery::new(eye, to_player)
        .with_max_distance(reach)
        .excluding(agent);

    query
        .raycast(&ray)
        .map(|hit| roles.has_role(hit.object, Role::Player))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught_physics::{ColliderShape, CollisionWorld};

    const AGENT: ObjectId = ObjectId::from_raw(1);
    const PLAYER: ObjectId = ObjectId::from_raw(2);
    const WALL: ObjectId = ObjectId::from_raw(3);

    #[test]
    fn test_out_of_radius_is_idle() {
        for angle in [0.0, 45.0, 170.0] {
            for sight in [true, false] {
                assert_eq!(classify(50.0, angle, sight, 10.0, 30.0, 120.0), AgentState::Idle);
            }
        }
    }

    #[test]
    fn test_in_range_with_sight_is_shooting() {
        assert_eq!(classify(5.0, 0.0, true, 10.0, 30.0, 120.0), AgentState::Shooting);
    }

    #[test]
    fn test_blocked_sight_is_chasing() {
        assert_eq!(classify(5.0, 0.0, false, 10.0, 30.0, 120.0), AgentState::Chasing);
    }

    #[test]
    fn test_outside_cone_is_chasing() {
        assert_eq!(classify(5.0, 61.0, true, 10.0, 30.0, 120.0), AgentState::Chasing);
        assert_eq!(classify(5.0, 60.0, true, 10.0, 30.0, 120.0), AgentState::Shooting);
    }

    #[test]
    fn test_out_of_range_is_chasing() {
        assert_eq!(classify(20.0, 0.0, true, 10.0, 30.0, 120.0), AgentState::Chasing);
    }

    fn world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world
            .add_actor(AGENT, Role::Hostile, ColliderShape::humanoid(), Vec3::ZERO)
            .unwrap();
        world
            .add_actor(PLAYER, Role::Player, ColliderShape::humanoid(), Vec3::new(0.0, 0.0, -5.0))
            .unwrap();
        world
    }

    #[test]
    fn test_perceive_clear_sight() {
        let world = world();
        let perception = perceive(
            AGENT,
            Vec3::ZERO,
            Vec3::NEG_Z,
            Vec3::new(0.0, 0.0, -5.0),
            &SightConfig::default(),
            &world,
            &world,
        );

        assert!(perception.line_of_sight);
        assert_eq!(perception.state, AgentState::Shooting);
    }

    #[test]
    fn test_perceive_obstacle_blocks_sight() {
        let mut world = world();
        world
            .add_obstacle(WALL, ColliderShape::Box { half_extents: [3.0, 3.0, 0.25] }, Vec3::new(0.0, 0.0, -2.5))
            .unwrap();

        let perception = perceive(
            AGENT,
            Vec3::ZERO,
            Vec3::NEG_Z,
            Vec3::new(0.0, 0.0, -5.0),
            &SightConfig::default(),
            &world,
            &world,
        );

        assert!(!perception.line_of_sight);
        assert_eq!(perception.state, AgentState::Chasing);
    }

    #[test]
    fn test_perceive_player_behind() {
        let world = world();
        let perception = perceive(
            AGENT,
            Vec3::ZERO,
            Vec3::Z,
            Vec3::new(0.0, 0.0, -5.0),
            &SightConfig::default(),
            &world,
            &world,
        );

        assert!(!perception.line_of_sight);
        assert_eq!(perception.state, AgentState::Chasing);
    }
}
