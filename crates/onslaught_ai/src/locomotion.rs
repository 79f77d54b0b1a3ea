//! Locomotion collaborator
//!
//! Hostiles only steer through this interface. Pathfinding and physics
//! integration belong to the implementation.

use glam::{Quat, Vec3};

/// Narrow move/velocity interface to a character controller
pub trait Locomotion {
    /// Move toward `destination`
    fn set_destination(&mut self, destination: Vec3);
    /// Halt movement, keeping the destination
    fn stop(&mut self);
    /// Continue toward the destination
    fn resume(&mut self);
    fn is_stopped(&self) -> bool;
    fn is_grounded(&self) -> bool;
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    /// A disabled controller ignores every movement request
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
    fn position(&self) -> Vec3;
    /// Teleport
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    /// Integrate movement for one tick
    fn update(&mut self, delta_time: f32);

    /// Facing direction
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

/// Straight-line mover on the horizontal plane
#[derive(Debug, Clone)]
pub struct KinematicLocomotion {
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    destination: Option<Vec3>,
    /// Movement speed
    pub speed: f32,
    /// Arrival threshold
    pub arrival_threshold: f32,
    stopped: bool,
    enabled: bool,
}

impl KinematicLocomotion {
    /// Create a mover at `position`
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            destination: None,
            speed,
            arrival_threshold: 0.5,
            stopped: false,
            enabled: true,
        }
    }

    /// Set initial facing
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Current destination, if any
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}

impl Locomotion for KinematicLocomotion {
    fn set_destination(&mut self, destination: Vec3) {
        if self.enabled {
            self.destination = Some(destination);
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn resume(&mut self) {
        if self.enabled {
            self.stopped = false;
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn is_grounded(&self) -> bool {
        true
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stopped = true;
            self.velocity = Vec3::ZERO;
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn update(&mut self, delta_time: f32) {
        if !self.enabled || self.stopped {
            self.velocity = Vec3::ZERO;
            return;
        }

        let Some(destination) = self.destination else {
            self.velocity = Vec3::ZERO;
            return;
        };

        let mut offset = destination - self.position;
        offset.y = 0.0;
        let distance = offset.length();

        if distance < self.arrival_threshold {
            self.velocity = Vec3::ZERO;
            return;
        }

        let direction = offset / distance;
        let step = (self.speed * delta_time).min(distance);
        self.velocity = direction * self.speed;
        self.position += direction * step;
        self.rotation = Quat::from_rotation_y((-direction.x).atan2(-direction.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moves_toward_destination() {
        let mut mover = KinematicLocomotion::new(Vec3::ZERO, 5.0);
        mover.set_destination(Vec3::new(10.0, 0.0, 0.0));

        mover.update(1.0);
        assert_relative_eq!(mover.position().x, 5.0);
        assert_relative_eq!(mover.velocity().length(), 5.0);
        assert_relative_eq!(mover.forward().x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_arrival() {
        let mut mover = KinematicLocomotion::new(Vec3::ZERO, 10.0);
        mover.set_destination(Vec3::new(1.0, 0.0, 0.0));

        for _ in 0..10 {
            mover.update(0.1);
        }
        assert!(mover.position().x <= 1.0);
        assert!(mover.position().x >= 0.5);
        assert_eq!(mover.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_stop_and_resume() {
        let mut mover = KinematicLocomotion::new(Vec3::ZERO, 5.0);
        mover.set_destination(Vec3::new(0.0, 0.0, -10.0));
        mover.stop();
        mover.update(1.0);
        assert_eq!(mover.position(), Vec3::ZERO);

        mover.resume();
        mover.update(1.0);
        assert_relative_eq!(mover.position().z, -5.0);
    }

    #[test]
    fn test_disabled_ignores_requests() {
        let mut mover = KinematicLocomotion::new(Vec3::ZERO, 5.0);
        mover.set_enabled(false);
        mover.set_destination(Vec3::new(10.0, 0.0, 0.0));
        mover.resume();
        mover.update(1.0);
        assert_eq!(mover.position(), Vec3::ZERO);
        assert!(mover.is_stopped());
    }
}
