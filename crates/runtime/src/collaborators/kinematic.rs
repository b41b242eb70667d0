//! Minimal point-mass mover.

use combat_core::Vec3;

use super::Locomotion;

/// Moves in a straight line toward its destination on every physics step.
#[derive(Debug, Clone)]
pub struct Kinematic {
    position: Vec3,
    facing: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    enabled: bool,
}

impl Kinematic {
    /// Distance under which a destination counts as reached.
    pub const ARRIVAL_TOLERANCE: f32 = 0.05;

    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            facing: Vec3::Z,
            destination: None,
            speed: 0.0,
            enabled: true,
        }
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Locomotion for Kinematic {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn facing(&self) -> Vec3 {
        self.facing
    }

    fn move_to(&mut self, target: Vec3, speed: f32) {
        if !self.enabled {
            return;
        }
        self.destination = Some(target);
        self.speed = speed;
    }

    fn stop(&mut self) {
        self.destination = None;
    }

    fn face(&mut self, point: Vec3) {
        if !self.enabled {
            return;
        }
        let flat = Vec3::new(point.x - self.position.x, 0.0, point.z - self.position.z);
        if let Some(dir) = flat.try_normalize() {
            self.facing = dir;
        }
    }

    fn displace(&mut self, offset: Vec3) {
        if self.enabled {
            self.position += offset;
        }
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map_or(0.0, |target| self.position.distance(target))
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.destination = None;
        }
    }

    fn step(&mut self, dt: f32) {
        let Some(target) = self.destination else {
            return;
        };
        let to_target = target - self.position;
        let distance = to_target.length();
        if distance <= Self::ARRIVAL_TOLERANCE {
            self.destination = None;
            return;
        }
        let travel = (self.speed * dt).min(distance);
        self.position += to_target / distance * travel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_toward_destination_and_arrives() {
        let mut body = Kinematic::new(Vec3::ZERO);
        body.move_to(Vec3::new(2.0, 0.0, 0.0), 1.0);
        body.step(1.0);
        assert_eq!(body.position(), Vec3::new(1.0, 0.0, 0.0));
        body.step(5.0);
        assert_eq!(body.position(), Vec3::new(2.0, 0.0, 0.0));
        body.step(0.1);
        assert_eq!(body.remaining_distance(), 0.0);
    }

    #[test]
    fn disabled_body_ignores_requests() {
        let mut body = Kinematic::new(Vec3::ZERO);
        body.set_enabled(false);
        body.move_to(Vec3::X, 1.0);
        body.displace(Vec3::X);
        body.step(1.0);
        assert_eq!(body.position(), Vec3::ZERO);
    }
}
