//! Destination-following моторика
//!
//! NavigationAgent держит точку назначения и сам ведёт тело к ней по прямой
//! со своей скоростью. Планирования пути нет: один примитив "иди в точку".
//!
//! Пока цель видна, destination обновляется каждый тик (цель двигается).
//! Потеря цели → destination сброшен, агент тормозит до нуля.

use bevy::prelude::*;

use super::MotionStrategy;
use crate::components::{Agent, PhysicsBody};
use crate::error::{ensure_positive, ConfigError};
use crate::math::move_towards;

/// Коллаборатор "двигайся к точке"
pub trait PathFollower {
    fn set_destination(&mut self, position: Vec3);
    fn clear_destination(&mut self);
    fn destination(&self) -> Option<Vec3>;
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(Agent)]
pub struct NavigationAgent {
    /// Крейсерская скорость (m/s)
    pub speed: f32,
    /// Дистанция остановки до destination (метры)
    pub arrival_distance: f32,
    /// Торможение без destination (m/s²)
    pub deceleration: f32,
    destination: Option<Vec3>,
}

impl Default for NavigationAgent {
    fn default() -> Self {
        Self {
            speed: 3.5,
            arrival_distance: 1.0,
            deceleration: 8.0,
            destination: None,
        }
    }
}

impl NavigationAgent {
    pub fn new(speed: f32, arrival_distance: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            speed: ensure_positive("speed", speed)?,
            arrival_distance: ensure_positive("arrival_distance", arrival_distance)?,
            ..default()
        })
    }

    pub fn with_deceleration(mut self, deceleration: f32) -> Result<Self, ConfigError> {
        self.deceleration = ensure_positive("deceleration", deceleration)?;
        Ok(self)
    }

    /// Дошли (или идти некуда)
    pub fn is_navigation_finished(&self, position: Vec3) -> bool {
        self.destination
            .is_none_or(|destination| position.distance(destination) <= self.arrival_distance)
    }

    /// Скорость на этот шаг
    ///
    /// - destination дальше arrival_distance: прямо к нему, без перелёта за шаг
    /// - в пределах arrival_distance: стоп сразу
    /// - destination нет: торможение с `deceleration`
    pub fn next_velocity(&self, position: Vec3, velocity: Vec3, delta: f32) -> Vec3 {
        let Some(destination) = self.destination else {
            return move_towards(velocity, Vec3::ZERO, self.deceleration * delta);
        };

        let offset = destination - position;
        let distance = offset.length();
        if distance <= self.arrival_distance {
            return Vec3::ZERO;
        }

        let step_limit = if delta > 0.0 {
            (distance - self.arrival_distance) / delta
        } else {
            self.speed
        };
        offset / distance * self.speed.min(step_limit)
    }
}

impl PathFollower for NavigationAgent {
    fn set_destination(&mut self, position: Vec3) {
        self.destination = Some(position);
    }

    fn clear_destination(&mut self) {
        self.destination = None;
    }

    fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}

impl MotionStrategy for NavigationAgent {
    /// Только обновляет destination, скорость считает `advance_navigation_agents`
    fn drive_toward(&mut self, _body: &mut PhysicsBody, _position: Vec3, target: Vec3, _delta: f32) {
        self.set_destination(target);
    }

    fn stop(&mut self, _body: &mut PhysicsBody, _delta: f32) {
        self.clear_destination();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_moves_straight_at_speed() {
        let mut agent = NavigationAgent::new(3.0, 1.0).unwrap();
        agent.set_destination(Vec3::new(10.0, 0.0, 0.0));

        let velocity = agent.next_velocity(Vec3::ZERO, Vec3::ZERO, DT);
        assert!((velocity - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_stops_within_arrival_distance() {
        let mut agent = NavigationAgent::new(3.0, 1.0).unwrap();
        agent.set_destination(Vec3::new(0.5, 0.0, 0.0));

        assert!(agent.is_navigation_finished(Vec3::ZERO));
        assert_eq!(agent.next_velocity(Vec3::ZERO, Vec3::X * 3.0, DT), Vec3::ZERO);
    }

    #[test]
    fn test_does_not_overshoot_arrival_ring() {
        let mut agent = NavigationAgent::new(100.0, 1.0).unwrap();
        agent.set_destination(Vec3::new(2.0, 0.0, 0.0));

        let velocity = agent.next_velocity(Vec3::ZERO, Vec3::ZERO, DT);
        let next_position = velocity * DT;
        assert!((next_position.x - 1.0).abs() < 1e-4, "x = {}", next_position.x);
    }

    #[test]
    fn test_decelerates_without_destination() {
        let agent = NavigationAgent::default();
        assert!(agent.is_navigation_finished(Vec3::ZERO));

        let mut velocity = Vec3::X * 4.0;
        velocity = agent.next_velocity(Vec3::ZERO, velocity, 0.25);
        assert!((velocity.x - 2.0).abs() < 1e-5);
        velocity = agent.next_velocity(Vec3::ZERO, velocity, 0.25);
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_strategy_sets_and_clears_destination() {
        let mut agent = NavigationAgent::default();
        let mut body = PhysicsBody::default();

        agent.drive_toward(&mut body, Vec3::ZERO, Vec3::new(0.0, 0.0, 7.0), DT);
        assert_eq!(agent.destination(), Some(Vec3::new(0.0, 0.0, 7.0)));
        assert_eq!(body.velocity, Vec3::ZERO);

        agent.stop(&mut body, DT);
        assert_eq!(agent.destination(), None);
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            NavigationAgent::new(0.0, 1.0),
            Err(ConfigError::NonPositive { field: "speed", .. })
        ));
        assert!(matches!(
            NavigationAgent::new(3.0, -1.0),
            Err(ConfigError::NonPositive { field: "arrival_distance", .. })
        ));
        assert!(NavigationAgent::default().with_deceleration(0.0).is_err());
    }
}
