//! Force-based seek
//!
//! Классический steering: desired velocity на цель, сила = desired − velocity,
//! обрезанная до max_force. После интеграции скорость обрезается до max_speed.

use bevy::prelude::*;

use super::MotionStrategy;
use crate::components::{Agent, PhysicsBody};
use crate::error::{ensure_positive, ConfigError};
use crate::math::clamp_magnitude;

/// Seek контроллер (параметры designer-set)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(Agent)]
pub struct SeekController {
    /// Максимальная скорость (m/s)
    pub max_speed: f32,
    /// Максимальная steering сила (N)
    pub max_force: f32,
    /// Множитель скорости за шаг без цели, (0, 1)
    pub damping: f32,
}

impl Default for SeekController {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            max_force: 10.0,
            damping: 0.95,
        }
    }
}

impl SeekController {
    pub fn new(max_speed: f32, max_force: f32, damping: f32) -> Result<Self, ConfigError> {
        if !(damping > 0.0 && damping < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "damping",
                value: damping,
                min: 0.0,
                max: 1.0,
            });
        }

        Ok(Self {
            max_speed: ensure_positive("max_speed", max_speed)?,
            max_force: ensure_positive("max_force", max_force)?,
            damping,
        })
    }
}

/// Steering сила seek
///
/// `|result| <= max_force` для любых входов. Цель в точке агента → desired = 0
/// (сила только гасит текущую скорость).
pub fn compute_steering_force(
    position: Vec3,
    velocity: Vec3,
    target: Vec3,
    max_speed: f32,
    max_force: f32,
) -> Vec3 {
    let desired = (target - position).normalize_or_zero() * max_speed;
    clamp_magnitude(desired - velocity, max_force)
}

/// velocity += a·dt, затем post-force clamp до max_speed
pub fn integrate_force(
    velocity: Vec3,
    acceleration: Vec3,
    max_speed: f32,
    delta: f32,
) -> Vec3 {
    clamp_magnitude(velocity + acceleration * delta, max_speed)
}

/// Геометрическое затухание (за шаг, не за секунду)
pub fn damp_velocity(velocity: Vec3, damping: f32) -> Vec3 {
    velocity * damping
}

impl MotionStrategy for SeekController {
    fn drive_toward(&mut self, body: &mut PhysicsBody, position: Vec3, target: Vec3, delta: f32) {
        let force = compute_steering_force(
            position,
            body.velocity,
            target,
            self.max_speed,
            self.max_force,
        );
        body.velocity = integrate_force(
            body.velocity,
            body.acceleration(force),
            self.max_speed,
            delta,
        );
    }

    fn stop(&mut self, body: &mut PhysicsBody, _delta: f32) {
        body.velocity = damp_velocity(body.velocity, self.damping);
    }
}
