//! Motion / Integration системы
//!
//! Системы:
//! - `update_motion::<M>`: Detection → drive_toward / stop (generic по моторике)
//! - `advance_navigation_agents`: destination → PhysicsBody.velocity
//! - `integrate_velocity`: velocity → Transform (+ поворот по движению)

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use super::{MotionStrategy, NavigationAgent};
use crate::components::{FaceMovement, PhysicsBody};
use crate::vision::{Detection, VisionSensor};

/// Система: моторика по результату detection
///
/// Цель видна и у неё есть Transform → drive_toward(позиция цели).
/// Иначе (нет цели, цель деспавнена) → stop().
pub fn update_motion<M>(
    mut agents: Query<(&Transform, &Detection, &mut M, &mut PhysicsBody), With<VisionSensor>>,
    targets: Query<&Transform>,
    time: Res<Time<Fixed>>,
) where
    M: MotionStrategy + Component<Mutability = Mutable>,
{
    let delta = time.timestep().as_secs_f32();

    for (transform, detection, mut motion, mut body) in agents.iter_mut() {
        let target_position = detection
            .target()
            .and_then(|target| targets.get(target).ok())
            .map(|target| target.translation);

        match target_position {
            Some(target) => motion.drive_toward(&mut body, transform.translation, target, delta),
            None => motion.stop(&mut body, delta),
        }
    }
}

/// Система: NavigationAgent ведёт тело к destination
///
/// Работает и без сенсора: destination можно выставить напрямую через PathFollower.
pub fn advance_navigation_agents(
    mut agents: Query<(&Transform, &NavigationAgent, &mut PhysicsBody)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    for (transform, agent, mut body) in agents.iter_mut() {
        body.velocity = agent.next_velocity(transform.translation, body.velocity, delta);
    }
}

/// Система: position += velocity * dt (headless, без Rapier)
pub fn integrate_velocity(
    mut query: Query<(&PhysicsBody, &mut Transform, Option<&FaceMovement>)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    for (body, mut transform, face) in query.iter_mut() {
        transform.translation += body.velocity * delta;

        let Some(face) = face else {
            continue;
        };
        if body.speed() <= face.min_speed {
            continue;
        }
        // Только горизонтальный поворот (Y up)
        let heading = Vec3::new(body.velocity.x, 0.0, body.velocity.z);
        if let Ok(direction) = Dir3::new(heading) {
            transform.look_to(direction, Dir3::Y);
        }
    }
}
