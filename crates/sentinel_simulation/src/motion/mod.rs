//! Motion domain: куда двигать агента по результату detection
//!
//! Содержит:
//! - MotionStrategy (общий интерфейс моторики)
//! - SeekController (variant A: force-based seek + damping)
//! - NavigationAgent (variant B: destination-following, PathFollower)
//! - Motion / Integration системы
//!
//! Политика потери цели одна на оба варианта: агент останавливается.

use bevy::prelude::*;

use crate::components::PhysicsBody;

pub mod navigation;
pub mod seek;
pub mod systems;


pub use navigation::*;
pub use seek::*;
pub use systems::*;

/// Моторика агента: один вызов на тик
///
/// Detection есть → `drive_toward(target)`, нет → `stop()`.
pub trait MotionStrategy {
    /// Двигаться к позиции цели
    fn drive_toward(&mut self, body: &mut PhysicsBody, position: Vec3, target: Vec3, delta: f32);

    /// Цели нет: гасим движение
    fn stop(&mut self, body: &mut PhysicsBody, delta: f32);
}
