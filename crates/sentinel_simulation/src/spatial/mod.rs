//! Spatial Query Provider
//!
//! Сенсор спрашивает мир через два запроса:
//! - `overlap_sphere`: кандидаты внутри сферы (prefilter по категориям)
//! - `raycast`: первое тело вдоль луча (LOS проверка)
//!
//! Реализации:
//! - `SceneIndex`: headless, аналитические сферы/AABB из ECS (тесты, bin)
//! - `RapierSpatialQuery`: adapter поверх `bevy_rapier3d::RapierContext`

use bevy::prelude::*;

use crate::categories::CategoryMask;

pub mod rapier;
pub mod scene_index;


pub use rapier::{collision_groups, query_filter, RapierSpatialQuery};
pub use scene_index::{rebuild_scene_index, IndexedBody, SceneIndex};

/// Кандидат из overlap запроса (живёт один detection pass)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec3,
}

/// Первое попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    /// Дистанция от origin до поверхности (метры)
    pub distance: f32,
}

/// Интерфейс spatial запросов (внешний коллаборатор сенсора)
///
/// Порядок кандидатов implementation-defined, но стабилен для неизменной сцены:
/// сенсор берёт первого прошедшего все проверки.
pub trait SpatialQuery {
    /// Все тела категорий `mask`, пересекающие сферу
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: CategoryMask) -> Vec<Candidate>;

    /// Ближайшее тело категорий `mask` вдоль луча в пределах `max_distance`
    ///
    /// Тела solid: если origin внутри тела, это попадание на дистанции 0
    /// (наблюдатель, стоящий внутри цели, видит её; внутри препятствия не видит ничего).
    /// `exclude`: тело наблюдателя, его луч не видит никогда.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: CategoryMask,
        exclude: Option<Entity>,
    ) -> Option<RayHit>;
}
