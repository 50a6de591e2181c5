//! Headless spatial index
//!
//! Пересобирается из `Transform + SceneCollider` в начале Perception фазы.
//! Тела отсортированы по Entity index: порядок кандидатов детерминирован
//! между прогонами с одинаковым спавном.

use bevy::prelude::*;

use super::{Candidate, RayHit, SpatialQuery};
use crate::categories::{Category, CategoryMask};
use crate::components::{ColliderShape, SceneCollider};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedBody {
    pub entity: Entity,
    pub position: Vec3,
    pub shape: ColliderShape,
    pub category: Category,
}

/// Снимок тел сцены на текущий тик
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneIndex {
    bodies: Vec<IndexedBody>,
}

impl SceneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Тела в порядке вставки (без сортировки)
    pub fn from_bodies(bodies: impl IntoIterator<Item = IndexedBody>) -> Self {
        Self {
            bodies: bodies.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, body: IndexedBody) {
        self.bodies.push(body);
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[IndexedBody] {
        &self.bodies
    }

    pub fn get(&self, entity: Entity) -> Option<&IndexedBody> {
        self.bodies.iter().find(|body| body.entity == entity)
    }
}

impl SpatialQuery for SceneIndex {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: CategoryMask) -> Vec<Candidate> {
        self.bodies
            .iter()
            .filter(|body| mask.contains(body.category))
            .filter(|body| body.shape.overlaps_sphere(body.position, center, radius))
            .map(|body| Candidate {
                entity: body.entity,
                position: body.position,
            })
            .collect()
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: CategoryMask,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;

        let mut nearest: Option<RayHit> = None;
        for body in &self.bodies {
            if !mask.contains(body.category) || Some(body.entity) == exclude {
                continue;
            }

            let Some(distance) = body.shape.ray_entry(body.position, origin, direction) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }

            // Строгое `<`: при равной дистанции побеждает тело раньше в индексе
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    entity: body.entity,
                    distance,
                });
            }
        }

        nearest
    }
}

/// Система: пересборка SceneIndex из ECS
///
/// Первая в Perception фазе: сенсор видит позиции после интеграции прошлого тика.
pub fn rebuild_scene_index(
    mut index: ResMut<SceneIndex>,
    bodies: Query<(Entity, &Transform, &SceneCollider)>,
) {
    index.clear();

    let mut sorted: Vec<_> = bodies.iter().collect();
    sorted.sort_by_key(|(entity, _, _)| entity.index());

    for (entity, transform, collider) in sorted {
        index.insert(IndexedBody {
            entity,
            position: transform.translation,
            shape: collider.shape,
            category: collider.category,
        });
    }
}
