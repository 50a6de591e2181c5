//! Rapier adapter для SpatialQuery
//!
//! Категории маппятся 1:1 на rapier `Group` (bit N категории = bit N группы):
//! - membership коллайдера = его Category
//! - filter запроса = CategoryMask
//!
//! Rapier plugin (`RapierPhysicsPlugin`) подключает хост, не мы:
//! physics engine internals вне зоны ответственности сенсора.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{Candidate, RayHit, SpatialQuery};
use crate::categories::{Category, CategoryMask};

/// CollisionGroups для тела категории `category` (коллайдит со всеми)
pub fn collision_groups(category: Category) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(category.bits()), Group::ALL)
}

/// QueryFilter по маске категорий (sensor-коллайдеры не участвуют)
pub fn query_filter(mask: CategoryMask, exclude: Option<Entity>) -> QueryFilter<'static> {
    let mut filter = QueryFilter::new()
        .exclude_sensors()
        .groups(CollisionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(mask.bits()),
        ));
    if let Some(entity) = exclude {
        filter = filter.exclude_collider(entity);
    }
    filter
}

/// SpatialQuery поверх RapierContext
///
/// `positions`: позиция тела по Entity (overlap возвращает только Entity,
/// позицию кандидата берём из Transform).
pub struct RapierSpatialQuery<'a, 'c, F>
where
    F: Fn(Entity) -> Option<Vec3>,
{
    context: &'a RapierContext<'c>,
    positions: F,
}

impl<'a, 'c, F> RapierSpatialQuery<'a, 'c, F>
where
    F: Fn(Entity) -> Option<Vec3>,
{
    pub fn new(context: &'a RapierContext<'c>, positions: F) -> Self {
        Self { context, positions }
    }
}

impl<F> SpatialQuery for RapierSpatialQuery<'_, '_, F>
where
    F: Fn(Entity) -> Option<Vec3>,
{
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: CategoryMask) -> Vec<Candidate> {
        let shape = Collider::ball(radius);
        let mut candidates = Vec::new();

        self.context.intersect_shape(
            center,
            Quat::IDENTITY,
            &*shape.raw,
            query_filter(mask, None),
            |entity| {
                if let Some(position) = (self.positions)(entity) {
                    candidates.push(Candidate { entity, position });
                }
                true // продолжаем поиск
            },
        );

        // Порядок broad-phase не гарантирован между прогонами
        candidates.sort_by_key(|candidate| candidate.entity.index());
        candidates
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

        // solid = true: origin внутри коллайдера → hit на 0, как у SceneIndex.
        // Коллайдер наблюдателя исключён фильтром
        self.context
            .cast_ray(
                origin,
                direction,
                max_distance,
                true,
                query_filter(mask, exclude),
            )
            .map(|(entity, distance)| RayHit { entity, distance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_mirror_category_bits() {
        let groups = collision_groups(Category::Obstacle);
        assert_eq!(groups.memberships.bits(), Category::Obstacle.bits());
        assert_eq!(groups.filters, Group::ALL);
    }

    #[test]
    fn test_mask_bits_fit_into_groups() {
        let mask = Category::Target | Category::Obstacle;
        let group = Group::from_bits_truncate(mask.bits());
        assert_eq!(group.bits(), mask.bits());
    }
}
