//! Коллайдеры тел сцены для headless spatial index
//!
//! Rapier в headless режиме не нужен: SceneIndex строится из
//! `Transform + SceneCollider` каждый тик и отвечает на overlap/raycast
//! аналитически (сферы и AABB).

use bevy::prelude::*;

use crate::categories::Category;

/// Форма коллайдера (в локальных координатах, без поворота)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    /// Axis-aligned box (поворот Transform игнорируется)
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    pub fn ball(radius: f32) -> Self {
        ColliderShape::Sphere { radius }
    }

    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        ColliderShape::Cuboid {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    /// Точка origin внутри формы с центром в `center`
    pub fn contains(&self, center: Vec3, point: Vec3) -> bool {
        match *self {
            ColliderShape::Sphere { radius } => point.distance_squared(center) < radius * radius,
            ColliderShape::Cuboid { half_extents } => {
                let local = (point - center).abs();
                local.x < half_extents.x && local.y < half_extents.y && local.z < half_extents.z
            }
        }
    }

    /// Пересекается ли форма со сферой (касание считается пересечением)
    pub fn overlaps_sphere(&self, center: Vec3, sphere_center: Vec3, sphere_radius: f32) -> bool {
        match *self {
            ColliderShape::Sphere { radius } => {
                let reach = radius + sphere_radius;
                center.distance_squared(sphere_center) <= reach * reach
            }
            ColliderShape::Cuboid { half_extents } => {
                let closest = sphere_center.clamp(center - half_extents, center + half_extents);
                closest.distance_squared(sphere_center) <= sphere_radius * sphere_radius
            }
        }
    }

    /// Дистанция входа луча в форму (direction нормализован)
    ///
    /// None если луч не попадает или форма целиком позади origin.
    /// Solid: origin внутри формы → попадание на дистанции 0 (как `solid = true` у Rapier).
    pub fn ray_entry(&self, center: Vec3, origin: Vec3, direction: Vec3) -> Option<f32> {
        if self.contains(center, origin) {
            return Some(0.0);
        }

        match *self {
            ColliderShape::Sphere { radius } => {
                let offset = origin - center;
                let b = offset.dot(direction);
                let c = offset.length_squared() - radius * radius;
                let discriminant = b * b - c;
                if discriminant < 0.0 {
                    return None;
                }
                let t = -b - discriminant.sqrt();
                (t >= 0.0).then_some(t)
            }
            ColliderShape::Cuboid { half_extents } => {
                let min = center - half_extents;
                let max = center + half_extents;
                let mut t_near = f32::NEG_INFINITY;
                let mut t_far = f32::INFINITY;

                for axis in 0..3 {
                    let o = origin[axis];
                    let d = direction[axis];
                    if d.abs() <= f32::EPSILON {
                        // Параллельно slab'у: либо внутри по этой оси, либо мимо
                        if o < min[axis] || o > max[axis] {
                            return None;
                        }
                        continue;
                    }
                    let t1 = (min[axis] - o) / d;
                    let t2 = (max[axis] - o) / d;
                    t_near = t_near.max(t1.min(t2));
                    t_far = t_far.min(t1.max(t2));
                }

                (t_near <= t_far && t_near >= 0.0).then_some(t_near)
            }
        }
    }
}

/// Тело сцены, видимое для spatial queries
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(Transform)]
pub struct SceneCollider {
    pub shape: ColliderShape,
    pub category: Category,
}

impl SceneCollider {
    pub fn new(shape: ColliderShape, category: Category) -> Self {
        Self { shape, category }
    }

    pub fn ball(radius: f32, category: Category) -> Self {
        Self::new(ColliderShape::ball(radius), category)
    }

    pub fn cuboid(half_extents: Vec3, category: Category) -> Self {
        Self::new(ColliderShape::Cuboid { half_extents }, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_overlap_touching() {
        let shape = ColliderShape::ball(0.5);
        // Центр на 10.5, радиус 0.5 → касается сферы радиуса 10
        assert!(shape.overlaps_sphere(Vec3::new(0.0, 0.0, 10.5), Vec3::ZERO, 10.0));
        assert!(!shape.overlaps_sphere(Vec3::new(0.0, 0.0, 10.6), Vec3::ZERO, 10.0));
    }

    #[test]
    fn test_cuboid_overlap() {
        let shape = ColliderShape::cuboid(1.0, 1.0, 1.0);
        assert!(shape.overlaps_sphere(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO, 3.0));
        assert!(!shape.overlaps_sphere(Vec3::new(0.0, 0.0, 4.5), Vec3::ZERO, 3.0));
    }

    #[test]
    fn test_sphere_ray_entry() {
        let shape = ColliderShape::ball(0.5);
        let t = shape.ray_entry(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Z).unwrap();
        assert!((t - 4.5).abs() < 1e-5);

        // Мимо
        assert_eq!(shape.ray_entry(Vec3::new(2.0, 0.0, 5.0), Vec3::ZERO, Vec3::Z), None);
        // Позади
        assert_eq!(shape.ray_entry(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Z), None);
    }

    #[test]
    fn test_cuboid_ray_entry() {
        let shape = ColliderShape::cuboid(0.5, 1.0, 0.5);
        let t = shape.ray_entry(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Z).unwrap();
        assert!((t - 1.5).abs() < 1e-5);

        assert_eq!(shape.ray_entry(Vec3::new(3.0, 0.0, 2.0), Vec3::ZERO, Vec3::Z), None);
    }

    #[test]
    fn test_origin_inside_hits_at_zero() {
        let shape = ColliderShape::ball(1.0);
        assert_eq!(shape.ray_entry(Vec3::ZERO, Vec3::ZERO, Vec3::Z), Some(0.0));

        let shape = ColliderShape::cuboid(1.0, 1.0, 1.0);
        assert_eq!(
            shape.ray_entry(Vec3::ZERO, Vec3::new(0.2, 0.0, 0.0), Vec3::Z),
            Some(0.0)
        );
    }
}
