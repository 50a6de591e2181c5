//! Физическое тело агента

use bevy::prelude::*;

/// Агент: тело с позицией, направлением взгляда и скоростью
///
/// Автоматически добавляет Transform и PhysicsBody через Required Components.
/// Позиция = `Transform.translation`, forward = `Transform::forward()`.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Transform, PhysicsBody)]
pub struct Agent;

/// Скорость + масса (velocity интегрируем сами, без Rapier forces)
///
/// Мутируется только моторикой (MotionStrategy) и интегратором.
/// Сенсор тело не трогает.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    /// Масса (кг), F = ma
    pub mass: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 1.0,
        }
    }
}

impl PhysicsBody {
    pub fn with_mass(mass: f32) -> Self {
        Self {
            mass,
            ..default()
        }
    }

    /// Скалярная скорость (m/s)
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Ускорение от силы: a = F / m (масса снизу ограничена)
    pub fn acceleration(&self, force: Vec3) -> Vec3 {
        force / self.mass.max(0.001)
    }
}

/// Маркер: агент поворачивается лицом по направлению движения
///
/// Без маркера forward фиксирован (сенсор смотрит туда, куда поставили).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FaceMovement {
    /// Ниже этой скорости (m/s) не поворачиваемся
    pub min_speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceleration_from_force() {
        let body = PhysicsBody::with_mass(2.0);
        assert_eq!(body.acceleration(Vec3::new(4.0, 0.0, 0.0)), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_mass_does_not_blow_up() {
        let body = PhysicsBody::with_mass(0.0);
        let acceleration = body.acceleration(Vec3::X);
        assert!(acceleration.is_finite());
    }

    #[test]
    fn test_speed() {
        let body = PhysicsBody {
            velocity: Vec3::new(3.0, 0.0, 4.0),
            mass: 1.0,
        };
        assert_eq!(body.speed(), 5.0);
    }
}
