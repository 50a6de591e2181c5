//! Векторная математика для vision/steering
//!
//! Тонкие обёртки над glam с определённым поведением на вырожденных входах:
//! нулевой вектор даёт `None` или ноль, никогда NaN.

use bevy::prelude::*;

/// Нормализованное направление или None для (почти) нулевого вектора
pub fn direction(v: Vec3) -> Option<Vec3> {
    v.try_normalize()
}

/// Беззнаковый угол между векторами в градусах, [0, 180]
///
/// Считается через atan2(|a × b|, a · b): на осевых случаях (0°, 45°, 90°, 180°)
/// результат совпадает с границей точно, без дрейфа acos около ±1.
/// None если один из векторов нулевой.
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> Option<f32> {
    if a.length_squared() <= f32::EPSILON || b.length_squared() <= f32::EPSILON {
        return None;
    }
    let cross = a.cross(b).length();
    let dot = a.dot(b);
    Some(cross.atan2(dot).to_degrees())
}

/// Ограничение длины вектора сверху
///
/// Гарантия: `clamp_magnitude(v, max).length() <= max` для любого `v`
/// (после масштабирования дожимаем на ulp, если округление вылезло за max).
/// `max <= 0` → ноль.
pub fn clamp_magnitude(v: Vec3, max: f32) -> Vec3 {
    if max <= 0.0 || !v.is_finite() {
        return Vec3::ZERO;
    }

    let length = v.length();
    if length <= max {
        return v;
    }

    let mut clamped = v * (max / length);
    while clamped.length() > max {
        clamped *= 1.0 - f32::EPSILON;
    }
    clamped
}

/// Сдвиг вектора к цели не больше чем на `max_delta`
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_zero() {
        assert_eq!(direction(Vec3::ZERO), None);
        assert_eq!(direction(Vec3::new(0.0, 0.0, 5.0)), Some(Vec3::Z));
    }

    #[test]
    fn test_angle_axis_cases_exact() {
        assert_eq!(angle_between_degrees(Vec3::Z, Vec3::new(0.0, 0.0, 5.0)), Some(0.0));
        assert_eq!(angle_between_degrees(Vec3::Z, Vec3::new(5.0, 0.0, 0.0)), Some(90.0));
        assert_eq!(angle_between_degrees(Vec3::Z, Vec3::new(0.0, 0.0, -3.0)), Some(180.0));
    }

    #[test]
    fn test_angle_45_not_below_boundary() {
        // Граница half_angle=45 должна отсекаться строгим `<`
        let angle = angle_between_degrees(Vec3::Z, Vec3::new(5.0, 0.0, 5.0)).unwrap();
        assert!(angle >= 45.0, "angle = {}", angle);
        assert!(angle < 45.001, "angle = {}", angle);
    }

    #[test]
    fn test_angle_wide_target() {
        // (8, 0, 1) от +Z ≈ 82.87°
        let angle = angle_between_degrees(Vec3::Z, Vec3::new(8.0, 0.0, 1.0)).unwrap();
        assert!((angle - 82.875).abs() < 0.01, "angle = {}", angle);
    }

    #[test]
    fn test_angle_degenerate() {
        assert_eq!(angle_between_degrees(Vec3::ZERO, Vec3::X), None);
        assert_eq!(angle_between_degrees(Vec3::X, Vec3::ZERO), None);
    }

    #[test]
    fn test_clamp_magnitude() {
        let v = Vec3::new(30.0, 40.0, 0.0); // length 50
        let clamped = clamp_magnitude(v, 10.0);
        assert!(clamped.length() <= 10.0);
        assert!((clamped.length() - 10.0).abs() < 1e-4);
        assert!((clamped.normalize() - v.normalize()).length() < 1e-5);

        // Короче max: без изменений
        assert_eq!(clamp_magnitude(Vec3::X, 10.0), Vec3::X);

        // Вырожденные входы
        assert_eq!(clamp_magnitude(v, 0.0), Vec3::ZERO);
        assert_eq!(clamp_magnitude(Vec3::splat(f32::NAN), 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(Vec3::ZERO, Vec3::X * 10.0, 2.0), Vec3::X * 2.0);
        assert_eq!(move_towards(Vec3::X * 9.5, Vec3::X * 10.0, 2.0), Vec3::X * 10.0);
        assert_eq!(move_towards(Vec3::ONE, Vec3::ONE, 1.0), Vec3::ONE);
    }
}
