//! Vision Sensor: конфиг конуса + detection pass
//!
//! Алгоритм (один pass на тик):
//! 1. overlap_sphere(position, range, detectable): грубый prefilter
//! 2. угол между forward и направлением на кандидата
//! 3. строгое `angle < half_angle` (граница конуса НЕ входит)
//! 4. raycast до range по `detectable | obstacles`: первое попадание == кандидат
//! 5. первый подтверждённый кандидат = цель, дальше не ищем
//!
//! Никаких epsilon на границе угла. Ошибок нет: "цели нет" это валидный результат.

use bevy::prelude::*;

use super::state::{Detection, PursuitState};
use crate::categories::{Category, CategoryMask};
use crate::error::{ensure_in_range, ConfigError};
use crate::math;
use crate::spatial::{Candidate, SpatialQuery};

pub const MIN_RANGE: f32 = 1.0;
pub const MAX_RANGE: f32 = 50.0;
pub const MAX_HALF_ANGLE: f32 = 180.0;
pub const MIN_CONE_SEGMENTS: u32 = 8;
pub const MAX_CONE_SEGMENTS: u32 = 64;

/// Конус зрения агента (designer-set, неизменен в пределах сессии)
///
/// Поля закрыты: конструктор валидирует диапазоны, presentation читает через getters.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Detection, PursuitState)]
pub struct VisionSensor {
    range: f32,
    half_angle: f32,
    cone_segments: u32,
    detectable: CategoryMask,
    obstacles: CategoryMask,
}

impl Default for VisionSensor {
    fn default() -> Self {
        Self {
            range: 10.0,
            half_angle: 45.0,
            cone_segments: 24,
            detectable: Category::Target.mask(),
            obstacles: Category::Obstacle.mask(),
        }
    }
}

impl VisionSensor {
    /// `range` ∈ [1, 50], `half_angle` ∈ [0, 180] (градусы, от forward в каждую сторону)
    pub fn new(
        range: f32,
        half_angle: f32,
        detectable: CategoryMask,
        obstacles: CategoryMask,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            range: ensure_in_range("vision_range", range, MIN_RANGE, MAX_RANGE)?,
            half_angle: ensure_in_range("vision_angle", half_angle, 0.0, MAX_HALF_ANGLE)?,
            detectable,
            obstacles,
            ..default()
        })
    }

    /// Число сегментов визуального конуса (presentation only, detection не использует)
    pub fn with_cone_segments(mut self, segments: u32) -> Result<Self, ConfigError> {
        ensure_in_range(
            "cone_segments",
            segments as f32,
            MIN_CONE_SEGMENTS as f32,
            MAX_CONE_SEGMENTS as f32,
        )?;
        self.cone_segments = segments;
        Ok(self)
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn half_angle(&self) -> f32 {
        self.half_angle
    }

    /// Полная ширина конуса (2 × half_angle)
    pub fn field_of_view(&self) -> f32 {
        self.half_angle * 2.0
    }

    pub fn cone_segments(&self) -> u32 {
        self.cone_segments
    }

    pub fn detectable(&self) -> CategoryMask {
        self.detectable
    }

    pub fn obstacles(&self) -> CategoryMask {
        self.obstacles
    }

    /// Маска LOS луча: цели тоже блокируют (ближняя цель заслоняет дальнюю)
    pub fn line_of_sight_mask(&self) -> CategoryMask {
        self.detectable | self.obstacles
    }

    /// Точки края конуса для визуализации (`cone_segments` штук)
    ///
    /// Край рисуется ровно на half_angle, а detection границу исключает:
    /// визуал приблизителен.
    pub fn cone_rim(&self, origin: Vec3, forward: Vec3) -> Vec<Vec3> {
        let Some(forward) = math::direction(forward) else {
            return Vec::new();
        };
        let (side, up) = forward.any_orthonormal_pair();
        let (sin_half, cos_half) = self.half_angle.to_radians().sin_cos();

        (0..self.cone_segments)
            .map(|segment| {
                let theta = std::f32::consts::TAU * segment as f32 / self.cone_segments as f32;
                let radial = side * theta.cos() + up * theta.sin();
                origin + (forward * cos_half + radial * sin_half) * self.range
            })
            .collect()
    }
}

/// Почему кандидат прошёл или отсеян (для debug логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateVerdict {
    /// Подтверждён: первый hit луча == кандидат
    Visible,
    /// Сам наблюдатель (его коллайдер попал в overlap)
    Observer,
    /// Кандидат в точке наблюдателя или forward нулевой: направление не определено
    Degenerate,
    /// `angle >= half_angle`
    OutsideCone { angle: f32 },
    /// Луч сначала попал в другое тело
    Occluded { by: Entity },
    /// Луч никуда не попал (кандидат за пределами range по лучу)
    NoHit,
}

/// Проверка одного кандидата (шаги 2–4)
pub fn evaluate_candidate<Q: SpatialQuery + ?Sized>(
    sensor: &VisionSensor,
    observer: Entity,
    position: Vec3,
    forward: Vec3,
    candidate: &Candidate,
    provider: &Q,
) -> CandidateVerdict {
    if candidate.entity == observer {
        return CandidateVerdict::Observer;
    }

    let offset = candidate.position - position;
    let (Some(direction), Some(angle)) = (
        math::direction(offset),
        math::angle_between_degrees(forward, offset),
    ) else {
        return CandidateVerdict::Degenerate;
    };

    if angle.is_nan() || angle >= sensor.half_angle {
        return CandidateVerdict::OutsideCone { angle };
    }

    match provider.raycast(
        position,
        direction,
        sensor.range,
        sensor.line_of_sight_mask(),
        Some(observer),
    ) {
        Some(hit) if hit.entity == candidate.entity => CandidateVerdict::Visible,
        Some(hit) => CandidateVerdict::Occluded { by: hit.entity },
        None => CandidateVerdict::NoHit,
    }
}

/// Detection pass: первый видимый кандидат в порядке провайдера
///
/// Чистая функция: результат зависит только от конфига, позы наблюдателя и сцены.
pub fn detect<Q: SpatialQuery + ?Sized>(
    sensor: &VisionSensor,
    observer: Entity,
    position: Vec3,
    forward: Vec3,
    provider: &Q,
) -> Detection {
    provider
        .overlap_sphere(position, sensor.range, sensor.detectable)
        .iter()
        .find(|candidate| {
            evaluate_candidate(sensor, observer, position, forward, candidate, provider)
                == CandidateVerdict::Visible
        })
        .map(|candidate| Detection::of(candidate.entity))
        .unwrap_or_default()
}
