//! Конфиг симуляции (RON)
//!
//! Def-структуры: то, что пишет дизайнер (имена категорий, числа).
//! `build()` валидирует и превращает их в runtime компоненты один раз на старте.
//! Все поля опциональны (`#[serde(default)]`): пустой файл = дефолты.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryMask;
use crate::components::PhysicsBody;
use crate::error::{ensure_in_range, ensure_positive, ConfigError};
use crate::motion::{NavigationAgent, SeekController};
use crate::vision::VisionSensor;

/// Какой вариант моторики получают агенты
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    #[default]
    Seek,
    Navigation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfigDef {
    pub vision_range: f32,
    pub vision_angle: f32,
    pub cone_segments: u32,
    pub detectable: Vec<String>,
    pub obstacles: Vec<String>,
}

impl Default for SensorConfigDef {
    fn default() -> Self {
        Self {
            vision_range: 10.0,
            vision_angle: 45.0,
            cone_segments: 24,
            detectable: vec!["Target".into()],
            obstacles: vec!["Obstacle".into()],
        }
    }
}

impl SensorConfigDef {
    pub fn build(&self) -> Result<VisionSensor, ConfigError> {
        VisionSensor::new(
            self.vision_range,
            self.vision_angle,
            CategoryMask::from_names(&self.detectable)?,
            CategoryMask::from_names(&self.obstacles)?,
        )?
        .with_cone_segments(self.cone_segments)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekConfigDef {
    pub max_speed: f32,
    pub max_force: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SeekConfigDef {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            max_force: 10.0,
            damping: 0.95,
            mass: 1.0,
        }
    }
}

impl SeekConfigDef {
    pub fn build(&self) -> Result<SeekController, ConfigError> {
        SeekController::new(self.max_speed, self.max_force, self.damping)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfigDef {
    pub speed: f32,
    pub arrival_distance: f32,
    pub deceleration: f32,
}

impl Default for NavigationConfigDef {
    fn default() -> Self {
        Self {
            speed: 3.5,
            arrival_distance: 1.0,
            deceleration: 8.0,
        }
    }
}

impl NavigationConfigDef {
    pub fn build(&self) -> Result<NavigationAgent, ConfigError> {
        NavigationAgent::new(self.speed, self.arrival_distance)?
            .with_deceleration(self.deceleration)
    }
}

const MAX_TARGET_SPEED: f32 = 20.0;

/// Раскладка сцены для headless прогона
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfigDef {
    pub agents: u32,
    pub targets: u32,
    pub obstacles: u32,
    /// Полуразмер квадратной арены (XZ, метры)
    pub arena_half_extent: f32,
    /// Скорость блуждания целей (m/s), 0 = цели стоят
    pub target_speed: f32,
}

impl Default for ScenarioConfigDef {
    fn default() -> Self {
        Self {
            agents: 2,
            targets: 3,
            obstacles: 6,
            arena_half_extent: 20.0,
            target_speed: 0.0,
        }
    }
}

impl ScenarioConfigDef {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("arena_half_extent", self.arena_half_extent)?;
        ensure_in_range("target_speed", self.target_speed, 0.0, MAX_TARGET_SPEED)?;
        Ok(())
    }
}

/// Корневой конфиг (`config/sentinel.ron`)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub ticks: u32,
    pub motion: MotionKind,
    pub sensor: SensorConfigDef,
    pub seek: SeekConfigDef,
    pub navigation: NavigationConfigDef,
    pub scenario: ScenarioConfigDef,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 600,
            motion: MotionKind::default(),
            sensor: SensorConfigDef::default(),
            seek: SeekConfigDef::default(),
            navigation: NavigationConfigDef::default(),
            scenario: ScenarioConfigDef::default(),
        }
    }
}

/// Моторика агента после валидации
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionTemplate {
    Seek(SeekController),
    Navigation(NavigationAgent),
}

/// Всё, что нужно для спавна агента из конфига
#[derive(Debug, Clone, PartialEq)]
pub struct AgentTemplate {
    pub sensor: VisionSensor,
    pub motion: MotionTemplate,
    pub body: PhysicsBody,
}

impl SimulationConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Валидация всего конфига → шаблон агента
    ///
    /// Проверяются обе моторики, даже неиспользуемая: ошибка в конфиге
    /// не должна всплыть только при смене `motion`.
    pub fn build(&self) -> Result<AgentTemplate, ConfigError> {
        let sensor = self.sensor.build()?;
        let seek = self.seek.build()?;
        let navigation = self.navigation.build()?;
        let mass = ensure_positive("mass", self.seek.mass)?;
        self.scenario.validate()?;

        let motion = match self.motion {
            MotionKind::Seek => MotionTemplate::Seek(seek),
            MotionKind::Navigation => MotionTemplate::Navigation(navigation),
        };

        Ok(AgentTemplate {
            sensor,
            motion,
            body: PhysicsBody::with_mass(mass),
        })
    }
}
