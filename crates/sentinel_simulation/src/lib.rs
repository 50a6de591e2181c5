//! SENTINEL Simulation Core
//!
//! Perception & pursuit на Bevy 0.16 (headless ECS)
//!
//! Pipeline одного FixedUpdate тика:
//! - Perception: SceneIndex → detect() → Detection → PursuitState + события
//! - Motion: Detection → MotionStrategy (seek / navigation) → PhysicsBody
//! - Integration: velocity → Transform
//!
//! Чистая логика (`detect`, `compute_steering_force`) тестируется без App,
//! системы тонкие.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod categories;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod math;
pub mod motion;
pub mod scenario;
pub mod spatial;
pub mod vision;

// Re-export для удобства
pub use categories::{Category, CategoryMask};
pub use components::*;
pub use config::{AgentTemplate, MotionKind, MotionTemplate, SimulationConfig};
pub use error::ConfigError;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use motion::{
    compute_steering_force, MotionStrategy, NavigationAgent, PathFollower, SeekController,
};
pub use scenario::{scatter_scenario, spawn_agent, spawn_obstacle, spawn_target, ScenarioLayout};
pub use spatial::{Candidate, RayHit, SceneIndex, SpatialQuery};
pub use vision::{detect, Detection, PursuitEvent, PursuitState, VisionSensor};

/// Фазы тика (chained в FixedUpdate)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PursuitSet {
    /// Detection + FSM. Только читает Transform
    Perception,
    /// Моторика пишет PhysicsBody
    Motion,
    /// velocity → Transform
    Integration,
}

/// Откуда сенсор берёт spatial запросы
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpatialBackend {
    /// Headless SceneIndex из `SceneCollider`
    #[default]
    Scene,
    /// `RapierContext` (нужен RapierPhysicsPlugin и коллайдеры с CollisionGroups)
    Rapier,
}

/// Plugin pipeline восприятия и преследования
#[derive(Default)]
pub struct PursuitPlugin {
    pub backend: SpatialBackend,
}

impl Plugin for PursuitPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PursuitEvent>().configure_sets(
            FixedUpdate,
            (
                PursuitSet::Perception,
                PursuitSet::Motion,
                PursuitSet::Integration,
            )
                .chain(),
        );

        match self.backend {
            SpatialBackend::Scene => {
                app.init_resource::<SceneIndex>().add_systems(
                    FixedUpdate,
                    (spatial::rebuild_scene_index, vision::detect_targets)
                        .chain()
                        .in_set(PursuitSet::Perception)
                        .before(vision::update_pursuit_states),
                );
            }
            SpatialBackend::Rapier => {
                app.add_systems(
                    FixedUpdate,
                    vision::detect_targets_rapier
                        .in_set(PursuitSet::Perception)
                        .before(vision::update_pursuit_states),
                );
            }
        }

        app.add_systems(
            FixedUpdate,
            (
                (vision::update_pursuit_states, vision::log_pursuit_events)
                    .chain()
                    .in_set(PursuitSet::Perception),
                vision::warn_unwired_sensors.in_set(PursuitSet::Perception),
                (
                    motion::update_motion::<SeekController>,
                    motion::update_motion::<NavigationAgent>,
                    motion::advance_navigation_agents,
                )
                    .chain()
                    .in_set(PursuitSet::Motion),
                motion::integrate_velocity.in_set(PursuitSet::Integration),
            ),
        );
    }
}

/// Главный plugin симуляции (pipeline + дрейф целей)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(PursuitPlugin::default())
            .add_systems(
                FixedUpdate,
                scenario::bounce_drifters.in_set(PursuitSet::Motion),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();

    app.add_plugins((MinimalPlugins, SimulationPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Прогоняет `ticks` фиксированных шагов напрямую
///
/// `app.update()` считает FixedUpdate по реальному времени (0..N шагов за кадр),
/// здесь ровно один шаг на итерацию: прогон воспроизводим.
pub fn run_fixed_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug
    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }
    snapshot
}
