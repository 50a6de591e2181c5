//! Спавн сцены: агенты, цели, препятствия
//!
//! Ручные helpers (`spawn_agent`, `spawn_target`, `spawn_obstacle`) для тестов
//! и `scatter_scenario` для headless прогона: раскладка из seeded RNG,
//! одинаковый seed → одинаковая сцена.

use bevy::prelude::*;
use rand::Rng;

use crate::categories::Category;
use crate::components::{FaceMovement, PhysicsBody, SceneCollider};
use crate::config::{AgentTemplate, MotionTemplate, ScenarioConfigDef};
use crate::DeterministicRng;

pub const AGENT_RADIUS: f32 = 0.4;
pub const TARGET_RADIUS: f32 = 0.5;

/// Цель, дрейфующая по арене (отскок от границ)
///
/// Замена ручного управления второй стороной: двигается сама.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(PhysicsBody)]
pub struct Drifter {
    pub half_extent: f32,
}

/// Сущности, созданные `scatter_scenario`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioLayout {
    pub agents: Vec<Entity>,
    pub targets: Vec<Entity>,
    pub obstacles: Vec<Entity>,
}

/// Агент из шаблона конфига
///
/// Свой коллайдер категории Agent: сенсор исключает его сам.
pub fn spawn_agent(world: &mut World, template: &AgentTemplate, transform: Transform) -> Entity {
    let mut agent = world.spawn((
        transform,
        template.sensor.clone(),
        template.body,
        FaceMovement::default(),
        SceneCollider::ball(AGENT_RADIUS, Category::Agent),
    ));

    match template.motion {
        MotionTemplate::Seek(seek) => agent.insert(seek),
        MotionTemplate::Navigation(navigation) => agent.insert(navigation),
    };

    agent.id()
}

pub fn spawn_target(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            SceneCollider::ball(TARGET_RADIUS, Category::Target),
        ))
        .id()
}

pub fn spawn_obstacle(world: &mut World, position: Vec3, half_extents: Vec3) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            SceneCollider::cuboid(half_extents, Category::Obstacle),
        ))
        .id()
}

/// Случайная раскладка сцены из DeterministicRng
///
/// Порядок спавна фиксирован (препятствия → цели → агенты): Entity index
/// и порядок кандидатов SceneIndex совпадают между прогонами.
pub fn scatter_scenario(
    world: &mut World,
    template: &AgentTemplate,
    scenario: &ScenarioConfigDef,
) -> ScenarioLayout {
    world.resource_scope(|world, mut rng: Mut<DeterministicRng>| {
        let extent = scenario.arena_half_extent;
        let mut layout = ScenarioLayout::default();

        for _ in 0..scenario.obstacles {
            let position = random_ground_point(&mut rng, extent);
            let half_extents = Vec3::new(
                rng.rng.gen_range(0.5..2.0),
                1.0,
                rng.rng.gen_range(0.5..2.0),
            );
            layout
                .obstacles
                .push(spawn_obstacle(world, position, half_extents));
        }

        for _ in 0..scenario.targets {
            let position = random_ground_point(&mut rng, extent);
            let target = spawn_target(world, position);
            if scenario.target_speed > 0.0 {
                let velocity = random_heading(&mut rng) * scenario.target_speed;
                world.entity_mut(target).insert((
                    Drifter {
                        half_extent: extent,
                    },
                    PhysicsBody {
                        velocity,
                        ..default()
                    },
                ));
            }
            layout.targets.push(target);
        }

        for _ in 0..scenario.agents {
            let position = random_ground_point(&mut rng, extent);
            let heading = random_heading(&mut rng);
            let transform = Transform::from_translation(position).looking_to(heading, Vec3::Y);
            layout.agents.push(spawn_agent(world, template, transform));
        }

        layout
    })
}

fn random_ground_point(rng: &mut DeterministicRng, extent: f32) -> Vec3 {
    Vec3::new(
        rng.rng.gen_range(-extent..extent),
        0.0,
        rng.rng.gen_range(-extent..extent),
    )
}

/// Единичное горизонтальное направление
fn random_heading(rng: &mut DeterministicRng) -> Vec3 {
    let angle = rng.rng.gen_range(0.0..std::f32::consts::TAU);
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

/// Система: отскок дрейфующих целей от границ арены
pub fn bounce_drifters(mut query: Query<(&Transform, &Drifter, &mut PhysicsBody)>) {
    for (transform, drifter, mut body) in query.iter_mut() {
        let position = transform.translation;
        if position.x.abs() >= drifter.half_extent && position.x * body.velocity.x > 0.0 {
            body.velocity.x = -body.velocity.x;
        }
        if position.z.abs() >= drifter.half_extent && position.z * body.velocity.z > 0.0 {
            body.velocity.z = -body.velocity.z;
        }
    }
}
