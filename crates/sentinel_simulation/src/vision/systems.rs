//! Vision systems (Perception фаза)
//!
//! Системы:
//! - `detect_targets`: detection pass через headless SceneIndex
//! - `detect_targets_rapier`: тот же pass через RapierContext
//! - `update_pursuit_states`: Detection → PursuitState + PursuitEvent
//! - `warn_unwired_sensors`: сенсор без моторики (warning один раз)
//! - `log_pursuit_events`: debug лог переходов FSM

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use super::sensor::{detect, VisionSensor};
use super::state::{Detection, PursuitEvent, PursuitState};
use crate::logger;
use crate::motion::{NavigationAgent, SeekController};
use crate::spatial::{RapierSpatialQuery, SceneIndex};

/// Система: detection pass для всех сенсоров (headless backend)
///
/// Сенсор только читает Transform агента, никогда его не мутирует.
pub fn detect_targets(
    mut sensors: Query<(Entity, &Transform, &VisionSensor, &mut Detection)>,
    index: Res<SceneIndex>,
) {
    for (observer, transform, sensor, mut detection) in sensors.iter_mut() {
        let result = detect(
            sensor,
            observer,
            transform.translation,
            transform.forward().as_vec3(),
            index.as_ref(),
        );

        // set_if_neq: Changed<Detection> срабатывает только на реальных переходах
        detection.set_if_neq(result);
    }
}

/// Система: detection pass через Rapier (world-space GlobalTransform)
///
/// Нет RapierContext (plugin не подключен) → сенсоры не обновляются.
pub fn detect_targets_rapier(
    mut sensors: Query<(Entity, &GlobalTransform, &VisionSensor, &mut Detection)>,
    bodies: Query<&GlobalTransform>,
    read_context: ReadRapierContext,
) {
    let Ok(context) = read_context.single() else {
        return;
    };

    let provider = RapierSpatialQuery::new(&context, |entity| {
        bodies.get(entity).ok().map(GlobalTransform::translation)
    });

    for (observer, transform, sensor, mut detection) in sensors.iter_mut() {
        let result = detect(
            sensor,
            observer,
            transform.translation(),
            transform.forward().as_vec3(),
            &provider,
        );
        detection.set_if_neq(result);
    }
}

/// Система: Detection → PursuitState (+ события переходов)
pub fn update_pursuit_states(
    mut query: Query<(Entity, &Detection, &mut PursuitState)>,
    mut events: EventWriter<PursuitEvent>,
) {
    for (observer, detection, mut state) in query.iter_mut() {
        let next = PursuitState::from(*detection);
        if *state == next {
            continue;
        }

        for event in state.transition_events(observer, &next) {
            events.write(event);
        }
        *state = next;
    }
}

/// Система: предупреждение про сенсор без моторики
///
/// Не фатально: detection продолжает работать, motion шаг = no-op.
pub fn warn_unwired_sensors(
    query: Query<
        Entity,
        (
            Added<VisionSensor>,
            Without<SeekController>,
            Without<NavigationAgent>,
        ),
    >,
) {
    for entity in query.iter() {
        logger::log_warning(&format!(
            "Entity {:?}: VisionSensor без motion controller, преследование отключено",
            entity
        ));
    }
}

/// Система: debug лог переходов FSM
pub fn log_pursuit_events(mut events: EventReader<PursuitEvent>) {
    for event in events.read() {
        match event {
            PursuitEvent::TargetAcquired { observer, target } => {
                logger::log(&format!("👁 {:?}: target acquired {:?}", observer, target));
            }
            PursuitEvent::TargetLost { observer, target } => {
                logger::log(&format!("{:?}: target lost {:?}", observer, target));
            }
        }
    }
}
