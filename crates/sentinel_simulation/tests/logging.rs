//! Тесты логирования pipeline
//!
//! Отдельный test binary: глобальный printer подменяется на перехватчик,
//! другие тесты процесса не пишут в него параллельно.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use sentinel_simulation::logger::{set_log_level, set_logger, LogLevel, LogPrinter};
use sentinel_simulation::{
    create_headless_app, run_fixed_ticks, spawn_agent, spawn_target, PursuitState,
    SimulationConfig, VisionSensor,
};

type Captured = Arc<Mutex<Vec<(LogLevel, String)>>>;

struct CapturePrinter {
    lines: Captured,
}

impl LogPrinter for CapturePrinter {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

fn capture_logs() -> Captured {
    let lines = Captured::default();
    set_logger(Box::new(CapturePrinter {
        lines: lines.clone(),
    }));
    set_log_level(LogLevel::Debug);
    lines
}

fn warnings(lines: &Captured) -> Vec<String> {
    lines
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, _)| *level == LogLevel::Warning)
        .map(|(_, message)| message.clone())
        .collect()
}

#[test]
fn test_unwired_sensor_logs_one_warning() {
    let lines = capture_logs();
    let mut app = create_headless_app(1);

    let template = SimulationConfig::default().build().unwrap();
    let wired = spawn_agent(
        app.world_mut(),
        &template,
        Transform::from_xyz(5.0, 0.0, 0.0).looking_to(Vec3::Z, Vec3::Y),
    );
    let unwired = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 0.0, 0.0).looking_to(Vec3::Z, Vec3::Y),
            VisionSensor::default(),
        ))
        .id();
    let target = spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, 5.0));

    run_fixed_ticks(&mut app, 10);

    // Detection работает, предупреждение ровно одно и только про сенсор без моторики
    assert_eq!(
        *app.world().get::<PursuitState>(unwired).unwrap(),
        PursuitState::TargetAcquired { target }
    );
    let warnings = warnings(&lines);
    assert_eq!(warnings.len(), 1, "warnings: {:?}", warnings);
    assert!(warnings[0].contains(&format!("{:?}", unwired)));
    assert!(warnings[0].contains("без motion controller"));
    assert!(!warnings[0].contains(&format!("Entity {:?}:", wired)));
}
