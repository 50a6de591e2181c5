//! Headless симуляция SENTINEL
//!
//! `sentinel_simulation [config.ron]`: грузит конфиг, раскладывает сцену
//! из seed, гоняет фиксированные тики и печатает состояние агентов.

use std::process::ExitCode;

use sentinel_simulation::{
    create_headless_app, init_logger, log_error, log_info, run_fixed_ticks, scatter_scenario,
    ConfigError, PursuitState, SimulationConfig,
};

const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/sentinel.ron");

/// Раз в секунду симуляции (60 тиков)
const REPORT_INTERVAL: u32 = 60;

fn main() -> ExitCode {
    init_logger();

    let path = std::env::args().nth(1);
    let config = match &path {
        Some(path) => SimulationConfig::load(path),
        // Без аргумента: шипнутый конфиг, если его нет (бинарь перенесли) → дефолты
        None => match SimulationConfig::load(DEFAULT_CONFIG) {
            Err(ConfigError::Io { .. }) => Ok(SimulationConfig::default()),
            loaded => loaded,
        },
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Config error: {}", err));
            return ExitCode::FAILURE;
        }
    };

    let template = match config.build() {
        Ok(template) => template,
        Err(err) => {
            log_error(&format!("Invalid config: {}", err));
            return ExitCode::FAILURE;
        }
    };

    log_info(&format!(
        "Starting SENTINEL headless simulation (seed: {}, ticks: {}, motion: {:?})",
        config.seed, config.ticks, config.motion
    ));

    let mut app = create_headless_app(config.seed);
    let layout = scatter_scenario(app.world_mut(), &template, &config.scenario);
    log_info(&format!(
        "Scene: {} agents, {} targets, {} obstacles",
        layout.agents.len(),
        layout.targets.len(),
        layout.obstacles.len()
    ));

    for tick in 0..config.ticks {
        run_fixed_ticks(&mut app, 1);

        if tick % REPORT_INTERVAL == 0 {
            let world = app.world();
            let tracking = layout
                .agents
                .iter()
                .filter(|agent| {
                    world
                        .get::<PursuitState>(**agent)
                        .is_some_and(|state| state.target().is_some())
                })
                .count();
            log_info(&format!(
                "Tick {}: {}/{} agents tracking a target",
                tick,
                tracking,
                layout.agents.len()
            ));
        }
    }

    for agent in &layout.agents {
        let world = app.world();
        let position = world
            .get::<bevy::prelude::Transform>(*agent)
            .map(|transform| transform.translation);
        let state = world.get::<PursuitState>(*agent);
        log_info(&format!("Agent {:?}: {:?} at {:?}", agent, state, position));
    }

    log_info("Simulation complete!");
    ExitCode::SUCCESS
}
