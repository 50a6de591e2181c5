//! Detection state + pursuit FSM
//!
//! `Detection` пересчитывается с нуля каждый тик (не sticky, без памяти).
//! Инвариант "цель есть ⇔ detected" держится типом: флага отдельно от
//! ссылки на цель нет, протухшая ссылка невозможна.

use bevy::prelude::*;

/// Результат detection pass
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detection {
    target: Option<Entity>,
}

impl Detection {
    pub fn none() -> Self {
        Self { target: None }
    }

    pub fn of(target: Entity) -> Self {
        Self {
            target: Some(target),
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn target_is_detected(&self) -> bool {
        self.target.is_some()
    }
}

/// FSM преследования: NoTarget ⇄ TargetAcquired
///
/// Без терминального состояния, работает пока активен сенсор.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PursuitState {
    #[default]
    NoTarget,
    TargetAcquired {
        target: Entity,
    },
}

impl From<Detection> for PursuitState {
    fn from(detection: Detection) -> Self {
        match detection.target() {
            Some(target) => PursuitState::TargetAcquired { target },
            None => PursuitState::NoTarget,
        }
    }
}

impl PursuitState {
    pub fn target(&self) -> Option<Entity> {
        match self {
            PursuitState::NoTarget => None,
            PursuitState::TargetAcquired { target } => Some(*target),
        }
    }

    /// События перехода self → next
    ///
    /// Смена цели A → B = TargetLost(A) + TargetAcquired(B).
    pub fn transition_events(&self, observer: Entity, next: &PursuitState) -> Vec<PursuitEvent> {
        let mut events = Vec::new();
        if self.target() == next.target() {
            return events;
        }

        if let Some(target) = self.target() {
            events.push(PursuitEvent::TargetLost { observer, target });
        }
        if let Some(target) = next.target() {
            events.push(PursuitEvent::TargetAcquired { observer, target });
        }
        events
    }
}

/// События переходов FSM (для presentation / логов)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitEvent {
    /// Цель выбрана (NoTarget → TargetAcquired или смена цели)
    TargetAcquired { observer: Entity, target: Entity },
    /// Цель потеряна (вышла из конуса, заслонена, исчезла)
    TargetLost { observer: Entity, target: Entity },
}
