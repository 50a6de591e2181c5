//! Vision domain: конус зрения, detection pass, pursuit FSM
//!
//! Содержит:
//! - VisionSensor (конфиг конуса) + чистый `detect()`
//! - Detection / PursuitState (состояние, пересчитывается каждый тик)
//! - PursuitEvent (TargetAcquired / TargetLost)
//! - Perception системы

pub mod sensor;
pub mod state;
pub mod systems;


pub use sensor::*;
pub use state::*;
pub use systems::*;
