//! ECS компоненты тел сцены
//!
//! Организация по доменам:
//! - agent: физическое тело агента (PhysicsBody, Agent, FaceMovement)
//! - scene: коллайдеры для headless spatial index (SceneCollider, ColliderShape)
//!
//! Компоненты сенсора и моторики живут в `vision` и `motion`.

pub mod agent;
pub mod scene;

pub use agent::*;
pub use scene::*;
