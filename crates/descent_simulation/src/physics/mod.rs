//! Physics collaborator module
//!
//! Ground probe + blocking коллайдеры для headless режима.
//! Интеграция velocity живёт в `movement` (там же jump state machine).

pub mod collision;

pub use collision::{probe_ground, Aabb2, BlockingCollider, GroundSurface};
