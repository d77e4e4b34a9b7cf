//! Schedule-resolution core for the backup orchestration controller
//!
//! This crate provides the derived, deterministic outcomes the controller
//! embeds into generated jobs:
//! - Resource-requirement resolution across override, template and global
//!   default layers
//! - Deterministic schedule randomization for "@<interval>-random" macros
//! - Per-resource caching of resolved schedules with a persistence signal
//!
//! The core is pure and synchronous: it performs no I/O and owns no object
//! identity. Watching, reconciling and persisting belong to the hosting
//! controller.

pub mod config;
pub mod models;
pub mod resources;
pub mod schedule;

pub use config::{ConfigError, GlobalDefaults};
pub use models::{JobType, Quantity, QuantityError, ResourceList, ResourceRequirements};
pub use resources::resolve_requirements;
pub use schedule::{
    is_random_schedule, randomize_schedule, EffectiveSchedules, RandomInterval, ScheduleResolver,
};
