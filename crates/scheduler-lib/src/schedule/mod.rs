//! Schedule resolution: deterministic randomization plus the per-resource
//! effective-schedule cache

mod cache;
mod randomizer;

pub use cache::{EffectiveSchedules, ScheduleResolver};
pub use randomizer::{is_random_schedule, randomize_schedule, RandomInterval};
