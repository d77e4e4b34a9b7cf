//! Deterministic schedule randomization
//!
//! Turns a randomization macro ("@daily-random", ...) plus a stable
//! resource identity into a concrete 5-field cron expression. Spreading the
//! derived values across the field ranges keeps thousands of resources with
//! the same authored cadence from firing simultaneously, while deriving
//! them from the identity alone keeps every reconcile byte-identical.

use sha2::{Digest, Sha256};
use tracing::debug;

/// The randomization interval encoded in a schedule macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomInterval {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RandomInterval {
    /// Recognize one of the five randomization macros; anything else
    /// (literal cron, "@daily", typos) is not an interval
    pub fn from_schedule(schedule: &str) -> Option<Self> {
        match schedule {
            "@hourly-random" => Some(RandomInterval::Hourly),
            "@daily-random" => Some(RandomInterval::Daily),
            "@weekly-random" => Some(RandomInterval::Weekly),
            "@monthly-random" => Some(RandomInterval::Monthly),
            "@yearly-random" => Some(RandomInterval::Yearly),
            _ => None,
        }
    }
}

/// Whether a raw schedule string is a randomization macro
pub fn is_random_schedule(schedule: &str) -> bool {
    RandomInterval::from_schedule(schedule).is_some()
}

/// The five cron field values derivable from one seed.
///
/// Every field is a function of the seed alone, so macros that reveal
/// overlapping fields (e.g. minute for both "@hourly-random" and
/// "@yearly-random") always agree for the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduleFields {
    minute: u64,
    hour: u64,
    day_of_month: u64,
    month: u64,
    day_of_week: u64,
}

/// Derive all five field values from the seed.
///
/// SHA-256 gives a stable, well-distributed value on every platform; the
/// first 8 digest bytes (big-endian) feed a mixed-radix decomposition into
/// the per-field ranges. Day-of-month stays within 1..=27 so the chosen day
/// exists in every month, February included.
fn derive_fields(seed: &str) -> ScheduleFields {
    let digest = Sha256::digest(seed.as_bytes());
    let mut h = u64::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
    ]);

    let minute = h % 60;
    h /= 60;
    let hour = h % 24;
    h /= 24;
    let day_of_month = 1 + h % 27;
    h /= 27;
    let month = 1 + h % 12;
    h /= 12;
    let day_of_week = h % 7;

    ScheduleFields {
        minute,
        hour,
        day_of_month,
        month,
        day_of_week,
    }
}

/// Resolve a randomization macro to a concrete cron expression.
///
/// The result is a pure function of (seed, schedule): reconciling the same
/// resource any number of times yields byte-identical output. A schedule
/// that is not a recognized randomization macro is returned unchanged, so a
/// literal expression or a misspelled macro degrades to its literal text
/// instead of failing the reconcile.
pub fn randomize_schedule(seed: &str, schedule: &str) -> String {
    let Some(interval) = RandomInterval::from_schedule(schedule) else {
        return schedule.to_string();
    };

    let fields = derive_fields(seed);
    let effective = match interval {
        RandomInterval::Hourly => format!("{} * * * *", fields.minute),
        RandomInterval::Daily => format!("{} {} * * *", fields.minute, fields.hour),
        RandomInterval::Weekly => format!(
            "{} {} * * {}",
            fields.minute, fields.hour, fields.day_of_week
        ),
        RandomInterval::Monthly => format!(
            "{} {} {} * *",
            fields.minute, fields.hour, fields.day_of_month
        ),
        RandomInterval::Yearly => format!(
            "{} {} {} {} *",
            fields.minute, fields.hour, fields.day_of_month, fields.month
        ),
    };

    debug!(seed = %seed, schedule = %schedule, effective = %effective, "Randomized schedule");
    effective
}
