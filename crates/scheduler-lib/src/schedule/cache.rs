//! Effective-schedule caching
//!
//! A resource's randomized cadences are resolved at most once and then
//! pinned in its status, so later reconciles (or later changes to the
//! randomization algorithm) never drift an already-observed schedule.

use super::randomizer::{is_random_schedule, randomize_schedule};
use crate::models::JobType;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::info;

/// Per-job-type resolved cron expressions, persisted in the resource's
/// status.
///
/// Append-only by construction: the sole mutating operation is
/// [`EffectiveSchedules::get_or_insert_with`], so an entry can never be
/// overwritten or removed once written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveSchedules {
    entries: BTreeMap<JobType, String>,
}

impl EffectiveSchedules {
    /// The cached cron expression for a job type, if one was ever resolved
    pub fn get(&self, job_type: JobType) -> Option<&str> {
        self.entries.get(&job_type).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return the entry for `job_type`, computing and storing it only if
    /// absent. The flag reports whether a new entry was inserted.
    pub fn get_or_insert_with(
        &mut self,
        job_type: JobType,
        make: impl FnOnce() -> String,
    ) -> (&str, bool) {
        match self.entries.entry(job_type) {
            Entry::Occupied(entry) => (entry.into_mut().as_str(), false),
            Entry::Vacant(entry) => (entry.insert(make()).as_str(), true),
        }
    }
}

/// Per-reconcile schedule resolution for one managed resource.
///
/// Owns the resource's identity, the [`EffectiveSchedules`] taken from its
/// status, and the dirty flag telling the caller whether the status must be
/// written back. The wrapper is owned exclusively by the reconcile that
/// created it; serializing concurrent reconciles of one resource is the
/// surrounding controller's job.
#[derive(Debug)]
pub struct ScheduleResolver {
    namespace: String,
    name: String,
    schedules: EffectiveSchedules,
    needs_status_update: bool,
}

impl ScheduleResolver {
    /// Create a resolver for one resource, seeded with the schedules
    /// currently recorded in its status
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        schedules: EffectiveSchedules,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            schedules,
            needs_status_update: false,
        }
    }

    /// The effective cron expression for one managed job type.
    ///
    /// A raw schedule that is not a randomization macro is returned
    /// verbatim and leaves the cache untouched. A macro resolves to the
    /// cached entry when one exists; otherwise the randomizer runs once,
    /// the result is pinned in the cache, and the dirty flag is raised so
    /// the caller persists the updated status.
    pub fn effective_schedule(&mut self, job_type: JobType, raw_schedule: &str) -> String {
        if !is_random_schedule(raw_schedule) {
            return raw_schedule.to_string();
        }

        let seed = self.seed(job_type);
        let (effective, inserted) = {
            let (value, inserted) = self
                .schedules
                .get_or_insert_with(job_type, || randomize_schedule(&seed, raw_schedule));
            (value.to_string(), inserted)
        };

        if inserted {
            self.needs_status_update = true;
            info!(
                namespace = %self.namespace,
                name = %self.name,
                job_type = %job_type,
                effective = %effective,
                "Pinned effective schedule"
            );
        }

        effective
    }

    /// Whether a new schedule was pinned during this reconcile, requiring
    /// the caller to write the status back
    pub fn needs_status_update(&self) -> bool {
        self.needs_status_update
    }

    pub fn schedules(&self) -> &EffectiveSchedules {
        &self.schedules
    }

    /// Hand the (possibly extended) schedule map back for the status write
    pub fn into_schedules(self) -> EffectiveSchedules {
        self.schedules
    }

    /// Randomization seed for one job type, stable across reconciles
    fn seed(&self, job_type: JobType) -> String {
        format!("{}/{}@{}", self.namespace, self.name, job_type)
    }
}
