//! End-to-end resolution scenarios: the controller-facing flow of merging
//! job resource requirements and resolving effective schedules.

use scheduler_lib::{
    randomize_schedule, resolve_requirements, EffectiveSchedules, GlobalDefaults, JobType,
    Quantity, ResourceList, ResourceRequirements, ScheduleResolver,
};

fn quantity(v: &str) -> Option<Quantity> {
    Some(Quantity::new(v))
}

struct MergeCase {
    name: &'static str,
    globals: GlobalDefaults,
    template: ResourceRequirements,
    explicit: ResourceRequirements,
    expected: ResourceRequirements,
}

#[test]
fn test_merge_resources_with_defaults() {
    let cases = [
        MergeCase {
            name: "no layers set leaves everything empty",
            globals: GlobalDefaults::default(),
            template: ResourceRequirements::default(),
            explicit: ResourceRequirements::default(),
            expected: ResourceRequirements::default(),
        },
        MergeCase {
            name: "explicit alone is used verbatim",
            globals: GlobalDefaults::default(),
            template: ResourceRequirements::default(),
            explicit: ResourceRequirements {
                requests: ResourceList {
                    cpu: quantity("50m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            expected: ResourceRequirements {
                requests: ResourceList {
                    cpu: quantity("50m"),
                    ..Default::default()
                },
                ..Default::default()
            },
        },
        MergeCase {
            name: "template fills dimensions the explicit spec leaves empty",
            globals: GlobalDefaults::default(),
            template: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            explicit: ResourceRequirements::default(),
            expected: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
        },
        MergeCase {
            name: "explicit beats template on the same dimension",
            globals: GlobalDefaults::default(),
            template: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            explicit: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("50m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            expected: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("50m"),
                    ..Default::default()
                },
                ..Default::default()
            },
        },
        MergeCase {
            name: "global default fills a dimension no other layer touches",
            globals: GlobalDefaults {
                memory_request: quantity("10Mi"),
                ..Default::default()
            },
            template: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            explicit: ResourceRequirements::default(),
            expected: ResourceRequirements {
                requests: ResourceList {
                    memory: quantity("10Mi"),
                    ..Default::default()
                },
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
            },
        },
        MergeCase {
            name: "explicit beats global on the same dimension",
            globals: GlobalDefaults {
                memory_request: quantity("10Mi"),
                ..Default::default()
            },
            template: ResourceRequirements::default(),
            explicit: ResourceRequirements {
                requests: ResourceList {
                    memory: quantity("20Mi"),
                    ..Default::default()
                },
                ..Default::default()
            },
            expected: ResourceRequirements {
                requests: ResourceList {
                    memory: quantity("20Mi"),
                    ..Default::default()
                },
                ..Default::default()
            },
        },
        MergeCase {
            name: "template beats global on the same dimension",
            globals: GlobalDefaults {
                cpu_limit: quantity("10m"),
                ..Default::default()
            },
            template: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            explicit: ResourceRequirements::default(),
            expected: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
        },
        MergeCase {
            name: "explicit beats template and global on the same dimension",
            globals: GlobalDefaults {
                cpu_limit: quantity("10m"),
                ..Default::default()
            },
            template: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("100m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            explicit: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
            expected: ResourceRequirements {
                limits: ResourceList {
                    cpu: quantity("200m"),
                    ..Default::default()
                },
                ..Default::default()
            },
        },
    ];

    for case in cases {
        let resolved = resolve_requirements(&case.explicit, &case.template, &case.globals);
        assert_eq!(resolved, case.expected, "case: {}", case.name);
    }
}

#[test]
fn test_randomize_schedule_table() {
    let seed = "backup-system/my-scheduled-backup@backup";
    let cases = [
        ("@hourly-random", "9 * * * *"),
        ("@daily-random", "9 22 * * *"),
        ("@weekly-random", "9 22 * * 2"),
        ("@monthly-random", "9 22 25 * *"),
        ("@yearly-random", "9 22 25 1 *"),
    ];
    for (schedule, expected) in cases {
        assert_eq!(
            randomize_schedule(seed, schedule),
            expected,
            "schedule: {schedule}"
        );
    }
}

#[test]
fn test_effective_schedule_pins_on_first_reconcile() {
    // First reconcile: nothing in status yet, so the macro resolves, the
    // result lands in the schedule map and the caller is told to persist.
    let mut resolver = ScheduleResolver::new("default", "nightly", EffectiveSchedules::default());
    let effective = resolver.effective_schedule(JobType::Archive, "@daily-random");
    assert_eq!(effective, "36 4 * * *");
    assert!(resolver.needs_status_update());

    let persisted = serde_json::to_string(resolver.schedules()).unwrap();

    // Second reconcile: status restored from persistence, same inputs. The
    // cached value is authoritative and no further write is requested.
    let restored: EffectiveSchedules = serde_json::from_str(&persisted).unwrap();
    let mut resolver = ScheduleResolver::new("default", "nightly", restored);
    assert_eq!(
        resolver.effective_schedule(JobType::Archive, "@daily-random"),
        effective
    );
    assert!(!resolver.needs_status_update());
}

#[test]
fn test_status_entry_wins_over_recomputation() {
    let mut schedules = EffectiveSchedules::default();
    schedules.get_or_insert_with(JobType::Backup, || "26 * 3 * *".to_string());

    let mut resolver = ScheduleResolver::new("default", "nightly", schedules);
    assert_eq!(
        resolver.effective_schedule(JobType::Backup, "@hourly-random"),
        "26 * 3 * *"
    );
    assert!(!resolver.needs_status_update());
}

#[test]
fn test_literal_schedules_never_request_persistence() {
    let mut resolver = ScheduleResolver::new("default", "nightly", EffectiveSchedules::default());
    for job_type in [JobType::Backup, JobType::Check, JobType::Prune] {
        assert_eq!(
            resolver.effective_schedule(job_type, "0 3 * * *"),
            "0 3 * * *"
        );
    }
    assert!(!resolver.needs_status_update());
    assert!(resolver.schedules().is_empty());
}

#[test]
fn test_distinct_resources_spread_across_the_hour() {
    // The point of randomization: many resources authored with the same
    // "@hourly-random" intent must not all fire at the same minute.
    let mut minutes = std::collections::BTreeSet::new();
    for i in 0..100 {
        let mut resolver = ScheduleResolver::new(
            "default",
            format!("backup-{i}"),
            EffectiveSchedules::default(),
        );
        let schedule = resolver.effective_schedule(JobType::Backup, "@hourly-random");
        let minute: u32 = schedule.split(' ').next().unwrap().parse().unwrap();
        assert!(minute <= 59);
        minutes.insert(minute);
    }
    assert!(
        minutes.len() > 20,
        "expected wide minute spread, got {} distinct values",
        minutes.len()
    );
}
