//! Resource-requirement resolution
//!
//! Merges the three requirement layers attached to a job into the set
//! embedded in the generated job: the explicit per-invocation override, the
//! resource's own template, and the operator-wide global defaults.

use crate::config::GlobalDefaults;
use crate::models::{Quantity, ResourceList, ResourceRequirements};

/// Resolve the effective resource requirements for one generated job.
///
/// Each of the four dimensions (requests/limits × cpu/memory) is resolved
/// independently with strict precedence: the explicit override wins, then
/// the resource template, then the global default; a dimension no layer
/// specifies stays absent. A higher layer supplying one dimension never
/// shadows another dimension of a lower layer.
pub fn resolve_requirements(
    explicit: &ResourceRequirements,
    template: &ResourceRequirements,
    globals: &GlobalDefaults,
) -> ResourceRequirements {
    ResourceRequirements {
        requests: ResourceList {
            cpu: pick(
                &explicit.requests.cpu,
                &template.requests.cpu,
                &globals.cpu_request,
            ),
            memory: pick(
                &explicit.requests.memory,
                &template.requests.memory,
                &globals.memory_request,
            ),
        },
        limits: ResourceList {
            cpu: pick(
                &explicit.limits.cpu,
                &template.limits.cpu,
                &globals.cpu_limit,
            ),
            memory: pick(
                &explicit.limits.memory,
                &template.limits.memory,
                &globals.memory_limit,
            ),
        },
    }
}

/// First present value in precedence order, for a single dimension
fn pick(
    explicit: &Option<Quantity>,
    template: &Option<Quantity>,
    global: &Option<Quantity>,
) -> Option<Quantity> {
    explicit
        .as_ref()
        .or(template.as_ref())
        .or(global.as_ref())
        .cloned()
}
