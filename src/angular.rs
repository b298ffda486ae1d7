//! Linear-to-angular sight corrections.

use crate::constants::{CM_PER_MIL_AT_100M, CM_PER_MOA_AT_100M};

/// Convert a linear correction in cm at the given distance to minutes of
/// angle. Undefined at zero distance; callers guard the zero-range case.
pub fn cm_to_moa(cm: f64, distance_m: f64) -> f64 {
    (cm / CM_PER_MOA_AT_100M) * (100.0 / distance_m)
}

/// Convert a linear correction in cm at the given distance to milliradians.
pub fn cm_to_mil(cm: f64, distance_m: f64) -> f64 {
    (cm / CM_PER_MIL_AT_100M) * (100.0 / distance_m)
}
