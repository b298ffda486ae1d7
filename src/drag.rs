//! Drag coefficient lookup and drag deceleration.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::{DRAG_SCALE, STANDARD_AIR_DENSITY};
use crate::drag_tables::{G1_TABLE, G7_TABLE};

/// Standard drag reference model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragModel {
    /// Flat-base pointed reference projectile
    G1,
    /// Boat-tail tangent-ogive reference projectile
    G7,
}

impl DragModel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "G1" => Some(DragModel::G1),
            "G7" => Some(DragModel::G7),
            _ => None,
        }
    }
}

impl std::fmt::Display for DragModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Drag table over a monotonically ascending Mach axis
pub struct DragTable {
    mach_values: Vec<f64>,
    cd_values: Vec<f64>,
}

impl DragTable {
    fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self {
            mach_values: pairs.iter().map(|&(m, _)| m).collect(),
            cd_values: pairs.iter().map(|&(_, cd)| cd).collect(),
        }
    }

    /// Interpolate Cd at the given Mach number.
    ///
    /// Linear between nodes, clamped to the end values outside the table
    /// range. Extrapolation is deliberately not performed: the tables end at
    /// Mach 5 and below-table queries only occur for near-stationary
    /// projectiles where the held Cd is inconsequential.
    pub fn interpolate(&self, mach: f64) -> f64 {
        let n = self.mach_values.len();

        if mach <= self.mach_values[0] {
            return self.cd_values[0];
        }
        if mach >= self.mach_values[n - 1] {
            return self.cd_values[n - 1];
        }

        // partition_point returns the first index with mach_values[i] > mach,
        // so the bracketing segment is [idx - 1, idx].
        let idx = self.mach_values.partition_point(|&m| m <= mach);
        let x0 = self.mach_values[idx - 1];
        let x1 = self.mach_values[idx];
        let y0 = self.cd_values[idx - 1];
        let y1 = self.cd_values[idx];

        y0 + (mach - x0) / (x1 - x0) * (y1 - y0)
    }
}

static G1_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| DragTable::from_pairs(G1_TABLE));
static G7_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| DragTable::from_pairs(G7_TABLE));

/// Get the drag coefficient for a Mach number under the given model
pub fn drag_coefficient(mach: f64, model: DragModel) -> f64 {
    match model {
        DragModel::G1 => G1_DRAG_TABLE.interpolate(mach),
        DragModel::G7 => G7_DRAG_TABLE.interpolate(mach),
    }
}

/// Magnitude of the drag deceleration in m/s².
///
/// `speed` is the airspeed relative to the moving air mass, `bc` the
/// effective ballistic coefficient for `model`, `air_density` and
/// `speed_of_sound` the local atmosphere. The caller distributes the
/// magnitude over the relative-velocity components.
pub fn drag_deceleration(
    speed: f64,
    bc: f64,
    air_density: f64,
    speed_of_sound: f64,
    model: DragModel,
) -> f64 {
    let mach = speed / speed_of_sound;
    let cd = drag_coefficient(mach, model);
    DRAG_SCALE * (air_density / STANDARD_AIR_DENSITY) * (cd / bc) * speed * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_model_from_str() {
        assert_eq!(DragModel::from_str("G1"), Some(DragModel::G1));
        assert_eq!(DragModel::from_str("g7"), Some(DragModel::G7));
        assert_eq!(DragModel::from_str("G5"), None);
        assert_eq!(DragModel::from_str(""), None);
    }

    #[test]
    fn test_exact_table_nodes() {
        assert!((drag_coefficient(1.0, DragModel::G1) - 0.4805).abs() < 1e-12);
        assert!((drag_coefficient(1.0, DragModel::G7) - 0.3803).abs() < 1e-12);
        assert!((drag_coefficient(2.0, DragModel::G1) - 0.5934).abs() < 1e-12);
        assert!((drag_coefficient(2.0, DragModel::G7) - 0.2980).abs() < 1e-12);
    }

    #[test]
    fn test_interpolation_between_nodes() {
        // Midpoint of G1 (2.00, 0.5934) .. (2.05, 0.5867)
        let cd = drag_coefficient(2.025, DragModel::G1);
        assert!((cd - 0.59005).abs() < 1e-9, "G1 at Mach 2.025: {cd}");

        // Quarter point of G7 (0.90, 0.1464) .. (0.925, 0.1660)
        let cd = drag_coefficient(0.90625, DragModel::G7);
        assert!((cd - 0.1513).abs() < 1e-9, "G7 at Mach 0.90625: {cd}");
    }

    #[test]
    fn test_end_clamping() {
        // Below the table: clamp to the Mach-0 value, never extrapolate
        assert_eq!(drag_coefficient(-0.5, DragModel::G1), 0.2629);
        assert_eq!(drag_coefficient(0.0, DragModel::G7), 0.1198);

        // Above the table: clamp to the Mach-5 value
        assert_eq!(drag_coefficient(7.5, DragModel::G1), 0.4988);
        assert_eq!(drag_coefficient(5.0, DragModel::G7), 0.1618);
    }

    #[test]
    fn test_g1_exceeds_g7_transonic() {
        for mach in [0.9, 1.0, 1.1, 1.5, 2.0, 3.0] {
            let g1 = drag_coefficient(mach, DragModel::G1);
            let g7 = drag_coefficient(mach, DragModel::G7);
            assert!(g1 > g7, "G1 {g1} should exceed G7 {g7} at Mach {mach}");
        }
    }

    #[test]
    fn test_drag_deceleration_scaling() {
        // Doubling speed quadruples the v² term, modulated only by the Cd
        // difference between the two Mach points.
        let a1 = drag_deceleration(400.0, 0.3, 1.225, 340.0, DragModel::G1);
        let a2 = drag_deceleration(800.0, 0.3, 1.225, 340.0, DragModel::G1);
        let cd1 = drag_coefficient(400.0 / 340.0, DragModel::G1);
        let cd2 = drag_coefficient(800.0 / 340.0, DragModel::G1);
        assert!((a2 / a1 - 4.0 * cd2 / cd1).abs() < 1e-9);

        // Halving the BC doubles the deceleration
        let a_half_bc = drag_deceleration(400.0, 0.15, 1.225, 340.0, DragModel::G1);
        assert!((a_half_bc / a1 - 2.0).abs() < 1e-9);

        // Thinner air decelerates proportionally less
        let a_thin = drag_deceleration(400.0, 0.3, 1.0, 340.0, DragModel::G1);
        assert!((a_thin / a1 - 1.0 / 1.225).abs() < 1e-9);
    }

    #[test]
    fn test_drag_deceleration_magnitude() {
        // .308-class load: 792 m/s, G7 BC 0.278, ISA air. Expect several
        // hundred m/s² of retardation.
        let a = drag_deceleration(792.0, 0.278, 1.221, 340.3, DragModel::G7);
        assert!(a > 300.0 && a < 900.0, "implausible retardation {a}");
    }
}
