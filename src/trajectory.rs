//! Point-mass trajectory integration in three dimensions.
//!
//! Coordinate convention: +x downrange, +y up, +z to the right. The bullet
//! starts at `(0, −sight_height, 0)` — the bore sits below the sight line —
//! and is launched at the solved zero angle. Wind enters as the air-frame
//! velocity subtracted from the bullet velocity; drag acts on that relative
//! velocity, gravity on the inertial frame.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::atmosphere::{air_density, speed_of_sound};
use crate::constants::{
    DT_COARSE, DT_TRANSONIC, G_ACCEL_MPS2, MAX_FLIGHT_TIME_S, MIN_AIRSPEED_THRESHOLD,
    TRANSONIC_MACH_HIGH, TRANSONIC_MACH_LOW,
};
use crate::drag::drag_deceleration;
use crate::inputs::{Environment, RifleProfile};
use crate::zeroing::zero_angle;

/// Ballistic solution at the target distance, rounded for presentation.
///
/// Drop is positive below the line of sight, drift positive to the right.
/// Rounding is half-away-from-zero, applied exactly once on this boundary:
/// drop and drift to 0.1 cm, time to 1 ms, velocity and energy to integers,
/// Mach to 0.01.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticResult {
    pub drop_cm: f64,
    pub drift_cm: f64,
    pub time_s: f64,
    pub velocity_mps: f64,
    pub energy_j: f64,
    pub mach: f64,
}

/// Unrounded ballistic solution in SI units.
///
/// Same integration as [`BallisticResult`], full double precision; intended
/// for callers that post-process (plotting, unit conversion) and must not
/// accumulate presentation rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBallisticResult {
    pub drop_m: f64,
    pub drift_m: f64,
    pub time_s: f64,
    pub velocity_mps: f64,
    pub energy_j: f64,
    pub mach: f64,
}

/// Compute the trajectory for a profile at the given target distance.
///
/// Solves the zero angle for the profile's zero condition, then integrates
/// the full three-dimensional flight through the given environment. Total
/// over finite well-formed inputs; degenerate inputs (zero muzzle velocity)
/// run into the flight-time cap and still yield finite fields.
pub fn calculate_trajectory(
    profile: &RifleProfile,
    target_distance_m: f64,
    environment: &Environment,
) -> BallisticResult {
    let raw = calculate_trajectory_raw(profile, target_distance_m, environment);

    let velocity = raw.velocity_mps.round();
    BallisticResult {
        drop_cm: round_dp(raw.drop_m * 100.0, 1),
        drift_cm: round_dp(raw.drift_m * 100.0, 1),
        time_s: round_dp(raw.time_s, 3),
        velocity_mps: velocity,
        energy_j: (0.5 * profile.ammunition.bullet_mass_kg() * velocity * velocity).round(),
        mach: round_dp(raw.mach, 2),
    }
}

/// Unrounded variant of [`calculate_trajectory`].
pub fn calculate_trajectory_raw(
    profile: &RifleProfile,
    target_distance_m: f64,
    environment: &Environment,
) -> RawBallisticResult {
    // One atmosphere for both the zero solver and the flight: the zero
    // condition only holds at the zero distance if the two agree.
    let rho = air_density(
        environment.temperature_c,
        environment.pressure_hpa,
        environment.humidity,
    );
    let c = speed_of_sound(environment.temperature_c);

    let launch_angle = zero_angle(profile, rho, c);

    integrate(profile, target_distance_m, environment, launch_angle, rho, c)
}

fn integrate(
    profile: &RifleProfile,
    target_distance_m: f64,
    environment: &Environment,
    launch_angle_rad: f64,
    rho: f64,
    c: f64,
) -> RawBallisticResult {
    let ammo = &profile.ammunition;
    let model = profile.active_drag_model();

    // Headwind component opposes the bullet at 0°, crosswind blows in from
    // the right at 90°.
    let wind_angle_rad = environment.wind_angle_deg.to_radians();
    let v_head = environment.wind_speed_mps * wind_angle_rad.cos();
    let v_cross = environment.wind_speed_mps * wind_angle_rad.sin();

    let mut pos = Vector3::new(0.0, -profile.sight_height_m(), 0.0);
    let mut vel = Vector3::new(
        ammo.muzzle_velocity_mps * launch_angle_rad.cos(),
        ammo.muzzle_velocity_mps * launch_angle_rad.sin(),
        0.0,
    );
    let mut t = 0.0;

    while pos.x < target_distance_m && t < MAX_FLIGHT_TIME_S {
        let rel = Vector3::new(vel.x - v_head, vel.y, vel.z - v_cross);
        let airspeed = rel.norm();

        // Finer stepping through the transonic band, where Cd moves fastest
        // and Euler error would otherwise dominate.
        let rel_mach = airspeed / c;
        let dt = if rel_mach > TRANSONIC_MACH_LOW && rel_mach < TRANSONIC_MACH_HIGH {
            DT_TRANSONIC
        } else {
            DT_COARSE
        };

        let drag = if airspeed > MIN_AIRSPEED_THRESHOLD {
            let bc = ammo.effective_bc(airspeed, model);
            let decel = drag_deceleration(airspeed, bc, rho, c, model);
            rel * (decel / airspeed)
        } else {
            Vector3::zeros()
        };

        vel.x -= drag.x * dt;
        vel.y -= (G_ACCEL_MPS2 + drag.y) * dt;
        vel.z -= drag.z * dt;
        pos += vel * dt;
        t += dt;
    }

    // Values from the first step at or past the target range are reported
    // directly; the reference tolerances assume no back-interpolation.
    let speed = vel.norm();
    RawBallisticResult {
        drop_m: -pos.y,
        drift_m: pos.z,
        time_s: t,
        velocity_mps: speed,
        energy_j: 0.5 * ammo.bullet_mass_kg() * speed * speed,
        mach: speed / c,
    }
}

/// Round half-away-from-zero at the given number of decimal places
fn round_dp(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DragModel;
    use crate::inputs::{Ammunition, ZeroType};

    fn test_profile() -> RifleProfile {
        RifleProfile {
            ammunition: Ammunition {
                name: ".308 Win 178 gr ELD-X".to_string(),
                bullet_mass_grains: 178.0,
                bc_g1: 0.552,
                bc_g7: Some(0.278),
                bc_bands: None,
                preferred_drag_model: Some(DragModel::G7),
                muzzle_velocity_mps: 792.0,
            },
            zero_distance_m: 100.0,
            zero_type: ZeroType::Gee,
            sight_height_cm: 4.5,
            drag_model: None,
        }
    }

    #[test]
    fn test_round_dp_half_away_from_zero() {
        assert_eq!(round_dp(0.05, 1), 0.1);
        assert_eq!(round_dp(-0.05, 1), -0.1);
        assert_eq!(round_dp(1.2345, 3), 1.234);
        assert_eq!(round_dp(1.2335, 3), 1.234);
        assert_eq!(round_dp(2.5, 0), 3.0);
        assert_eq!(round_dp(-2.5, 0), -3.0);
    }

    #[test]
    fn test_no_wind_no_drift() {
        let result = calculate_trajectory(&test_profile(), 300.0, &Environment::standard(0.0, 0.0));
        assert!(result.drift_cm.abs() < 0.1);
    }

    #[test]
    fn test_head_and_tail_wind_no_drift() {
        for angle in [0.0, 180.0] {
            let result =
                calculate_trajectory(&test_profile(), 300.0, &Environment::standard(8.0, angle));
            assert!(
                result.drift_cm.abs() < 3.0,
                "drift {} at wind angle {angle}",
                result.drift_cm
            );
        }
    }

    #[test]
    fn test_crosswind_from_right_drifts_right() {
        let result = calculate_trajectory(&test_profile(), 300.0, &Environment::standard(5.0, 90.0));
        assert!(result.drift_cm > 0.0, "drift: {}", result.drift_cm);
    }

    #[test]
    fn test_left_crosswind_mirrors_right() {
        let right = calculate_trajectory(&test_profile(), 300.0, &Environment::standard(5.0, 90.0));
        let left = calculate_trajectory(&test_profile(), 300.0, &Environment::standard(5.0, 270.0));
        assert!((right.drift_cm + left.drift_cm).abs() < 0.3);
    }

    #[test]
    fn test_zero_muzzle_velocity_degenerate_but_finite() {
        let mut profile = test_profile();
        profile.ammunition.muzzle_velocity_mps = 0.0;
        let result = calculate_trajectory(&profile, 100.0, &Environment::standard(0.0, 0.0));

        assert!(result.time_s.is_finite());
        assert!((result.time_s - MAX_FLIGHT_TIME_S).abs() < 0.002);
        // Five seconds of free fall, slightly braked by drag
        assert!(result.drop_cm > 10_000.0 && result.drop_cm < 13_000.0);
        assert!(result.velocity_mps.is_finite());
        assert!(result.energy_j.is_finite());
        assert!(result.mach.is_finite());
    }

    #[test]
    fn test_raw_and_rounded_agree() {
        let profile = test_profile();
        let env = Environment::standard(4.0, 45.0);
        let raw = calculate_trajectory_raw(&profile, 300.0, &env);
        let rounded = calculate_trajectory(&profile, 300.0, &env);

        assert!((raw.drop_m * 100.0 - rounded.drop_cm).abs() <= 0.05);
        assert!((raw.drift_m * 100.0 - rounded.drift_cm).abs() <= 0.05);
        assert!((raw.time_s - rounded.time_s).abs() <= 0.0005);
        assert!((raw.velocity_mps - rounded.velocity_mps).abs() <= 0.5);
        assert!((raw.mach - rounded.mach).abs() <= 0.005);
    }

    #[test]
    fn test_energy_uses_rounded_velocity() {
        let profile = test_profile();
        let result = calculate_trajectory(&profile, 200.0, &Environment::standard(0.0, 0.0));
        let expected =
            (0.5 * profile.ammunition.bullet_mass_kg() * result.velocity_mps * result.velocity_mps)
                .round();
        assert_eq!(result.energy_j, expected);
    }

    #[test]
    fn test_transonic_step_refinement_continuous() {
        // A slow load passes through the transonic band well inside 500 m;
        // the step change must not produce a visible kink in drop vs range.
        let mut profile = test_profile();
        profile.ammunition.muzzle_velocity_mps = 420.0;

        let env = Environment::standard(0.0, 0.0);
        let mut previous_drop = f64::NEG_INFINITY;
        for d in [150.0, 200.0, 250.0, 300.0, 350.0, 400.0] {
            let result = calculate_trajectory(&profile, d, &env);
            assert!(
                result.drop_cm > previous_drop,
                "drop not increasing at {d} m"
            );
            previous_drop = result.drop_cm;
        }
    }
}
