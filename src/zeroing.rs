//! Zero-angle solver.
//!
//! Finds the muzzle elevation that satisfies the profile's zero condition by
//! bisection over a planar, no-wind rendition of the trajectory. Over the
//! [0, 0.02] rad bracket the impact height at any hunting-relevant zero
//! distance is strictly increasing in the angle, so the bracket halves
//! cleanly to convergence.

use crate::constants::{
    DT_COARSE, GEE_OFFSET_M, G_ACCEL_MPS2, MAX_FLIGHT_TIME_S, MIN_AIRSPEED_THRESHOLD,
    ZERO_ANGLE_ITERATIONS, ZERO_ANGLE_MAX_RAD,
};
use crate::drag::drag_deceleration;
use crate::inputs::{RifleProfile, ZeroType};

/// Launch angle (rad above horizontal) satisfying the profile's zero
/// condition under the given atmosphere.
///
/// The atmosphere must be the same `(ρ, c)` pair later fed to the full
/// integrator, otherwise the trajectory will not reproduce the zero
/// condition at the zero distance.
pub fn zero_angle(profile: &RifleProfile, air_density: f64, speed_of_sound: f64) -> f64 {
    let target_height = match profile.zero_type {
        ZeroType::Standard => profile.sight_height_m(),
        ZeroType::Gee => profile.sight_height_m() + GEE_OFFSET_M,
    };

    let mut lower = 0.0_f64;
    let mut upper = ZERO_ANGLE_MAX_RAD;

    for _ in 0..ZERO_ANGLE_ITERATIONS {
        let mid = 0.5 * (lower + upper);
        let height = planar_height_at_zero_distance(profile, mid, air_density, speed_of_sound);
        if height < target_height {
            lower = mid;
        } else {
            upper = mid;
        }
    }

    0.5 * (lower + upper)
}

/// Bullet height above the bore origin at the zero distance, integrated in
/// the vertical plane with no wind and the fixed coarse step.
fn planar_height_at_zero_distance(
    profile: &RifleProfile,
    angle_rad: f64,
    air_density: f64,
    speed_of_sound: f64,
) -> f64 {
    let ammo = &profile.ammunition;
    let model = profile.active_drag_model();

    let mut x = 0.0;
    let mut y = 0.0;
    let mut vx = ammo.muzzle_velocity_mps * angle_rad.cos();
    let mut vy = ammo.muzzle_velocity_mps * angle_rad.sin();
    let mut t = 0.0;

    while x < profile.zero_distance_m && t < MAX_FLIGHT_TIME_S {
        let speed = (vx * vx + vy * vy).sqrt();

        let (drag_x, drag_y) = if speed > MIN_AIRSPEED_THRESHOLD {
            let bc = ammo.effective_bc(speed, model);
            let decel = drag_deceleration(speed, bc, air_density, speed_of_sound, model);
            (decel * vx / speed, decel * vy / speed)
        } else {
            (0.0, 0.0)
        };

        vx -= drag_x * DT_COARSE;
        vy -= (G_ACCEL_MPS2 + drag_y) * DT_COARSE;
        x += vx * DT_COARSE;
        y += vy * DT_COARSE;
        t += DT_COARSE;
    }

    y
}
