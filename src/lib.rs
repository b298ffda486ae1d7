//! # rifle-ballistics
//!
//! Exterior-ballistics computation core for a hunting trajectory calculator:
//! given a rifle/ammunition profile, a target distance and atmospheric
//! conditions, compute the bullet's drop, lateral drift, time of flight,
//! remaining velocity, kinetic energy and Mach number at the target.
//!
//! The core is a pure function of its inputs — a point-mass integrator over
//! the standard G1/G7 drag tables, a bisection solver for the launch angle
//! that satisfies the sighting-in condition (including the German GEE
//! convention), and a moist-air atmosphere model. There is no I/O, no shared
//! state and no background work; concurrent callers need no coordination.
//!
//! ```
//! use rifle_ballistics::{
//!     calculate_trajectory, Ammunition, DragModel, Environment, RifleProfile, ZeroType,
//! };
//!
//! let profile = RifleProfile {
//!     ammunition: Ammunition {
//!         name: ".308 Win 178 gr ELD-X".to_string(),
//!         bullet_mass_grains: 178.0,
//!         bc_g1: 0.552,
//!         bc_g7: Some(0.278),
//!         bc_bands: None,
//!         preferred_drag_model: Some(DragModel::G7),
//!         muzzle_velocity_mps: 792.0,
//!     },
//!     zero_distance_m: 100.0,
//!     zero_type: ZeroType::Gee,
//!     sight_height_cm: 4.5,
//!     drag_model: None,
//! };
//!
//! let result = calculate_trajectory(&profile, 300.0, &Environment::standard(0.0, 0.0));
//! assert!(result.velocity_mps > 500.0);
//! ```

pub mod angular;
pub mod atmosphere;
pub mod constants;
pub mod drag;
pub mod drag_tables;
pub mod inputs;
pub mod trajectory;
pub mod zeroing;

pub use angular::{cm_to_mil, cm_to_moa};
pub use atmosphere::{
    air_density, calculate_pressure_from_altitude, saturation_vapor_pressure, speed_of_sound,
};
pub use drag::{drag_coefficient, drag_deceleration, DragModel};
pub use inputs::{
    Ammunition, BandListError, BcBand, BcBands, Environment, EnvironmentOverrides, RifleProfile,
    ZeroType,
};
pub use trajectory::{
    calculate_trajectory, calculate_trajectory_raw, BallisticResult, RawBallisticResult,
};
pub use zeroing::zero_angle;
