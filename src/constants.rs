/// Physical constants used in the trajectory calculations

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Conversion factor: grains to kilograms
pub const GRAINS_TO_KG: f64 = 0.0000648;

/// Standard air density at sea level (kg/m³), ICAO dry air at 15 °C
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Drag-model scaling constant
///
/// Value: 0.000871 = ρ_std / (2 · SD_ref), with ρ_std = 1.225 kg/m³ and the
/// G1/G7 reference sectional density SD_ref = 703.07 kg/m².
///
/// Deceleration = DRAG_SCALE * (ρ/ρ_std) * (Cd/BC) * v², in m/s².
/// The retained-velocity curves of published G1/G7 trajectories depend on
/// this literal; do not re-derive it from rounded inputs.
pub const DRAG_SCALE: f64 = 0.000871;

/// Specific gas constant for dry air, J/(kg·K)
pub const R_DRY_AIR: f64 = 287.058;

/// Specific gas constant for water vapor, J/(kg·K)
pub const R_WATER_VAPOR: f64 = 461.495;

/// Speed of sound in dry air at 0 °C (m/s)
pub const SPEED_OF_SOUND_0C: f64 = 331.3;

/// 0 °C in Kelvin
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// ICAO standard sea-level pressure (hPa)
pub const ISA_PRESSURE_HPA: f64 = 1013.25;

/// ICAO standard sea-level temperature (K)
pub const ISA_TEMPERATURE_K: f64 = 288.15;

/// ICAO tropospheric temperature lapse rate (K/m), valid to ~11 km
pub const ISA_LAPSE_RATE: f64 = 0.0065;

/// Barometric-formula exponent g·M/(R·L) for the troposphere
pub const ISA_PRESSURE_EXPONENT: f64 = 5.255;

// Integration parameters.
//
// Step sizes, the transonic window and the flight-time cap are part of the
// numerical contract: the zero-angle solver and the regression tolerances
// are calibrated against forward Euler at exactly these values.

/// Coarse integration time step (s)
pub const DT_COARSE: f64 = 0.001;

/// Refined time step inside the transonic window (s)
pub const DT_TRANSONIC: f64 = 0.0005;

/// Lower edge of the transonic refinement window (Mach)
pub const TRANSONIC_MACH_LOW: f64 = 0.9;

/// Upper edge of the transonic refinement window (Mach)
pub const TRANSONIC_MACH_HIGH: f64 = 1.1;

/// Simulated-flight-time safety cap (s)
///
/// Domain bound, not a wall-clock timeout. Bounds the loop for degenerate
/// inputs such as zero muzzle velocity, where the range is never reached.
pub const MAX_FLIGHT_TIME_S: f64 = 5.0;

/// Minimum relative airspeed below which drag is treated as zero (m/s)
pub const MIN_AIRSPEED_THRESHOLD: f64 = 1e-6;

// Zero-angle solver parameters.

/// Upper bisection bound for the launch angle (rad), ≈ 1.15°
pub const ZERO_ANGLE_MAX_RAD: f64 = 0.02;

/// Bisection iteration count; halves the 0.02 rad bracket to ~2e-11 rad
pub const ZERO_ANGLE_ITERATIONS: usize = 30;

/// GEE zero condition: impact height above the point of aim at the zero
/// distance (m). Günstigste Einschussentfernung, the German hunting
/// convention of sighting in 4 cm high at 100 m.
pub const GEE_OFFSET_M: f64 = 0.04;

// Angular conversions.

/// One minute of angle at 100 m, in cm
pub const CM_PER_MOA_AT_100M: f64 = 2.908;

/// One milliradian at 100 m, in cm (exact by convention)
pub const CM_PER_MIL_AT_100M: f64 = 10.0;
