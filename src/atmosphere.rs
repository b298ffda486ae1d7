//! Atmospheric model: air density, speed of sound and ISA pressure.
//!
//! Density uses the virtual-temperature formulation for moist air: actual
//! vapor pressure from the Buck (1981) saturation curve, then the two-gas
//! partial-pressure sum `ρ = P_d/(R_d·T) + e/(R_v·T)`. Humid air is less
//! dense than dry air at the same temperature and pressure.

use crate::constants::{
    CELSIUS_TO_KELVIN, ISA_LAPSE_RATE, ISA_PRESSURE_EXPONENT, ISA_TEMPERATURE_K, R_DRY_AIR,
    R_WATER_VAPOR, SPEED_OF_SOUND_0C,
};

/// Speed of sound in air at the given temperature (m/s).
///
/// `c = 331.3 · √(1 + T/273.15)`; ≈ 340.3 m/s at 15 °C.
pub fn speed_of_sound(temperature_c: f64) -> f64 {
    SPEED_OF_SOUND_0C * (1.0 + temperature_c / CELSIUS_TO_KELVIN).sqrt()
}

/// Saturation vapor pressure over water (Pa), Buck 1981.
///
/// `e_s(T) = 611.21 · exp((18.678 − T/234.5) · (T / (257.14 + T)))`
/// with T in °C. Accurate to a fraction of a percent for −40…+50 °C.
pub fn saturation_vapor_pressure(temperature_c: f64) -> f64 {
    611.21 * ((18.678 - temperature_c / 234.5) * (temperature_c / (257.14 + temperature_c))).exp()
}

/// Air density (kg/m³) from temperature (°C), station pressure (hPa) and
/// relative humidity as a 0…1 fraction.
pub fn air_density(temperature_c: f64, pressure_hpa: f64, humidity: f64) -> f64 {
    let temp_k = temperature_c + CELSIUS_TO_KELVIN;
    let pressure_pa = pressure_hpa * 100.0;

    let vapor_pressure = humidity * saturation_vapor_pressure(temperature_c);
    let dry_pressure = pressure_pa - vapor_pressure;

    dry_pressure / (R_DRY_AIR * temp_k) + vapor_pressure / (R_WATER_VAPOR * temp_k)
}

/// ICAO standard-atmosphere pressure (hPa) at the given altitude.
///
/// `P(h) = P0 · (1 − L·h/T0)^5.255`. Valid through the troposphere
/// (~11 km); above that the constant-lapse-rate assumption breaks down.
pub fn calculate_pressure_from_altitude(altitude_m: f64, sea_level_pressure_hpa: f64) -> f64 {
    let base = 1.0 - ISA_LAPSE_RATE * altitude_m / ISA_TEMPERATURE_K;
    sea_level_pressure_hpa * base.powf(ISA_PRESSURE_EXPONENT)
}
