//! Input model: ammunition, rifle profile and shooting environment.
//!
//! These structs are constructed by the surrounding collaborators (profile
//! storage, UI) and consumed by value or shared reference; nothing in the
//! core mutates them. Validation happens at construction time where a list
//! shape matters (`BcBands`); scalar plausibility is the caller's job.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::constants::ISA_PRESSURE_HPA;
use crate::drag::DragModel;

/// A single velocity band: `bc` applies while the bullet is at or above
/// `velocity_mps`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BcBand {
    pub velocity_mps: f64,
    pub bc: f64,
}

/// Velocity-banded ballistic coefficients, thresholds strictly descending.
///
/// Manufacturers publish stepped BCs per velocity regime (Sierra notably);
/// the band whose threshold the current speed still meets is in effect, and
/// speeds below every threshold fall into the last (slowest) band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BcBand>", into = "Vec<BcBand>")]
pub struct BcBands(Vec<BcBand>);

impl BcBands {
    pub fn new(bands: Vec<BcBand>) -> Result<Self, BandListError> {
        if bands.is_empty() {
            return Err(BandListError::Empty);
        }
        for pair in bands.windows(2) {
            if pair[1].velocity_mps >= pair[0].velocity_mps {
                return Err(BandListError::NotDescending {
                    upper: pair[0].velocity_mps,
                    lower: pair[1].velocity_mps,
                });
            }
        }
        Ok(BcBands(bands))
    }

    /// BC of the first band whose threshold the speed meets; the last band
    /// if the speed is below every threshold.
    pub fn bc_for_speed(&self, speed_mps: f64) -> f64 {
        self.0
            .iter()
            .find(|band| band.velocity_mps <= speed_mps)
            .unwrap_or_else(|| self.0.last().expect("bands validated non-empty"))
            .bc
    }

    pub fn bands(&self) -> &[BcBand] {
        &self.0
    }
}

impl TryFrom<Vec<BcBand>> for BcBands {
    type Error = BandListError;

    fn try_from(bands: Vec<BcBand>) -> Result<Self, Self::Error> {
        BcBands::new(bands)
    }
}

impl From<BcBands> for Vec<BcBand> {
    fn from(bands: BcBands) -> Self {
        bands.0
    }
}

/// Rejected velocity-band list
#[derive(Debug, Clone, PartialEq)]
pub enum BandListError {
    Empty,
    NotDescending { upper: f64, lower: f64 },
}

impl fmt::Display for BandListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandListError::Empty => write!(f, "velocity band list must not be empty"),
            BandListError::NotDescending { upper, lower } => write!(
                f,
                "velocity bands must be sorted by descending threshold: {lower} m/s follows {upper} m/s"
            ),
        }
    }
}

impl Error for BandListError {}

/// One load: bullet and muzzle velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ammunition {
    /// Display name, e.g. ".308 Win 178 gr ELD-X"
    pub name: String,
    /// Bullet mass in grains
    pub bullet_mass_grains: f64,
    /// Primary G1 ballistic coefficient
    pub bc_g1: f64,
    /// G7 ballistic coefficient, when the maker publishes one
    pub bc_g7: Option<f64>,
    /// Velocity-banded BCs, overriding the scalar coefficients when present
    pub bc_bands: Option<BcBands>,
    /// Drag model the maker's data sheet is referenced to
    pub preferred_drag_model: Option<DragModel>,
    /// Muzzle velocity in m/s
    pub muzzle_velocity_mps: f64,
}

impl Ammunition {
    /// Effective ballistic coefficient at the given speed under the active
    /// drag model: banded BC first, else the G7 coefficient when solving
    /// against G7, else the G1 coefficient.
    pub fn effective_bc(&self, speed_mps: f64, model: DragModel) -> f64 {
        if let Some(bands) = &self.bc_bands {
            return bands.bc_for_speed(speed_mps);
        }
        match model {
            DragModel::G7 => self.bc_g7.unwrap_or(self.bc_g1),
            DragModel::G1 => self.bc_g1,
        }
    }

    /// Bullet mass in kilograms
    pub fn bullet_mass_kg(&self) -> f64 {
        self.bullet_mass_grains * crate::constants::GRAINS_TO_KG
    }
}

/// Zero condition the sight is adjusted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroType {
    /// Bullet crosses the sight line at the zero distance
    Standard,
    /// Günstigste Einschussentfernung: bullet impacts 4 cm above the point
    /// of aim at the zero distance
    Gee,
}

/// A sighted-in rifle with one load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RifleProfile {
    pub ammunition: Ammunition,
    /// Zero distance in meters
    pub zero_distance_m: f64,
    pub zero_type: ZeroType,
    /// Bore-to-sight-axis distance in cm, typically 2–10
    pub sight_height_cm: f64,
    /// Drag model override; falls back to the ammunition's preference, then G1
    pub drag_model: Option<DragModel>,
}

impl RifleProfile {
    /// Drag model in effect for this profile
    pub fn active_drag_model(&self) -> DragModel {
        self.drag_model
            .or(self.ammunition.preferred_drag_model)
            .unwrap_or(DragModel::G1)
    }

    pub fn sight_height_m(&self) -> f64 {
        self.sight_height_cm / 100.0
    }
}

/// Atmospheric and wind conditions at the shooting position.
///
/// Wind angle convention: 0° is a pure headwind, 90° a crosswind from the
/// right, 180° a pure tailwind. The angle feeds `sin`/`cos` directly, so
/// values outside [0, 360) are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    /// Relative humidity as a 0…1 fraction
    pub humidity: f64,
    /// Station altitude in meters; informational, density comes from the
    /// measured pressure
    pub altitude_m: f64,
    pub wind_speed_mps: f64,
    pub wind_angle_deg: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::standard(0.0, 0.0)
    }
}

/// Optional per-field replacements for the ISA defaults
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentOverrides {
    pub temperature_c: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub humidity: Option<f64>,
    pub altitude_m: Option<f64>,
}

impl Environment {
    /// ICAO standard conditions (15 °C, 1013.25 hPa, 50% RH, sea level)
    /// with the given wind.
    pub fn standard(wind_speed_mps: f64, wind_angle_deg: f64) -> Self {
        Environment {
            temperature_c: 15.0,
            pressure_hpa: ISA_PRESSURE_HPA,
            humidity: 0.5,
            altitude_m: 0.0,
            wind_speed_mps,
            wind_angle_deg,
        }
    }

    /// Standard conditions with selected scalars replaced
    pub fn standard_with(
        wind_speed_mps: f64,
        wind_angle_deg: f64,
        overrides: EnvironmentOverrides,
    ) -> Self {
        let base = Environment::standard(wind_speed_mps, wind_angle_deg);
        Environment {
            temperature_c: overrides.temperature_c.unwrap_or(base.temperature_c),
            pressure_hpa: overrides.pressure_hpa.unwrap_or(base.pressure_hpa),
            humidity: overrides.humidity.unwrap_or(base.humidity),
            altitude_m: overrides.altitude_m.unwrap_or(base.altitude_m),
            ..base
        }
    }
}
