use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;

use rifle_ballistics::{
    air_density, calculate_pressure_from_altitude, calculate_trajectory, cm_to_mil, cm_to_moa,
    speed_of_sound, zero_angle, Ammunition, BcBand, BcBands, DragModel, Environment, RifleProfile,
    ZeroType,
};

#[derive(Parser)]
#[command(name = "rifle-ballistics")]
#[command(version = "0.3.0")]
#[command(about = "Hunting rifle trajectory calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the trajectory at a single target distance
    Trajectory {
        /// Target distance (meters)
        #[arg(short = 'd', long)]
        distance: f64,

        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        environment: EnvArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print a range card (DOPE table) over a distance interval
    RangeCard {
        /// First distance (meters)
        #[arg(long, default_value = "50.0")]
        start: f64,

        /// Last distance (meters)
        #[arg(long, default_value = "300.0")]
        end: f64,

        /// Distance step (meters)
        #[arg(long, default_value = "50.0")]
        step: f64,

        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        environment: EnvArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Solve the launch angle for the profile's zero condition
    Zero {
        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        environment: EnvArgs,
    },

    /// Report standard-atmosphere pressure and local air data
    Atmosphere {
        /// Altitude above sea level (meters)
        #[arg(short = 'a', long, default_value = "0.0")]
        altitude: f64,

        /// Sea-level reference pressure (hPa)
        #[arg(long, default_value = "1013.25")]
        sea_level_pressure: f64,

        #[command(flatten)]
        environment: EnvArgs,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// Muzzle velocity (m/s)
    #[arg(short = 'v', long)]
    velocity: f64,

    /// Bullet mass (grains)
    #[arg(short = 'm', long)]
    mass: f64,

    /// G1 ballistic coefficient
    #[arg(long)]
    bc_g1: f64,

    /// G7 ballistic coefficient
    #[arg(long)]
    bc_g7: Option<f64>,

    /// Velocity-banded BC as THRESHOLD:BC (m/s), highest threshold first; repeatable
    #[arg(long = "bc-band", value_parser = parse_bc_band)]
    bc_bands: Vec<BcBand>,

    /// Drag model (G1, G7)
    #[arg(long, default_value = "g1")]
    drag_model: DragModelArg,

    /// Zero distance (meters)
    #[arg(long, default_value = "100.0")]
    zero_distance: f64,

    /// Zero condition
    #[arg(long, default_value = "gee")]
    zero_type: ZeroTypeArg,

    /// Sight height above bore (cm)
    #[arg(long, default_value = "4.5")]
    sight_height: f64,
}

#[derive(Args)]
struct EnvArgs {
    /// Air temperature (°C)
    #[arg(short = 't', long, default_value = "15.0")]
    temperature: f64,

    /// Station pressure (hPa)
    #[arg(short = 'p', long, default_value = "1013.25")]
    pressure: f64,

    /// Relative humidity (0-100%)
    #[arg(long, default_value = "50.0")]
    humidity: f64,

    /// Wind speed (m/s)
    #[arg(short = 'w', long, default_value = "0.0")]
    wind_speed: f64,

    /// Wind angle (degrees; 0 = headwind, 90 = from the right)
    #[arg(long, default_value = "90.0")]
    wind_angle: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DragModelArg {
    G1,
    G7,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ZeroTypeArg {
    /// Bullet crosses the sight line at the zero distance
    Standard,
    /// Bullet impacts 4 cm high at the zero distance
    Gee,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn parse_bc_band(s: &str) -> Result<BcBand, String> {
    let (threshold, bc) = s
        .split_once(':')
        .ok_or_else(|| format!("expected THRESHOLD:BC, got '{s}'"))?;
    Ok(BcBand {
        velocity_mps: threshold
            .parse()
            .map_err(|_| format!("invalid threshold '{threshold}'"))?,
        bc: bc.parse().map_err(|_| format!("invalid BC '{bc}'"))?,
    })
}

impl ProfileArgs {
    fn build(&self) -> Result<RifleProfile, Box<dyn Error>> {
        if self.mass <= 0.0 {
            return Err("bullet mass must be positive".into());
        }
        if self.bc_g1 <= 0.0 || self.bc_g7.is_some_and(|bc| bc <= 0.0) {
            return Err("ballistic coefficients must be positive".into());
        }
        if self.velocity < 0.0 {
            return Err("muzzle velocity must not be negative".into());
        }
        if self.zero_distance <= 0.0 {
            return Err("zero distance must be positive".into());
        }
        if self.sight_height <= 0.0 {
            return Err("sight height must be positive".into());
        }

        let bc_bands = if self.bc_bands.is_empty() {
            None
        } else {
            Some(BcBands::new(self.bc_bands.clone())?)
        };

        Ok(RifleProfile {
            ammunition: Ammunition {
                name: "cli".to_string(),
                bullet_mass_grains: self.mass,
                bc_g1: self.bc_g1,
                bc_g7: self.bc_g7,
                bc_bands,
                preferred_drag_model: None,
                muzzle_velocity_mps: self.velocity,
            },
            zero_distance_m: self.zero_distance,
            zero_type: match self.zero_type {
                ZeroTypeArg::Standard => ZeroType::Standard,
                ZeroTypeArg::Gee => ZeroType::Gee,
            },
            sight_height_cm: self.sight_height,
            drag_model: Some(match self.drag_model {
                DragModelArg::G1 => DragModel::G1,
                DragModelArg::G7 => DragModel::G7,
            }),
        })
    }
}

impl EnvArgs {
    fn build(&self) -> Result<Environment, Box<dyn Error>> {
        if !(-80.0..=80.0).contains(&self.temperature) {
            return Err("temperature must be within -80..80 °C".into());
        }
        if !(100.0..=1200.0).contains(&self.pressure) {
            return Err("pressure must be within 100..1200 hPa".into());
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err("humidity must be within 0..100 %".into());
        }
        if self.wind_speed < 0.0 {
            return Err("wind speed must not be negative".into());
        }

        Ok(Environment {
            temperature_c: self.temperature,
            pressure_hpa: self.pressure,
            humidity: self.humidity / 100.0,
            altitude_m: 0.0,
            wind_speed_mps: self.wind_speed,
            wind_angle_deg: self.wind_angle,
        })
    }
}

#[derive(Serialize)]
struct RangeCardRow {
    distance_m: f64,
    drop_cm: f64,
    drop_moa: f64,
    drop_mil: f64,
    drift_cm: f64,
    drift_moa: f64,
    drift_mil: f64,
    time_s: f64,
    velocity_mps: f64,
    energy_j: f64,
    mach: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Trajectory {
            distance,
            profile,
            environment,
            output,
        } => {
            if distance <= 0.0 {
                return Err("target distance must be positive".into());
            }
            let profile = profile.build()?;
            let env = environment.build()?;
            let result = calculate_trajectory(&profile, distance, &env);

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Csv => {
                    println!("distance_m,drop_cm,drift_cm,time_s,velocity_mps,energy_j,mach");
                    println!(
                        "{:.0},{:.1},{:.1},{:.3},{:.0},{:.0},{:.2}",
                        distance,
                        result.drop_cm,
                        result.drift_cm,
                        result.time_s,
                        result.velocity_mps,
                        result.energy_j,
                        result.mach
                    );
                }
                OutputFormat::Table => {
                    println!("TRAJECTORY at {distance:.0} m");
                    println!("  Drop:      {:>8.1} cm", result.drop_cm);
                    println!("  Drift:     {:>8.1} cm", result.drift_cm);
                    println!("  Time:      {:>8.3} s", result.time_s);
                    println!("  Velocity:  {:>8.0} m/s", result.velocity_mps);
                    println!("  Energy:    {:>8.0} J", result.energy_j);
                    println!("  Mach:      {:>8.2}", result.mach);
                }
            }
        }

        Commands::RangeCard {
            start,
            end,
            step,
            profile,
            environment,
            output,
        } => {
            if start <= 0.0 || end < start || step <= 0.0 {
                return Err("range card interval must satisfy 0 < start <= end, step > 0".into());
            }
            let profile = profile.build()?;
            let env = environment.build()?;

            let mut rows = Vec::new();
            let mut distance = start;
            while distance <= end + 1e-9 {
                let result = calculate_trajectory(&profile, distance, &env);
                rows.push(RangeCardRow {
                    distance_m: distance,
                    drop_cm: result.drop_cm,
                    drop_moa: cm_to_moa(result.drop_cm, distance),
                    drop_mil: cm_to_mil(result.drop_cm, distance),
                    drift_cm: result.drift_cm,
                    drift_moa: cm_to_moa(result.drift_cm, distance),
                    drift_mil: cm_to_mil(result.drift_cm, distance),
                    time_s: result.time_s,
                    velocity_mps: result.velocity_mps,
                    energy_j: result.energy_j,
                    mach: result.mach,
                });
                distance += step;
            }

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
                OutputFormat::Csv => {
                    println!(
                        "distance_m,drop_cm,drop_moa,drop_mil,drift_cm,drift_moa,drift_mil,time_s,velocity_mps,energy_j,mach"
                    );
                    for row in &rows {
                        println!(
                            "{:.0},{:.1},{:.2},{:.2},{:.1},{:.2},{:.2},{:.3},{:.0},{:.0},{:.2}",
                            row.distance_m,
                            row.drop_cm,
                            row.drop_moa,
                            row.drop_mil,
                            row.drift_cm,
                            row.drift_moa,
                            row.drift_mil,
                            row.time_s,
                            row.velocity_mps,
                            row.energy_j,
                            row.mach
                        );
                    }
                }
                OutputFormat::Table => {
                    println!(
                        "{:>6} {:>9} {:>7} {:>6} {:>9} {:>7} {:>6} {:>7} {:>6} {:>7} {:>5}",
                        "m", "drop cm", "MOA", "MIL", "drift cm", "MOA", "MIL", "time s", "m/s", "J",
                        "Mach"
                    );
                    for row in &rows {
                        println!(
                            "{:>6.0} {:>9.1} {:>7.2} {:>6.2} {:>9.1} {:>7.2} {:>6.2} {:>7.3} {:>6.0} {:>7.0} {:>5.2}",
                            row.distance_m,
                            row.drop_cm,
                            row.drop_moa,
                            row.drop_mil,
                            row.drift_cm,
                            row.drift_moa,
                            row.drift_mil,
                            row.time_s,
                            row.velocity_mps,
                            row.energy_j,
                            row.mach
                        );
                    }
                }
            }
        }

        Commands::Zero {
            profile,
            environment,
        } => {
            let profile = profile.build()?;
            let env = environment.build()?;
            let rho = air_density(env.temperature_c, env.pressure_hpa, env.humidity);
            let c = speed_of_sound(env.temperature_c);
            let angle = zero_angle(&profile, rho, c);

            println!("ZERO ANGLE for {:.0} m", profile.zero_distance_m);
            println!("  {:.4} mrad", angle * 1000.0);
            println!("  {:.3} MOA", angle.to_degrees() * 60.0);
            println!("  {:.4} deg", angle.to_degrees());
        }

        Commands::Atmosphere {
            altitude,
            sea_level_pressure,
            environment,
        } => {
            let env = environment.build()?;
            let pressure = calculate_pressure_from_altitude(altitude, sea_level_pressure);
            let rho = air_density(env.temperature_c, env.pressure_hpa, env.humidity);
            let c = speed_of_sound(env.temperature_c);

            println!("ATMOSPHERE");
            println!("  ISA pressure at {altitude:.0} m: {pressure:.2} hPa");
            println!(
                "  Air density at {:.1} °C / {:.2} hPa / {:.0}% RH: {:.4} kg/m³",
                env.temperature_c,
                env.pressure_hpa,
                env.humidity * 100.0,
                rho
            );
            println!("  Speed of sound: {c:.1} m/s");
        }
    }

    Ok(())
}
