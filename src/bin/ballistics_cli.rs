use ballistics_solver::{
    atmosphere_correction, gyroscopic_stability, point_blank_range, solve, solve_corrected,
    vertical_deflection, CorrectionParameters, DragModel, Sample, ShotParameters,
    StabilityUpdate, Termination, MAX_YARDS,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ballistics-cli")]
#[command(version)]
#[command(about = "Per-yard trajectory tables for small-arms projectiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a range card
    Table {
        #[command(flatten)]
        shot: ShotArgs,

        /// Read shot parameters from a JSON file instead of the flags above
        #[arg(long)]
        params: Option<PathBuf>,

        /// Zero range (yards); defaults to 100 unless a params file is given
        #[arg(short = 'z', long)]
        zero: Option<f64>,

        /// Height above the line of sight at the zero range (inches)
        #[arg(long, default_value = "0.0")]
        y_intercept: f64,

        /// Correct the ballistic coefficient for the given weather
        #[arg(long)]
        weather: bool,

        #[command(flatten)]
        atmosphere: AtmosphereArgs,

        /// Apply aerodynamic jump and spin drift
        #[arg(long)]
        corrected: bool,

        #[command(flatten)]
        bullet: BulletArgs,

        /// Form factor applied to drag
        #[arg(long, default_value = "1.0")]
        form_factor: f64,

        /// Evaluate stability at the muzzle velocity only
        #[arg(long)]
        fixed_stability: bool,

        /// Yards between rows
        #[arg(long, default_value = "100")]
        step: usize,

        /// Last yard to print
        #[arg(short = 'r', long, default_value = "1000")]
        range: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Compute the bore angle for a zero
    Zero {
        #[command(flatten)]
        shot: ShotArgs,

        /// Zero range (yards)
        #[arg(short = 'z', long, default_value = "100.0")]
        zero: f64,

        /// Height above the line of sight at the zero range (inches)
        #[arg(long, default_value = "0.0")]
        y_intercept: f64,
    },

    /// Gyroscopic stability and aerodynamic jump
    Stability {
        #[command(flatten)]
        bullet: BulletArgs,

        /// Velocity (ft/s)
        #[arg(short = 'v', long, default_value = "2650.0")]
        velocity: f64,

        #[command(flatten)]
        atmosphere: AtmosphereArgs,
    },

    /// Point-blank range for a vital zone (level fire, still air)
    Pbr {
        #[command(flatten)]
        load: LoadArgs,

        /// Vital zone diameter (inches)
        #[arg(long, default_value = "6.0")]
        vital: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Args, Debug)]
struct ShotArgs {
    #[command(flatten)]
    load: LoadArgs,

    /// Shooting angle, uphill positive (degrees)
    #[arg(short = 'a', long, default_value = "0.0", allow_hyphen_values = true)]
    angle: f64,

    /// Wind speed (mph)
    #[arg(long, default_value = "0.0")]
    wind_speed: f64,

    /// Wind angle (0 = headwind, 90 = right to left, 180 = tailwind)
    #[arg(long, default_value = "90.0", allow_hyphen_values = true)]
    wind_angle: f64,
}

/// Projectile and sight, without range conditions
#[derive(Args, Debug)]
struct LoadArgs {
    /// Drag model (g1, g2, g5, g6, g7, g8)
    #[arg(short = 'd', long, default_value = "g7")]
    drag_model: DragModel,

    /// Ballistic coefficient
    #[arg(short = 'b', long, default_value = "0.224")]
    bc: f64,

    /// Muzzle velocity (ft/s)
    #[arg(short = 'v', long, default_value = "2650.0")]
    velocity: f64,

    /// Sight height over bore (inches)
    #[arg(short = 's', long, default_value = "1.5")]
    sight_height: f64,
}

impl ShotArgs {
    fn to_parameters(&self) -> ShotParameters {
        ShotParameters {
            drag_model: self.load.drag_model,
            drag_coefficient: self.load.bc,
            muzzle_velocity: self.load.velocity,
            sight_height: self.load.sight_height,
            shooting_angle: self.angle,
            zero_angle: 0.0,
            wind_speed: self.wind_speed,
            wind_angle: self.wind_angle,
            max_yards: MAX_YARDS,
        }
    }
}

#[derive(Args, Debug)]
struct AtmosphereArgs {
    /// Altitude (feet)
    #[arg(long, default_value = "0.0")]
    altitude: f64,

    /// Barometric pressure (inHg)
    #[arg(long, default_value = "29.92")]
    pressure: f64,

    /// Temperature (°F)
    #[arg(short = 't', long, default_value = "59.0", allow_hyphen_values = true)]
    temperature: f64,

    /// Relative humidity (0-1)
    #[arg(long, default_value = "0.78")]
    humidity: f64,
}

#[derive(Args, Debug)]
struct BulletArgs {
    /// Bullet mass (grains)
    #[arg(short = 'm', long, default_value = "168.0")]
    mass: f64,

    /// Bullet diameter (inches)
    #[arg(short = 'c', long, default_value = "0.308")]
    caliber: f64,

    /// Bullet length (inches)
    #[arg(short = 'l', long, default_value = "1.215")]
    length: f64,

    /// Rifling twist (inches per turn)
    #[arg(long, default_value = "12.0")]
    twist: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct RangeCard {
    shot: ShotParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    correction: Option<CorrectionParameters>,
    valid_yards: usize,
    termination: Termination,
    rows: Vec<Sample>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Table {
            shot,
            params,
            zero,
            y_intercept,
            weather,
            atmosphere,
            corrected,
            bullet,
            form_factor,
            fixed_stability,
            step,
            range,
            output,
        } => {
            let mut parameters: ShotParameters = match &params {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => shot.to_parameters(),
            };
            if weather {
                parameters.drag_coefficient = atmosphere_correction(
                    parameters.drag_coefficient,
                    atmosphere.altitude,
                    atmosphere.pressure,
                    atmosphere.temperature,
                    atmosphere.humidity,
                );
            }

            parameters.validate()?;

            // A params file carries its own zero angle unless a zero range is given
            let zero_range = zero.or(if params.is_some() { None } else { Some(100.0) });
            if let Some(zero_range) = zero_range {
                parameters = parameters.zeroed_at(zero_range, y_intercept);
            }

            let correction = if corrected {
                let correction = CorrectionParameters {
                    caliber: bullet.caliber,
                    bullet_length: bullet.length,
                    temperature: atmosphere.temperature,
                    pressure: atmosphere.pressure,
                    twist: bullet.twist,
                    velocity: parameters.muzzle_velocity,
                    bullet_mass: bullet.mass,
                    form_factor,
                    stability_update: if fixed_stability {
                        StabilityUpdate::Fixed
                    } else {
                        StabilityUpdate::PerStep
                    },
                };
                correction.validate()?;
                Some(correction)
            } else {
                None
            };

            let solution = match &correction {
                Some(correction) => solve_corrected(&parameters, correction),
                None => solve(&parameters),
            };

            let rows: Vec<Sample> = solution
                .samples()
                .iter()
                .take(range.saturating_add(1))
                .step_by(step.max(1))
                .copied()
                .collect();

            let card = RangeCard {
                shot: parameters,
                correction,
                valid_yards: solution.len(),
                termination: solution.termination(),
                rows,
            };
            display_range_card(&card, output)?;
        }

        Commands::Zero {
            shot,
            zero,
            y_intercept,
        } => {
            let parameters = shot.to_parameters();
            parameters.validate()?;
            let zeroed = parameters.zeroed_at(zero, y_intercept);
            println!("Zero angle: {:.6}° ({:.2} MOA)", zeroed.zero_angle, zeroed.zero_angle * 60.0);
        }

        Commands::Stability {
            bullet,
            velocity,
            atmosphere,
        } => {
            let sg = gyroscopic_stability(
                bullet.mass,
                bullet.twist,
                bullet.caliber,
                bullet.length,
                velocity,
                atmosphere.temperature,
                atmosphere.pressure,
            );
            let jump = vertical_deflection(sg, bullet.length, bullet.caliber);

            println!("╔════════════════════════════════════════╗");
            println!("║         GYROSCOPIC STABILITY           ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Stability (SG):       {:>8.5}         ║", sg);
            println!("║ Jump per mph:         {:>8.5} MOA     ║", jump);
            println!("╚════════════════════════════════════════╝");
            if sg < 1.5 {
                println!("Warning: SG below 1.5, marginal stability");
            }
        }

        Commands::Pbr {
            load,
            vital,
            output,
        } => {
            let pbr = point_blank_range(
                load.drag_model,
                load.bc,
                load.velocity,
                load.sight_height,
                vital,
            )?;

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pbr)?),
                OutputFormat::Csv => {
                    println!("zero_angle,near_zero,far_zero,min_pbr,max_pbr,sight_in_100");
                    println!(
                        "{:.6},{},{},{},{},{:.2}",
                        pbr.zero_angle,
                        pbr.near_zero_yards,
                        pbr.far_zero_yards,
                        pbr.min_pbr_yards,
                        pbr.max_pbr_yards,
                        pbr.sight_in_100_inches
                    );
                }
                OutputFormat::Table => {
                    println!("╔════════════════════════════════════════╗");
                    println!("║         POINT-BLANK RANGE              ║");
                    println!("╠════════════════════════════════════════╣");
                    println!("║ Vital zone:           {:>8.1} in      ║", vital);
                    println!("║ Near zero:            {:>8} yd      ║", pbr.near_zero_yards);
                    println!("║ Far zero:             {:>8} yd      ║", pbr.far_zero_yards);
                    println!("║ Minimum PBR:          {:>8} yd      ║", pbr.min_pbr_yards);
                    println!("║ Maximum PBR:          {:>8} yd      ║", pbr.max_pbr_yards);
                    println!("║ Sight in at 100 yd:   {:>8.2} in      ║", pbr.sight_in_100_inches);
                    println!("╚════════════════════════════════════════╝");
                }
            }
        }
    }

    Ok(())
}

fn display_range_card(card: &RangeCard, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let corrected = card.correction.is_some();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(card)?);
        }

        OutputFormat::Csv => {
            println!("range,path,moa,time,windage,windage_moa,spin_drift,total_windage,velocity");
            for s in &card.rows {
                println!(
                    "{:.0},{:.2},{:.2},{:.3},{:.2},{:.2},{:.2},{:.2},{:.1}",
                    s.range_yards,
                    s.path_inches,
                    s.moa_correction,
                    s.seconds,
                    s.windage_inches,
                    s.windage_moa,
                    s.spindrift_inches,
                    s.corrected_windage_inches,
                    s.velocity_fps
                );
            }
        }

        OutputFormat::Table => {
            let shot = &card.shot;
            println!("╔════════════════════════════════════════╗");
            println!("║              RANGE CARD                ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Drag model:           {:>8}         ║", shot.drag_model.to_string());
            println!("║ BC:                   {:>8.3}         ║", shot.drag_coefficient);
            println!("║ Muzzle velocity:      {:>8.0} ft/s    ║", shot.muzzle_velocity);
            println!("║ Zero angle:           {:>8.4}°        ║", shot.zero_angle);
            println!("║ Valid to:             {:>8} yd      ║", card.valid_yards);
            println!("╚════════════════════════════════════════╝");

            if corrected {
                println!("┌────────┬──────────┬────────┬─────────┬──────────┬──────────┬──────────┬──────────┐");
                println!("│ Yards  │ Path(in) │  MOA   │ Time(s) │ Wind(in) │ Spin(in) │ Total(in)│ Vel(fps) │");
                println!("├────────┼──────────┼────────┼─────────┼──────────┼──────────┼──────────┼──────────┤");
                for s in &card.rows {
                    println!(
                        "│ {:>6.0} │ {:>8.2} │ {:>6.2} │ {:>7.3} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.1} │",
                        s.range_yards,
                        s.path_inches,
                        s.moa_correction,
                        s.seconds,
                        s.windage_inches,
                        s.spindrift_inches,
                        s.corrected_windage_inches,
                        s.velocity_fps
                    );
                }
                println!("└────────┴──────────┴────────┴─────────┴──────────┴──────────┴──────────┴──────────┘");
            } else {
                println!("┌────────┬──────────┬────────┬─────────┬──────────┬──────────┬──────────┐");
                println!("│ Yards  │ Path(in) │  MOA   │ Time(s) │ Wind(in) │ Wind MOA │ Vel(fps) │");
                println!("├────────┼──────────┼────────┼─────────┼──────────┼──────────┼──────────┤");
                for s in &card.rows {
                    println!(
                        "│ {:>6.0} │ {:>8.2} │ {:>6.2} │ {:>7.3} │ {:>8.2} │ {:>8.2} │ {:>8.1} │",
                        s.range_yards,
                        s.path_inches,
                        s.moa_correction,
                        s.seconds,
                        s.windage_inches,
                        s.windage_moa,
                        s.velocity_fps
                    );
                }
                println!("└────────┴──────────┴────────┴─────────┴──────────┴──────────┴──────────┘");
            }

            if card.termination == Termination::CapacityReached {
                println!("Note: trajectory truncated at {} yards", card.valid_yards);
            }
        }
    }

    Ok(())
}
