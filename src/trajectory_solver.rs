use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::aerodynamic_jump::vertical_deflection;
use crate::angle_calculations::{deg_to_rad, moa_to_rad, subtended_moa, zero_angle};
use crate::constants::{FEET_PER_YARD, GRAVITY_FPS2, INCHES_PER_FOOT, MAX_YARDS};
use crate::drag::retardation_with_form_factor;
use crate::error::{require_finite, require_positive, BallisticsError};
use crate::solution::{Sample, Solution, Termination};
use crate::spin_drift::spin_drift;
use crate::stability::gyroscopic_stability;
use crate::wind::{windage, WindComponents};
use crate::DragModel;

/// Inputs common to every trajectory solve.
///
/// Units follow the range card: ft/s, inches of sight height, degrees, mph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotParameters {
    pub drag_model: DragModel,
    pub drag_coefficient: f64,
    /// Muzzle velocity in ft/s
    pub muzzle_velocity: f64,
    /// Height of the sight above the bore, inches
    pub sight_height: f64,
    /// Uphill (positive) or downhill (negative) shooting angle, degrees
    pub shooting_angle: f64,
    /// Bore angle relative to the sight line, degrees (see [`zero_angle`])
    pub zero_angle: f64,
    /// Wind speed in mph
    pub wind_speed: f64,
    /// Wind direction, degrees (0 headwind, 90 right to left)
    pub wind_angle: f64,
    /// Capacity of the returned table, in yards
    pub max_yards: usize,
}

impl Default for ShotParameters {
    fn default() -> Self {
        ShotParameters {
            drag_model: DragModel::G7,
            drag_coefficient: 0.224,
            muzzle_velocity: 2650.0,
            sight_height: 1.5,
            shooting_angle: 0.0,
            zero_angle: 0.0,
            wind_speed: 10.0,
            wind_angle: 90.0,
            max_yards: MAX_YARDS,
        }
    }
}

impl ShotParameters {
    /// Replace the zero angle with the one that puts the projectile
    /// `y_intercept` inches above the sight line at `zero_range` yards.
    pub fn zeroed_at(mut self, zero_range: f64, y_intercept: f64) -> Self {
        self.zero_angle = zero_angle(
            self.drag_model,
            self.drag_coefficient,
            self.muzzle_velocity,
            self.sight_height,
            zero_range,
            y_intercept,
        );
        self
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        require_positive("drag_coefficient", self.drag_coefficient)?;
        require_positive("muzzle_velocity", self.muzzle_velocity)?;
        require_finite("sight_height", self.sight_height)?;
        require_finite("shooting_angle", self.shooting_angle)?;
        require_finite("zero_angle", self.zero_angle)?;
        require_finite("wind_speed", self.wind_speed)?;
        require_finite("wind_angle", self.wind_angle)?;

        if self.shooting_angle.abs() >= 90.0 {
            return Err(BallisticsError::invalid(
                "shooting_angle",
                format!("must be within (-90, 90) degrees, got {}", self.shooting_angle),
            ));
        }
        if self.max_yards == 0 || self.max_yards > MAX_YARDS {
            return Err(BallisticsError::invalid(
                "max_yards",
                format!("must be within 1..={MAX_YARDS}, got {}", self.max_yards),
            ));
        }
        Ok(())
    }
}

/// Which velocity the stability factor is evaluated at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityUpdate {
    /// Re-evaluate at the projectile's current speed for every sample
    #[default]
    PerStep,
    /// Evaluate once at [`CorrectionParameters::velocity`]
    Fixed,
}

/// Projectile and atmosphere description for the stability-corrected solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionParameters {
    /// Bullet diameter, inches
    pub caliber: f64,
    /// Bullet length, inches
    pub bullet_length: f64,
    /// Air temperature, °F
    pub temperature: f64,
    /// Barometric pressure, inHg
    pub pressure: f64,
    /// Rifling twist, inches per turn
    pub twist: f64,
    /// Reference velocity for the stability factor, ft/s
    pub velocity: f64,
    /// Bullet mass, grains
    pub bullet_mass: f64,
    /// Drag multiplier (1.0 = the reference projectile)
    pub form_factor: f64,
    pub stability_update: StabilityUpdate,
}

impl Default for CorrectionParameters {
    fn default() -> Self {
        CorrectionParameters {
            caliber: 0.308,
            bullet_length: 1.215,
            temperature: 59.0,
            pressure: 29.92,
            twist: 12.0,
            velocity: 2650.0,
            bullet_mass: 168.0,
            form_factor: 1.0,
            stability_update: StabilityUpdate::PerStep,
        }
    }
}

impl CorrectionParameters {
    pub fn validate(&self) -> Result<(), BallisticsError> {
        require_positive("caliber", self.caliber)?;
        require_positive("bullet_length", self.bullet_length)?;
        require_finite("temperature", self.temperature)?;
        require_positive("pressure", self.pressure)?;
        require_positive("twist", self.twist)?;
        require_positive("velocity", self.velocity)?;
        require_positive("bullet_mass", self.bullet_mass)?;
        require_positive("form_factor", self.form_factor)?;
        Ok(())
    }

    /// Stability factor at `speed` ft/s, or at the reference velocity in `Fixed` mode
    pub fn stability_at(&self, speed: f64) -> f64 {
        let velocity = match self.stability_update {
            StabilityUpdate::PerStep => speed,
            StabilityUpdate::Fixed => self.velocity,
        };
        gyroscopic_stability(
            self.bullet_mass,
            self.twist,
            self.caliber,
            self.bullet_length,
            velocity,
            self.temperature,
            self.pressure,
        )
    }
}

/// Per-sample adjustments layered on top of the point-mass integration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleOffsets {
    /// Vertical deflection added to the elevation correction, MOA
    pub vertical_moa: f64,
    /// Spin-drift offset, inches
    pub spin_drift_inches: f64,
}

/// Hook that distinguishes the plain solve from the corrected one.
///
/// The integrator calls `form_factor` for every drag evaluation and
/// `sample_offsets` once per recorded yard.
pub trait TrajectoryCorrection {
    fn form_factor(&self) -> f64 {
        1.0
    }

    /// Offsets for a sample recorded at `speed` ft/s under `crosswind` mph
    /// after `time_of_flight` seconds.
    fn sample_offsets(&self, speed: f64, crosswind: f64, time_of_flight: f64) -> SampleOffsets;
}

/// Plain point-mass trajectory
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCorrection;

impl TrajectoryCorrection for NoCorrection {
    fn sample_offsets(&self, _speed: f64, _crosswind: f64, _time_of_flight: f64) -> SampleOffsets {
        SampleOffsets::default()
    }
}

/// Aerodynamic jump and spin drift driven by the gyroscopic stability factor
#[derive(Debug, Clone, Copy)]
pub struct StabilityCorrection {
    pub parameters: CorrectionParameters,
}

impl TrajectoryCorrection for StabilityCorrection {
    fn form_factor(&self) -> f64 {
        self.parameters.form_factor
    }

    fn sample_offsets(&self, speed: f64, crosswind: f64, time_of_flight: f64) -> SampleOffsets {
        let p = &self.parameters;
        let stability = p.stability_at(speed);
        SampleOffsets {
            vertical_moa: vertical_deflection(stability, p.bullet_length, p.caliber) * crosswind,
            spin_drift_inches: spin_drift(stability, time_of_flight),
        }
    }
}

/// Solve a point-mass trajectory and tabulate it per yard.
///
/// Inputs are not validated; see [`ShotParameters::validate`].
pub fn solve(shot: &ShotParameters) -> Solution {
    integrate(shot, &NoCorrection)
}

/// Solve with aerodynamic jump, spin drift and form factor applied.
pub fn solve_corrected(shot: &ShotParameters, correction: &CorrectionParameters) -> Solution {
    integrate(
        shot,
        &StabilityCorrection {
            parameters: *correction,
        },
    )
}

/// Integrate the trajectory in the bore frame with a trapezoidal position
/// update and an adaptive time step of half a foot of travel.
///
/// The sample for yard `n` is taken on the first step whose starting
/// position has reached `3n` feet, so its range lies within one step of `n`.
pub fn integrate<C: TrajectoryCorrection>(shot: &ShotParameters, correction: &C) -> Solution {
    let wind = WindComponents::new(shot.wind_speed, shot.wind_angle);
    let form_factor = correction.form_factor();

    let bore = deg_to_rad(shot.shooting_angle + shot.zero_angle);
    let gravity = Vector2::new(GRAVITY_FPS2 * bore.sin(), GRAVITY_FPS2 * bore.cos());

    let launch = deg_to_rad(shot.zero_angle);
    let mut velocity = Vector2::new(
        shot.muzzle_velocity * launch.cos(),
        shot.muzzle_velocity * launch.sin(),
    );
    let mut position = Vector2::new(0.0, -shot.sight_height / INCHES_PER_FOOT);

    let mut solution = Solution::with_capacity(shot.max_yards);
    let mut t = 0.0_f64;

    let termination = loop {
        let previous = velocity;
        let speed = velocity.norm();
        if !(speed.is_finite() && speed > 0.0) {
            break Termination::Degenerate;
        }
        let dt = 0.5 / speed;

        // Headwind is added in its own unit (mph) to the lookup speed
        let dv = retardation_with_form_factor(
            shot.drag_model,
            shot.drag_coefficient,
            speed + wind.headwind,
            form_factor,
        );
        let drag = -(velocity / speed) * dv;
        velocity += drag * dt + gravity * dt;

        let yard = solution.len();
        if position.x / FEET_PER_YARD >= yard as f64 && !solution.is_full() {
            let time_of_flight = t + dt;
            let offsets = correction.sample_offsets(speed, wind.crosswind, time_of_flight);
            solution.push(record(
                position,
                velocity,
                speed,
                time_of_flight,
                shot.muzzle_velocity,
                wind.crosswind,
                offsets,
            ));
        }

        position += (velocity + previous) * dt / 2.0;
        t += dt;

        if velocity.y.abs() > (3.0 * velocity.x).abs() {
            break Termination::SteepDescent;
        }
        // A huge step near the apex can carry vx past the 3:1 window
        if velocity.x <= 0.0 {
            break Termination::Stalled;
        }
        if solution.is_full() {
            break Termination::CapacityReached;
        }
    };

    solution.finish(termination);
    tracing::debug!(
        drag_model = %shot.drag_model,
        samples = solution.len(),
        termination = ?termination,
        "trajectory solved"
    );
    solution
}

fn record(
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    speed: f64,
    time_of_flight: f64,
    muzzle_velocity: f64,
    crosswind: f64,
    offsets: SampleOffsets,
) -> Sample {
    let (x, y) = (position.x, position.y);

    let windage_inches = windage(crosswind, muzzle_velocity, x, time_of_flight);
    let corrected_windage_inches = windage_inches + offsets.spin_drift_inches;

    Sample {
        range_yards: x / FEET_PER_YARD,
        // Deflection tangent is applied to the range in feet
        path_inches: y * INCHES_PER_FOOT + moa_to_rad(offsets.vertical_moa).tan() * x,
        moa_correction: -subtended_moa(y, x) + offsets.vertical_moa,
        seconds: time_of_flight,
        windage_inches,
        windage_moa: subtended_moa(windage_inches / INCHES_PER_FOOT, x),
        spindrift_inches: offsets.spin_drift_inches,
        corrected_windage_inches,
        corrected_windage_moa: subtended_moa(corrected_windage_inches / INCHES_PER_FOOT, x),
        velocity_fps: speed,
        velocity_x_fps: velocity.x,
        velocity_y_fps: velocity.y,
    }
}
