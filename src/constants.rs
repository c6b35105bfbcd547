//! Physical constants and unit conversions used in trajectory calculations.
//!
//! The integrator works in the imperial units of the classic range card:
//! feet and feet per second internally, yards for range, inches for path and
//! windage, minutes of angle for sight corrections.

/// Gravitational acceleration in ft/s² (negative: points down the y axis)
pub const GRAVITY_FPS2: f64 = -32.194;

/// Hard upper bound on the number of per-yard samples in a solution table
///
/// One sample is stored per whole yard, so this is also the maximum yardage
/// a table can describe. Trajectories that would run longer are truncated.
pub const MAX_YARDS: usize = 50_001;

/// Highest velocity (ft/s) the drag tables are evaluated at; faster inputs saturate
pub const MAX_TABULATED_VELOCITY_FPS: f64 = 10_000.0;

/// Feet per yard
pub const FEET_PER_YARD: f64 = 3.0;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Miles per hour expressed in inches per second
pub const MPH_TO_INCHES_PER_SECOND: f64 = 17.60;

/// Minutes of angle per degree
pub const MOA_PER_DEGREE: f64 = 60.0;

/// Reference velocity (ft/s) of the Miller stability formula
pub const MILLER_REFERENCE_VELOCITY_FPS: f64 = 2800.0;

/// Standard temperature (°F) of the Miller atmospheric correction
pub const STANDARD_TEMPERATURE_F: f64 = 59.0;

/// Standard pressure (inHg) of the Miller atmospheric correction
pub const STANDARD_PRESSURE_INHG: f64 = 29.92;

/// Offset from Fahrenheit to Rankine as used by the Miller correction
pub const RANKINE_OFFSET: f64 = 460.0;
