//! # Ballistics Solver
//!
//! Exterior-ballistics trajectory tables for small-arms projectiles: a
//! point-mass integrator over the standard G-family drag curves that reports
//! path, time of flight, windage, spin drift and velocity at every whole yard.

// Re-export the main types and functions
pub use aerodynamic_jump::vertical_deflection;
pub use angle_calculations::{
    deg_to_moa, deg_to_rad, moa_to_deg, moa_to_rad, rad_to_deg, rad_to_moa, zero_angle,
};
pub use atmosphere::atmosphere_correction;
pub use constants::MAX_YARDS;
pub use drag::{retardation, retardation_with_form_factor};
pub use drag_model::DragModel;
pub use error::BallisticsError;
pub use point_blank_range::{point_blank_range, PointBlankRange};
pub use solution::{Sample, Solution, Termination};
pub use spin_drift::spin_drift;
pub use stability::gyroscopic_stability;
pub use trajectory_solver::{
    integrate, solve, solve_corrected, CorrectionParameters, NoCorrection, SampleOffsets,
    ShotParameters, StabilityCorrection, StabilityUpdate, TrajectoryCorrection,
};
pub use wind::{crosswind, headwind, windage, WindComponents};

// Module declarations
pub mod constants;
pub mod drag;
pub mod ffi;
mod aerodynamic_jump;
mod angle_calculations;
mod atmosphere;
mod drag_model;
mod error;
mod point_blank_range;
mod solution;
mod spin_drift;
mod stability;
mod trajectory_solver;
mod wind;
