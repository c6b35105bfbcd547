//! C ABI for range-card applications.
//!
//! A solve returns an opaque handle to the finished table together with its
//! yard count. The caller owns the handle and must release it with
//! `ballistics_free`. Getters are total: a null handle or an index outside
//! the table yields 0.

#![allow(clippy::too_many_arguments)]

use crate::aerodynamic_jump::vertical_deflection;
use crate::angle_calculations::zero_angle;
use crate::atmosphere::atmosphere_correction;
use crate::solution::{Sample, Solution};
use crate::spin_drift::spin_drift;
use crate::stability::gyroscopic_stability;
use crate::trajectory_solver::{
    solve, solve_corrected, CorrectionParameters, ShotParameters, StabilityUpdate,
};
use crate::DragModel;
use std::os::raw::{c_double, c_int};
use std::ptr;

/// Handle and valid yard count returned by the solve functions
#[repr(C)]
pub struct FFISolveResult {
    pub handle: *mut Solution,
    pub count: c_int,
}

impl FFISolveResult {
    fn empty() -> Self {
        FFISolveResult {
            handle: ptr::null_mut(),
            count: 0,
        }
    }

    fn from_solution(solution: Solution) -> Self {
        let count = solution.len() as c_int;
        FFISolveResult {
            handle: Box::into_raw(Box::new(solution)),
            count,
        }
    }
}

// Drag codes: 1=G1, 2=G2, 5=G5, 6=G6, 7=G7, 8=G8
fn shot_parameters(
    drag_function: c_int,
    drag_coefficient: c_double,
    muzzle_velocity: c_double,
    sight_height: c_double,
    shooting_angle: c_double,
    zero_angle: c_double,
    wind_speed: c_double,
    wind_angle: c_double,
) -> Option<ShotParameters> {
    let drag_model = DragModel::from_code(drag_function)?;
    Some(ShotParameters {
        drag_model,
        drag_coefficient,
        muzzle_velocity,
        sight_height,
        shooting_angle,
        zero_angle,
        wind_speed,
        wind_angle,
        ..ShotParameters::default()
    })
}

/// Solve a point-mass trajectory. Unknown drag codes return a null handle.
#[no_mangle]
pub extern "C" fn ballistics_solve(
    drag_function: c_int,
    drag_coefficient: c_double,
    muzzle_velocity: c_double,
    sight_height: c_double,
    shooting_angle: c_double,
    zero_angle: c_double,
    wind_speed: c_double,
    wind_angle: c_double,
) -> FFISolveResult {
    match shot_parameters(
        drag_function,
        drag_coefficient,
        muzzle_velocity,
        sight_height,
        shooting_angle,
        zero_angle,
        wind_speed,
        wind_angle,
    ) {
        Some(shot) => FFISolveResult::from_solution(solve(&shot)),
        None => FFISolveResult::empty(),
    }
}

/// Solve with aerodynamic jump, spin drift and form factor.
///
/// The stability factor follows the projectile's current speed; `velocity`
/// is kept for parity with the point-mass signature.
#[no_mangle]
pub extern "C" fn ballistics_solve_corrected(
    drag_function: c_int,
    drag_coefficient: c_double,
    muzzle_velocity: c_double,
    sight_height: c_double,
    shooting_angle: c_double,
    zero_angle: c_double,
    wind_speed: c_double,
    wind_angle: c_double,
    caliber: c_double,
    bullet_length: c_double,
    temperature: c_double,
    pressure: c_double,
    twist: c_double,
    velocity: c_double,
    bullet_mass: c_double,
    form_factor: c_double,
) -> FFISolveResult {
    let Some(shot) = shot_parameters(
        drag_function,
        drag_coefficient,
        muzzle_velocity,
        sight_height,
        shooting_angle,
        zero_angle,
        wind_speed,
        wind_angle,
    ) else {
        return FFISolveResult::empty();
    };

    let correction = CorrectionParameters {
        caliber,
        bullet_length,
        temperature,
        pressure,
        twist,
        velocity,
        bullet_mass,
        form_factor,
        stability_update: StabilityUpdate::PerStep,
    };
    FFISolveResult::from_solution(solve_corrected(&shot, &correction))
}

/// Release a table returned by a solve function. Null is ignored.
#[no_mangle]
pub extern "C" fn ballistics_free(handle: *mut Solution) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle));
        }
    }
}

fn read(handle: *const Solution, yard: c_int, field: fn(&Sample) -> f64) -> c_double {
    if handle.is_null() || yard < 0 {
        return 0.0;
    }
    let solution = unsafe { &*handle };
    solution
        .samples()
        .get(yard as usize)
        .map(field)
        .unwrap_or(0.0)
}

#[no_mangle]
pub extern "C" fn ballistics_get_range(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.range_yards)
}

#[no_mangle]
pub extern "C" fn ballistics_get_path(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.path_inches)
}

#[no_mangle]
pub extern "C" fn ballistics_get_moa(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.moa_correction)
}

#[no_mangle]
pub extern "C" fn ballistics_get_time(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.seconds)
}

#[no_mangle]
pub extern "C" fn ballistics_get_windage(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.windage_inches)
}

#[no_mangle]
pub extern "C" fn ballistics_get_windage_moa(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.windage_moa)
}

#[no_mangle]
pub extern "C" fn ballistics_get_spindrift(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.spindrift_inches)
}

#[no_mangle]
pub extern "C" fn ballistics_get_corrected_windage(
    handle: *const Solution,
    yard: c_int,
) -> c_double {
    read(handle, yard, |s| s.corrected_windage_inches)
}

#[no_mangle]
pub extern "C" fn ballistics_get_corrected_windage_moa(
    handle: *const Solution,
    yard: c_int,
) -> c_double {
    read(handle, yard, |s| s.corrected_windage_moa)
}

#[no_mangle]
pub extern "C" fn ballistics_get_velocity(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.velocity_fps)
}

#[no_mangle]
pub extern "C" fn ballistics_get_vx(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.velocity_x_fps)
}

#[no_mangle]
pub extern "C" fn ballistics_get_vy(handle: *const Solution, yard: c_int) -> c_double {
    read(handle, yard, |s| s.velocity_y_fps)
}

/// Zero angle in degrees; NaN for an unknown drag code.
#[no_mangle]
pub extern "C" fn ballistics_zero_angle(
    drag_function: c_int,
    drag_coefficient: c_double,
    muzzle_velocity: c_double,
    sight_height: c_double,
    zero_range: c_double,
    y_intercept: c_double,
) -> c_double {
    match DragModel::from_code(drag_function) {
        Some(model) => zero_angle(
            model,
            drag_coefficient,
            muzzle_velocity,
            sight_height,
            zero_range,
            y_intercept,
        ),
        None => f64::NAN,
    }
}

#[no_mangle]
pub extern "C" fn ballistics_atmosphere_correction(
    drag_coefficient: c_double,
    altitude: c_double,
    pressure: c_double,
    temperature: c_double,
    relative_humidity: c_double,
) -> c_double {
    atmosphere_correction(drag_coefficient, altitude, pressure, temperature, relative_humidity)
}

#[no_mangle]
pub extern "C" fn ballistics_gyroscopic_stability(
    bullet_mass: c_double,
    twist: c_double,
    caliber: c_double,
    bullet_length: c_double,
    velocity: c_double,
    temperature: c_double,
    pressure: c_double,
) -> c_double {
    gyroscopic_stability(bullet_mass, twist, caliber, bullet_length, velocity, temperature, pressure)
}

#[no_mangle]
pub extern "C" fn ballistics_vertical_deflection(
    stability: c_double,
    bullet_length: c_double,
    caliber: c_double,
) -> c_double {
    vertical_deflection(stability, bullet_length, caliber)
}

#[no_mangle]
pub extern "C" fn ballistics_spin_drift(stability: c_double, time_of_flight: c_double) -> c_double {
    spin_drift(stability, time_of_flight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_drag_code() {
        let result = ballistics_solve(3, 0.5, 2800.0, 1.5, 0.0, 0.1, 0.0, 0.0);
        assert!(result.handle.is_null());
        assert_eq!(result.count, 0);
        assert!(ballistics_zero_angle(4, 0.5, 2800.0, 1.5, 100.0, 0.0).is_nan());
    }

    #[test]
    fn test_null_handle_reads_zero() {
        assert_eq!(ballistics_get_range(ptr::null(), 10), 0.0);
        assert_eq!(ballistics_get_vy(ptr::null(), 0), 0.0);
        ballistics_free(ptr::null_mut());
    }

    #[test]
    fn test_handle_round_trip() {
        let result = ballistics_solve(1, 0.224, 2650.0, 1.5, 0.0, 0.0678, 10.0, 90.0);
        assert!(!result.handle.is_null());
        assert!(result.count > 100);

        assert_eq!(ballistics_get_path(result.handle, 0), -1.5);
        assert!((ballistics_get_range(result.handle, 100) - 100.0).abs() < 0.2);
        assert_eq!(ballistics_get_range(result.handle, -1), 0.0);
        assert_eq!(ballistics_get_range(result.handle, result.count), 0.0);

        ballistics_free(result.handle);
    }
}
