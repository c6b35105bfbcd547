//! Angle unit conversions and the zero-angle solver.

use crate::constants::{FEET_PER_YARD, GRAVITY_FPS2, INCHES_PER_FOOT, MOA_PER_DEGREE};
use crate::drag::retardation;
use crate::DragModel;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

pub fn deg_to_moa(deg: f64) -> f64 {
    deg * MOA_PER_DEGREE
}

pub fn moa_to_deg(moa: f64) -> f64 {
    moa / MOA_PER_DEGREE
}

pub fn moa_to_rad(moa: f64) -> f64 {
    deg_to_rad(moa_to_deg(moa))
}

pub fn rad_to_moa(rad: f64) -> f64 {
    deg_to_moa(rad_to_deg(rad))
}

/// Angle subtended by `offset_ft` at `distance_ft`, in MOA.
///
/// Zero at the muzzle, where the angle is undefined.
pub(crate) fn subtended_moa(offset_ft: f64, distance_ft: f64) -> f64 {
    if distance_ft == 0.0 {
        0.0
    } else {
        rad_to_moa((offset_ft / distance_ft).atan())
    }
}

/// Initial bore step of the successive approximation, in degrees
const INITIAL_STEP_DEG: f64 = 14.0;

/// Stop refining once the step is below this many MOA
const CONVERGENCE_MOA: f64 = 0.01;

/// Highest bore angle worth trying, in degrees
const MAX_BORE_ANGLE_DEG: f64 = 45.0;

/// Angle of the bore relative to the sight line, in degrees, that puts the
/// projectile `y_intercept` inches above the line of sight at `zero_range`
/// yards (0 for a conventional zero).
///
/// The bore is stepped up from 0° in 14° increments until the projectile
/// passes above the target height, then the step is halved and reversed each
/// time the target is crossed, until the step falls under 0.01 MOA. Gives up
/// past 45°, when the range is unreachable. Level fire, no wind.
pub fn zero_angle(
    drag_model: DragModel,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    zero_range: f64,
    y_intercept: f64,
) -> f64 {
    let target_ft = y_intercept / INCHES_PER_FOOT;
    let zero_range_ft = zero_range * FEET_PER_YARD;

    let mut step = deg_to_rad(INITIAL_STEP_DEG);
    let mut angle = 0.0_f64;
    let mut iterations = 0_u32;

    loop {
        let mut vx = muzzle_velocity * angle.cos();
        let mut vy = muzzle_velocity * angle.sin();
        let gx = GRAVITY_FPS2 * angle.sin();
        let gy = GRAVITY_FPS2 * angle.cos();

        let mut x = 0.0_f64;
        let mut y = -sight_height / INCHES_PER_FOOT;

        while x <= zero_range_ft {
            let (vx_prev, vy_prev) = (vx, vy);
            let v = (vx * vx + vy * vy).sqrt();
            let dt = 1.0 / v;

            let dv = retardation(drag_model, drag_coefficient, v);
            vx += -dv * vx / v * dt + dt * gx;
            vy += -dv * vy / v * dt + dt * gy;

            x += dt * (vx + vx_prev) / 2.0;
            y += dt * (vy + vy_prev) / 2.0;

            // Falling below the target, or climbing too steeply to matter
            if (vy < 0.0 && y < target_ft) || vy > 3.0 * vx {
                break;
            }
        }

        if y > target_ft && step > 0.0 {
            step = -step / 2.0;
        }
        if y < target_ft && step < 0.0 {
            step = -step / 2.0;
        }

        let converged = step.abs() < moa_to_rad(CONVERGENCE_MOA);
        let unreachable = angle > deg_to_rad(MAX_BORE_ANGLE_DEG);

        tracing::trace!(
            iteration = iterations,
            angle_deg = rad_to_deg(angle),
            height_ft = y,
            "zero angle iteration"
        );
        iterations += 1;

        angle += step;
        if converged || unreachable || !y.is_finite() {
            break;
        }
    }

    tracing::debug!(
        drag_model = %drag_model,
        zero_range,
        angle_deg = rad_to_deg(angle),
        iterations,
        "zero angle solved"
    );

    rad_to_deg(angle)
}
