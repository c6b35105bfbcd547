//! Point-blank range: the span over which a level shot stays within a vital
//! zone centred on the line of sight, with no holdover.

use serde::Serialize;

use crate::error::{require_finite, require_positive, BallisticsError};
use crate::solution::Solution;
use crate::trajectory_solver::{solve, ShotParameters};
use crate::DragModel;

/// Highest bore angle tried before the vital zone is declared unreachable, degrees
const MAX_BORE_ANGLE_DEG: f64 = 45.0;

/// Bisection stops once the bracket is narrower than this, degrees
const ANGLE_TOLERANCE_DEG: f64 = 1e-9;

const MAX_BISECTIONS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointBlankRange {
    /// Bore angle that raises the apex to half the vital size, degrees
    pub zero_angle: f64,
    /// First yard where the path crosses the line of sight
    pub near_zero_yards: usize,
    /// Last yard at or above the line of sight
    pub far_zero_yards: usize,
    /// First yard inside the vital zone
    pub min_pbr_yards: usize,
    /// Last yard inside the vital zone
    pub max_pbr_yards: usize,
    /// Height above the line of sight at 100 yards to sight in for this range, inches
    pub sight_in_100_inches: f64,
}

/// Find the point-blank range of a level shot in still air.
///
/// # Arguments
/// * `drag_model` - Drag curve family
/// * `drag_coefficient` - Ballistic coefficient
/// * `muzzle_velocity` - Muzzle velocity in ft/s
/// * `sight_height` - Sight height over bore, inches
/// * `vital_size` - Diameter of the vital zone, inches
pub fn point_blank_range(
    drag_model: DragModel,
    drag_coefficient: f64,
    muzzle_velocity: f64,
    sight_height: f64,
    vital_size: f64,
) -> Result<PointBlankRange, BallisticsError> {
    require_positive("drag_coefficient", drag_coefficient)?;
    require_positive("muzzle_velocity", muzzle_velocity)?;
    require_finite("sight_height", sight_height)?;
    require_positive("vital_size", vital_size)?;

    let half = vital_size / 2.0;
    let shot = ShotParameters {
        drag_model,
        drag_coefficient,
        muzzle_velocity,
        sight_height,
        shooting_angle: 0.0,
        zero_angle: 0.0,
        wind_speed: 0.0,
        wind_angle: 0.0,
        ..ShotParameters::default()
    };
    let apex = |angle: f64| -> (f64, Solution) {
        let solution = solve(&ShotParameters {
            zero_angle: angle,
            ..shot
        });
        let highest = solution
            .samples()
            .iter()
            .map(|s| s.path_inches)
            .fold(f64::NEG_INFINITY, f64::max);
        (highest, solution)
    };

    // Bracket the angle whose apex reaches the top of the vital zone
    let mut low = 0.0_f64;
    let mut high = 1.0_f64;
    while apex(high).0 < half {
        low = high;
        high *= 2.0;
        if high > MAX_BORE_ANGLE_DEG {
            return Err(BallisticsError::NoSolution(format!(
                "apex never reaches {half} in above the line of sight"
            )));
        }
    }

    let mut bisections = 0;
    while high - low > ANGLE_TOLERANCE_DEG && bisections < MAX_BISECTIONS {
        let mid = (low + high) / 2.0;
        if apex(mid).0 < half {
            low = mid;
        } else {
            high = mid;
        }
        bisections += 1;
    }

    let zero_angle = (low + high) / 2.0;
    let (_, solution) = apex(zero_angle);
    let path: Vec<f64> = solution.samples().iter().map(|s| s.path_inches).collect();

    let min_pbr_yards = path
        .iter()
        .position(|&p| p >= -half)
        .ok_or_else(|| BallisticsError::NoSolution("path never enters the vital zone".into()))?;
    let near_zero_yards = path
        .iter()
        .position(|&p| p >= 0.0)
        .ok_or_else(|| BallisticsError::NoSolution("path never reaches the line of sight".into()))?;
    let far_zero_yards = last_before(&path, near_zero_yards, |p| p < 0.0)?;
    let max_pbr_yards = last_before(&path, min_pbr_yards, |p| p < -half)?;

    tracing::debug!(
        drag_model = %drag_model,
        zero_angle,
        bisections,
        near_zero_yards,
        far_zero_yards,
        max_pbr_yards,
        "point-blank range solved"
    );

    Ok(PointBlankRange {
        zero_angle,
        near_zero_yards,
        far_zero_yards,
        min_pbr_yards,
        max_pbr_yards,
        sight_in_100_inches: solution.path(100),
    })
}

/// Yard before the first one at or after `start` where `leaves` holds.
fn last_before(
    path: &[f64],
    start: usize,
    leaves: impl Fn(f64) -> bool,
) -> Result<usize, BallisticsError> {
    path.get(start..)
        .and_then(|rest| rest.iter().position(|&p| leaves(p)))
        .filter(|&offset| offset > 0)
        .map(|offset| start + offset - 1)
        .ok_or_else(|| {
            BallisticsError::NoSolution("trajectory ends before leaving the zone".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varmint_load() {
        let pbr = point_blank_range(DragModel::G1, 0.224, 2650.0, 1.5, 6.0).unwrap();
        assert!((pbr.zero_angle - 0.11337).abs() < 1e-4, "{pbr:?}");
        assert!(pbr.near_zero_yards.abs_diff(23) <= 1);
        assert!(pbr.far_zero_yards.abs_diff(205) <= 1);
        assert_eq!(pbr.min_pbr_yards, 0);
        assert!(pbr.max_pbr_yards.abs_diff(239) <= 1);
        assert!((pbr.sight_in_100_inches - 2.875).abs() < 0.02);
    }

    #[test]
    fn test_larger_vital_zone_reaches_further() {
        let small = point_blank_range(DragModel::G7, 0.3, 3000.0, 1.5, 4.0).unwrap();
        let large = point_blank_range(DragModel::G7, 0.3, 3000.0, 1.5, 8.0).unwrap();
        assert!(large.max_pbr_yards > small.max_pbr_yards);
        assert!(large.zero_angle > small.zero_angle);
        assert!((large.sight_in_100_inches - 3.214).abs() < 0.02);
        assert!(large.max_pbr_yards.abs_diff(339) <= 1);
    }

    #[test]
    fn test_zones_are_ordered() {
        let pbr = point_blank_range(DragModel::G1, 0.4, 2800.0, 1.5, 6.0).unwrap();
        assert!(pbr.min_pbr_yards <= pbr.near_zero_yards);
        assert!(pbr.near_zero_yards < pbr.far_zero_yards);
        assert!(pbr.far_zero_yards < pbr.max_pbr_yards);
    }

    #[test]
    fn test_rejects_bad_vital_size() {
        assert!(matches!(
            point_blank_range(DragModel::G1, 0.224, 2650.0, 1.5, 0.0),
            Err(BallisticsError::InvalidParameter { name: "vital_size", .. })
        ));
        assert!(point_blank_range(DragModel::G1, 0.224, -1.0, 1.5, 6.0).is_err());
    }

    #[test]
    fn test_last_before() {
        let path = [-2.0, -1.0, 0.5, 1.0, 0.2, -0.3, -1.0];
        assert_eq!(last_before(&path, 2, |p| p < 0.0), Ok(4));
        assert!(last_before(&path, 2, |p| p < -5.0).is_err());
        assert!(last_before(&path, 5, |p| p < 0.0).is_err());
    }
}
