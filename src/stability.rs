use crate::constants::{
    MILLER_REFERENCE_VELOCITY_FPS, RANKINE_OFFSET, STANDARD_PRESSURE_INHG, STANDARD_TEMPERATURE_F,
};

/// Miller rule constant
const MILLER_CONST: f64 = 30.0;

/// Calculate the gyroscopic stability factor (SG) with the Miller twist rule.
///
/// ```text
///            30 m
/// SG = ------------------ * (v / 2800)^(1/3) * (T + 460) 29.92 / ((59 + 460) P)
///      t² d³ l (1 + l²)
/// ```
///
/// An SG above 1.5 is generally considered adequately stable. Velocity and
/// pressure must be positive; this is not checked.
///
/// # Arguments
/// * `bullet_mass` - Bullet mass in grains
/// * `twist` - Rifling twist, inches per turn
/// * `caliber` - Bullet diameter in inches
/// * `bullet_length` - Bullet length in inches
/// * `velocity` - Velocity in ft/s
/// * `temperature` - Temperature in °F
/// * `pressure` - Barometric pressure in inHg
pub fn gyroscopic_stability(
    bullet_mass: f64,
    twist: f64,
    caliber: f64,
    bullet_length: f64,
    velocity: f64,
    temperature: f64,
    pressure: f64,
) -> f64 {
    let twist_calibers = twist / caliber;
    let length_calibers = bullet_length / caliber;

    let uncorrected = (MILLER_CONST * bullet_mass)
        / (twist_calibers.powi(2)
            * caliber.powi(3)
            * (length_calibers * (1.0 + length_calibers.powi(2))));

    let velocity_correction = (velocity / MILLER_REFERENCE_VELOCITY_FPS).cbrt();
    let density_correction = ((temperature + RANKINE_OFFSET) * STANDARD_PRESSURE_INHG)
        / ((STANDARD_TEMPERATURE_F + RANKINE_OFFSET) * pressure);

    uncorrected * velocity_correction * density_correction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_example() {
        // 155 gr .308, 1.2" long, 1:13 twist, 3000 fps, 85°F, 28.5 inHg
        let sg = gyroscopic_stability(155.0, 13.0, 0.308, 1.2, 3000.0, 85.0, 28.5);
        assert!((sg - 1.59864).abs() < 5e-6, "SG: {sg}");
    }

    #[test]
    fn test_standard_conditions_example() {
        // 180 gr .284, 1.517" long, 1:8 twist at the reference velocity and atmosphere
        let sg = gyroscopic_stability(180.0, 8.0, 0.284, 1.517, 2800.0, 59.0, 29.92);
        assert!((sg - 1.88336).abs() < 5e-6, "SG: {sg}");
    }

    #[test]
    fn test_corrections_are_unity_at_reference() {
        let uncorrected = (30.0 * 168.0)
            / ((12.0_f64 / 0.308).powi(2) * 0.308_f64.powi(3) * {
                let l = 1.215 / 0.308;
                l * (1.0 + l * l)
            });
        let sg = gyroscopic_stability(168.0, 12.0, 0.308, 1.215, 2800.0, 59.0, 29.92);
        assert!((sg - uncorrected).abs() < 1e-12);
    }

    #[test]
    fn test_faster_twist_is_more_stable() {
        let slow = gyroscopic_stability(168.0, 14.0, 0.308, 1.215, 2650.0, 59.0, 29.92);
        let fast = gyroscopic_stability(168.0, 10.0, 0.308, 1.215, 2650.0, 59.0, 29.92);
        assert!(fast > slow);
    }

    #[test]
    fn test_atmospheric_effects() {
        let standard = gyroscopic_stability(168.0, 12.0, 0.308, 1.215, 2650.0, 59.0, 29.92);

        // Hot air is thinner: more stable
        let hot = gyroscopic_stability(168.0, 12.0, 0.308, 1.215, 2650.0, 95.0, 29.92);
        assert!(hot > standard);

        // Low pressure at altitude: more stable
        let high = gyroscopic_stability(168.0, 12.0, 0.308, 1.215, 2650.0, 59.0, 24.0);
        assert!(high > standard);
    }

    #[test]
    fn test_velocity_scaling() {
        // SG scales with the cube root of velocity
        let at_2800 = gyroscopic_stability(168.0, 12.0, 0.308, 1.215, 2800.0, 59.0, 29.92);
        let at_350 = gyroscopic_stability(168.0, 12.0, 0.308, 1.215, 350.0, 59.0, 29.92);
        assert!((at_350 / at_2800 - 0.5).abs() < 1e-12);
    }
}
