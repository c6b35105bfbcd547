//! Ballistic coefficient correction for non-standard atmospheres.
//!
//! Published ballistic coefficients assume the standard atmosphere. These
//! factors rescale a coefficient for altitude, temperature, barometric
//! pressure and humidity so the corrected value can be fed straight into the
//! trajectory solver.

/// Standard barometric pressure (inHg) the pressure factor is taken against
const STANDARD_PRESSURE_INHG: f64 = 29.53;

/// Altitude factor (altitude in feet)
fn altitude_factor(altitude: f64) -> f64 {
    let fa = -4e-15 * altitude.powi(3) + 4e-10 * altitude.powi(2) - 3e-5 * altitude + 1.0;
    1.0 / fa
}

/// Temperature factor relative to the standard temperature at `altitude` feet
fn temperature_factor(temperature: f64, altitude: f64) -> f64 {
    let standard = -0.0036 * altitude + 59.0;
    (temperature - standard) / (459.6 + standard)
}

/// Pressure factor (pressure in inHg)
fn pressure_factor(pressure: f64) -> f64 {
    (pressure - STANDARD_PRESSURE_INHG) / STANDARD_PRESSURE_INHG
}

/// Humidity factor; `relative_humidity` is a fraction in `[0, 1]`
fn humidity_factor(temperature: f64, pressure: f64, relative_humidity: f64) -> f64 {
    let vapor_pressure = 4e-6 * temperature.powi(3) - 0.0004 * temperature.powi(2)
        + 0.0234 * temperature
        - 0.2517;
    0.995 * (pressure / (pressure - 0.3783 * relative_humidity * vapor_pressure))
}

/// Ballistic coefficient corrected for the given atmosphere.
///
/// # Arguments
/// * `drag_coefficient` - Ballistic coefficient at standard conditions
/// * `altitude` - Altitude in feet
/// * `pressure` - Barometric pressure in inHg
/// * `temperature` - Temperature in °F
/// * `relative_humidity` - Relative humidity as a fraction (0.78 for 78%)
pub fn atmosphere_correction(
    drag_coefficient: f64,
    altitude: f64,
    pressure: f64,
    temperature: f64,
    relative_humidity: f64,
) -> f64 {
    let fa = altitude_factor(altitude);
    let ft = temperature_factor(temperature, altitude);
    let fr = humidity_factor(temperature, pressure, relative_humidity);
    let fp = pressure_factor(pressure);

    drag_coefficient * fa * (1.0 + ft - fp) * fr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example_correction() {
        // Sea level, 29.92 inHg, 59°F, 78% humidity
        let bc = atmosphere_correction(0.224, 0.0, 29.92, 59.0, 0.78);
        assert!((bc - 0.221153).abs() < 1e-5, "corrected bc: {bc}");
    }

    #[test]
    fn test_standard_dry_air() {
        // At the reference pressure and temperature only the 0.995 humidity base remains
        let bc = atmosphere_correction(0.5, 0.0, 29.53, 59.0, 0.0);
        assert!((bc - 0.4975).abs() < 1e-12);
    }

    #[test]
    fn test_thin_air_raises_bc() {
        let sea_level = atmosphere_correction(0.5, 0.0, 29.92, 59.0, 0.5);
        let mountain = atmosphere_correction(0.5, 5000.0, 25.0, 40.0, 0.5);
        assert!(mountain > sea_level);
        assert!((mountain - 0.667980).abs() < 1e-5, "corrected bc: {mountain}");
    }

    #[test]
    fn test_heat_raises_bc() {
        let cold = atmosphere_correction(0.4, 0.0, 29.92, 20.0, 0.5);
        let hot = atmosphere_correction(0.4, 0.0, 29.92, 100.0, 0.5);
        assert!(hot > cold);
    }

    #[test]
    fn test_factors() {
        assert_eq!(altitude_factor(0.0), 1.0);
        assert!(altitude_factor(10_000.0) > 1.0);
        assert_eq!(temperature_factor(59.0, 0.0), 0.0);
        assert_eq!(pressure_factor(29.53), 0.0);
        assert!(pressure_factor(25.0) < 0.0);
        // Dry air has no vapor correction
        assert_eq!(humidity_factor(59.0, 29.92, 0.0), 0.995);
    }
}
