/// Spin-drift offset in inches (Litz approximation).
///
/// Negated because the table looks down the bore rather than out along the
/// flight path: a right-hand twist drifts right, which is negative here.
///
/// # Arguments
/// * `stability` - Gyroscopic stability factor
/// * `time_of_flight` - Time of flight in seconds
pub fn spin_drift(stability: f64, time_of_flight: f64) -> f64 {
    -(1.25 * (stability + 1.2) * time_of_flight.powf(1.83))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_second_of_flight() {
        // 1.25 * (1.5 + 1.2) * 1^1.83
        assert!((spin_drift(1.5, 1.0) + 3.375).abs() < 1e-12);
    }

    #[test]
    fn test_sign_convention() {
        for tof in [0.1, 0.5, 1.0, 2.5] {
            assert!(spin_drift(2.0, tof) < 0.0);
        }
        assert_eq!(spin_drift(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_growth_with_time() {
        let one = spin_drift(2.0, 1.0);
        let two = spin_drift(2.0, 2.0);
        assert!(two < one);
        // 2^1.83
        assert!((two / one - 2.0_f64.powf(1.83)).abs() < 1e-12);
    }

    #[test]
    fn test_more_stable_drifts_further() {
        assert!(spin_drift(3.0, 1.5) < spin_drift(1.0, 1.5));
    }
}
