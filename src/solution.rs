use serde::Serialize;

use crate::constants::MAX_YARDS;
use crate::error::BallisticsError;

/// Ballistic solution for the projectile at one whole yard of travel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sample {
    /// Downrange distance in yards (within 1/6 yard of the sample index)
    pub range_yards: f64,
    /// Path relative to the line of sight, inches
    pub path_inches: f64,
    /// Elevation correction to zero at this range, MOA
    pub moa_correction: f64,
    /// Time of flight, seconds
    pub seconds: f64,
    /// Wind deflection, inches
    pub windage_inches: f64,
    /// Wind correction, MOA
    pub windage_moa: f64,
    /// Spin-drift offset, inches (zero without stability corrections)
    pub spindrift_inches: f64,
    /// Windage plus spin drift, inches
    pub corrected_windage_inches: f64,
    /// Windage plus spin drift, MOA
    pub corrected_windage_moa: f64,
    /// Total velocity, ft/s
    pub velocity_fps: f64,
    /// Velocity along the bore axis, ft/s
    pub velocity_x_fps: f64,
    /// Velocity perpendicular to the bore axis, ft/s
    pub velocity_y_fps: f64,
}

/// Why the integrator stopped producing samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The path steepened past 3:1 against the bore axis
    SteepDescent,
    /// The table reached its capacity; the trajectory was truncated
    CapacityReached,
    /// The projectile stopped advancing along the bore axis
    Stalled,
    /// The speed stopped being a finite positive number
    Degenerate,
}

/// Per-yard trajectory table.
///
/// Sample `i` describes the projectile at yard `i`. The buffer is allocated
/// once at full capacity and filled in increasing range order by the solver;
/// after that the table is read-only. Field accessors return 0.0 for yards
/// past the end of the table, [`Solution::sample`] reports them as errors.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    samples: Vec<Sample>,
    capacity: usize,
    termination: Termination,
}

impl Solution {
    /// Allocate an empty table; capacity never exceeds `MAX_YARDS`.
    pub(crate) fn with_capacity(max_yards: usize) -> Self {
        let capacity = max_yards.min(MAX_YARDS);
        Solution {
            samples: Vec::with_capacity(capacity),
            capacity,
            termination: Termination::CapacityReached,
        }
    }

    /// Append the next yard; callers must check `is_full` first.
    pub(crate) fn push(&mut self, sample: Sample) {
        debug_assert!(!self.is_full());
        self.samples.push(sample);
    }

    pub(crate) fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub(crate) fn finish(&mut self, termination: Termination) {
        self.termination = termination;
    }

    /// Number of valid yards
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of yards this table could hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample at `yard`, or `OutOfRange` past the end of the table.
    pub fn sample(&self, yard: usize) -> Result<&Sample, BallisticsError> {
        self.samples.get(yard).ok_or(BallisticsError::OutOfRange {
            index: yard,
            len: self.samples.len(),
        })
    }

    fn field(&self, yard: usize, f: impl Fn(&Sample) -> f64) -> f64 {
        self.samples.get(yard).map(f).unwrap_or(0.0)
    }

    /// Range in yards
    pub fn range(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.range_yards)
    }

    /// Path relative to the line of sight, inches
    pub fn path(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.path_inches)
    }

    /// Elevation correction to achieve a zero at this range, MOA
    pub fn moa(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.moa_correction)
    }

    /// Time of flight, seconds
    pub fn time(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.seconds)
    }

    /// Windage in inches
    pub fn windage(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.windage_inches)
    }

    /// Windage in MOA
    pub fn windage_moa(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.windage_moa)
    }

    /// Spin drift in inches
    pub fn spin_drift(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.spindrift_inches)
    }

    /// Windage plus spin drift, inches
    pub fn corrected_windage(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.corrected_windage_inches)
    }

    /// Windage plus spin drift, MOA
    pub fn corrected_windage_moa(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.corrected_windage_moa)
    }

    /// Total velocity, ft/s
    pub fn velocity(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.velocity_fps)
    }

    /// Velocity along the bore, ft/s
    pub fn velocity_x(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.velocity_x_fps)
    }

    /// Velocity across the bore, ft/s
    pub fn velocity_y(&self, yard: usize) -> f64 {
        self.field(yard, |s| s.velocity_y_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(yard: usize) -> Sample {
        let y = yard as f64;
        Sample {
            range_yards: y,
            path_inches: -0.1 * y,
            moa_correction: 0.2 * y,
            seconds: 0.001 * y,
            windage_inches: 0.05 * y,
            windage_moa: 0.01 * y,
            spindrift_inches: -0.02 * y,
            corrected_windage_inches: 0.03 * y,
            corrected_windage_moa: 0.006 * y,
            velocity_fps: 3000.0 - y,
            velocity_x_fps: 2999.0 - y,
            velocity_y_fps: -y,
        }
    }

    fn table(len: usize, capacity: usize) -> Solution {
        let mut solution = Solution::with_capacity(capacity);
        for yard in 0..len {
            solution.push(sample_at(yard));
        }
        solution.finish(Termination::SteepDescent);
        solution
    }

    #[test]
    fn test_accessors_within_table() {
        let solution = table(10, 20);
        assert_eq!(solution.len(), 10);
        assert_eq!(solution.range(3), 3.0);
        assert_eq!(solution.path(5), -0.5);
        assert_eq!(solution.velocity(2), 2998.0);
        assert_eq!(solution.velocity_x(2), 2997.0);
        assert_eq!(solution.velocity_y(2), -2.0);
        assert_eq!(solution.sample(9).map(|s| s.range_yards), Ok(9.0));
    }

    #[test]
    fn test_accessors_past_end_return_zero() {
        let solution = table(10, 20);
        for yard in [10, 11, 19, 20, 1_000_000] {
            assert_eq!(solution.range(yard), 0.0);
            assert_eq!(solution.path(yard), 0.0);
            assert_eq!(solution.moa(yard), 0.0);
            assert_eq!(solution.time(yard), 0.0);
            assert_eq!(solution.windage(yard), 0.0);
            assert_eq!(solution.windage_moa(yard), 0.0);
            assert_eq!(solution.spin_drift(yard), 0.0);
            assert_eq!(solution.corrected_windage(yard), 0.0);
            assert_eq!(solution.corrected_windage_moa(yard), 0.0);
            assert_eq!(solution.velocity(yard), 0.0);
            assert_eq!(solution.velocity_x(yard), 0.0);
            assert_eq!(solution.velocity_y(yard), 0.0);
        }
    }

    #[test]
    fn test_checked_access_past_end() {
        let solution = table(10, 20);
        assert_eq!(
            solution.sample(10),
            Err(BallisticsError::OutOfRange { index: 10, len: 10 })
        );
    }

    #[test]
    fn test_capacity_is_fixed() {
        let solution = table(20, 20);
        assert!(solution.is_full());
        assert_eq!(solution.capacity(), 20);
        assert_eq!(solution.samples().len(), 20);
    }

    #[test]
    fn test_capacity_clamped_to_hard_cap() {
        assert_eq!(Solution::with_capacity(MAX_YARDS * 4).capacity(), MAX_YARDS);
        assert_eq!(Solution::with_capacity(usize::MAX).capacity(), MAX_YARDS);
        assert_eq!(Solution::with_capacity(400).capacity(), 400);
    }

    #[test]
    fn test_empty_table() {
        let solution = Solution::with_capacity(0);
        assert!(solution.is_empty());
        assert!(solution.is_full());
        assert_eq!(solution.path(0), 0.0);
        assert!(solution.sample(0).is_err());
    }
}
