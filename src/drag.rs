//! Drag retardation for the standard drag curve families.
//!
//! Each family is stored as a piecewise power-law fit of the reference
//! retardation curve: inside a velocity segment the retardation of the
//! reference projectile is `A * v^M` (ft/s², standard sea-level air), and a
//! real projectile is slowed by that value divided by its ballistic
//! coefficient.

use crate::constants::MAX_TABULATED_VELOCITY_FPS;
use crate::DragModel;

/// One segment of a drag curve fit, valid for velocities above `min_velocity_fps`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSegment {
    pub min_velocity_fps: f64,
    pub a: f64,
    pub m: f64,
}

const fn seg(min_velocity_fps: f64, a: f64, m: f64) -> DragSegment {
    DragSegment { min_velocity_fps, a, m }
}

/// Reference drag table: segments ordered from the fastest to the slowest
#[derive(Debug, Clone, Copy)]
pub struct DragTable {
    pub segments: &'static [DragSegment],
}

impl DragTable {
    /// Segment covering `velocity`; velocities at or below the last bound use the last segment.
    /// `None` only for a table with no segments.
    pub fn segment(&self, velocity: f64) -> Option<&DragSegment> {
        self.segments
            .iter()
            .find(|s| velocity > s.min_velocity_fps)
            .or_else(|| self.segments.last())
    }

    /// Retardation of the reference projectile at `velocity` (ft/s).
    ///
    /// Velocity is saturated to `[0, MAX_TABULATED_VELOCITY_FPS]`.
    pub fn reference_retardation(&self, velocity: f64) -> f64 {
        let v = velocity.clamp(0.0, MAX_TABULATED_VELOCITY_FPS);
        self.segment(v).map_or(0.0, |s| s.a * v.powf(s.m))
    }
}

static G1_TABLE: DragTable = DragTable {
    segments: &[
        seg(4230.0, 1.477404177730177e-04, 1.9565),
        seg(3680.0, 1.920339268755614e-04, 1.925),
        seg(3450.0, 2.894751026819746e-04, 1.875),
        seg(3295.0, 4.349905111115636e-04, 1.825),
        seg(3130.0, 6.520421871892662e-04, 1.775),
        seg(2960.0, 9.748073694078696e-04, 1.725),
        seg(2830.0, 1.453721560187286e-03, 1.675),
        seg(2680.0, 2.162887202930376e-03, 1.625),
        seg(2460.0, 3.209559783129881e-03, 1.575),
        seg(2225.0, 3.904368218691249e-03, 1.55),
        seg(2015.0, 3.222942271262336e-03, 1.575),
        seg(1890.0, 2.203329542297809e-03, 1.625),
        seg(1810.0, 1.511001028891904e-03, 1.675),
        seg(1730.0, 8.609957592468259e-04, 1.75),
        seg(1595.0, 4.086146797305117e-04, 1.85),
        seg(1520.0, 1.954473210037398e-04, 1.95),
        seg(1420.0, 5.431896266462351e-05, 2.125),
        seg(1360.0, 8.847742581674416e-06, 2.375),
        seg(1315.0, 1.456922328720298e-06, 2.625),
        seg(1280.0, 2.419485191895565e-07, 2.875),
        seg(1220.0, 1.657956321067612e-08, 3.25),
        seg(1185.0, 4.745469537157371e-10, 3.75),
        seg(1150.0, 1.379746590025088e-11, 4.25),
        seg(1100.0, 4.070157961147882e-13, 4.75),
        seg(1060.0, 2.938236954847331e-14, 5.125),
        seg(1025.0, 1.228597370774746e-14, 5.25),
        seg(980.0, 2.916938264100495e-14, 5.125),
        seg(945.0, 3.855099424807451e-13, 4.75),
        seg(905.0, 1.185097045689854e-11, 4.25),
        seg(860.0, 3.566129470974951e-10, 3.75),
        seg(810.0, 1.045513263966272e-08, 3.25),
        seg(780.0, 1.291159200846216e-07, 2.875),
        seg(750.0, 6.824429329105383e-07, 2.625),
        seg(700.0, 3.569169672385163e-06, 2.375),
        seg(640.0, 1.839015095899579e-05, 2.125),
        seg(600.0, 5.71117468873424e-05, 1.950),
        seg(550.0, 9.226557091973427e-05, 1.875),
        seg(250.0, 9.337991957131389e-05, 1.875),
        seg(100.0, 7.225247327590413e-05, 1.925),
        seg(65.0, 5.792684957074546e-05, 1.975),
        seg(0.0, 5.206214107320588e-05, 2.000),
    ],
};

static G2_TABLE: DragTable = DragTable {
    segments: &[
        seg(1674.0, 0.0079470052136733, 1.36999902851493),
        seg(1172.0, 1.00419763721974e-03, 1.65392237010294),
        seg(1060.0, 7.15571228255369e-23, 7.91913562392361),
        seg(949.0, 1.39589807205091e-10, 3.81439537623717),
        seg(670.0, 2.34364342818625e-04, 1.71869536324748),
        seg(335.0, 1.77962438921838e-04, 1.76877550388679),
        seg(0.0, 5.18033561289704e-05, 1.98160270524632),
    ],
};

static G5_TABLE: DragTable = DragTable {
    segments: &[
        seg(1730.0, 7.24854775171929e-03, 1.41538574492812),
        seg(1228.0, 3.50563361516117e-05, 2.13077307854948),
        seg(1116.0, 1.84029481181151e-13, 4.81927320350395),
        seg(1004.0, 1.34713064017409e-22, 7.8100555281422),
        seg(837.0, 1.03965974081168e-07, 2.84204791809926),
        seg(335.0, 1.09301593869823e-04, 1.81096361579504),
        seg(0.0, 3.51963178524273e-05, 2.00477856801111),
    ],
};

static G6_TABLE: DragTable = DragTable {
    segments: &[
        seg(3236.0, 0.0455384883480781, 1.15997674041274),
        seg(2065.0, 7.167261849653769e-02, 1.10704436538885),
        seg(1311.0, 1.66676386084348e-03, 1.60085100195952),
        seg(1144.0, 1.01482730119215e-07, 2.9569674731838),
        seg(1004.0, 4.31542773103552e-18, 6.34106317069757),
        seg(670.0, 2.04835650496866e-05, 2.11688446325998),
        seg(0.0, 7.50912466084823e-05, 1.92031057847052),
    ],
};

static G7_TABLE: DragTable = DragTable {
    segments: &[
        seg(4200.0, 1.29081656775919e-09, 3.24121295355962),
        seg(3000.0, 0.0171422231434847, 1.27907168025204),
        seg(1470.0, 2.33355948302505e-03, 1.52693913274526),
        seg(1260.0, 7.97592111627665e-04, 1.67688974440324),
        seg(1110.0, 5.71086414289273e-12, 4.3212826264889),
        seg(960.0, 3.02865108244904e-17, 5.99074203776707),
        seg(670.0, 7.52285155782535e-06, 2.1738019851075),
        seg(540.0, 1.31766281225189e-05, 2.08774690257991),
        seg(0.0, 1.34504843776525e-05, 2.08702306738884),
    ],
};

static G8_TABLE: DragTable = DragTable {
    segments: &[
        seg(3571.0, 0.0112263766252305, 1.33207346655961),
        seg(1841.0, 0.0167252613732636, 1.28662041261785),
        seg(1120.0, 2.20172456619625e-03, 1.55636358091189),
        seg(1088.0, 2.0538037167098e-16, 5.80410776994789),
        seg(976.0, 5.92182174254121e-12, 4.29275576134191),
        seg(0.0, 4.3917343795117e-05, 1.99978116283334),
    ],
};

/// Embedded reference table for a drag curve family
pub fn drag_table(drag_model: DragModel) -> &'static DragTable {
    match drag_model {
        DragModel::G1 => &G1_TABLE,
        DragModel::G2 => &G2_TABLE,
        DragModel::G5 => &G5_TABLE,
        DragModel::G6 => &G6_TABLE,
        DragModel::G7 => &G7_TABLE,
        DragModel::G8 => &G8_TABLE,
    }
}

/// Deceleration (ft/s²) of a projectile with ballistic coefficient
/// `drag_coefficient` moving at `velocity` ft/s.
///
/// Never fails: velocities outside the tabulated range saturate at the table
/// bounds. A non-positive ballistic coefficient is a caller precondition
/// violation and yields a non-finite result.
pub fn retardation(drag_model: DragModel, drag_coefficient: f64, velocity: f64) -> f64 {
    drag_table(drag_model).reference_retardation(velocity) / drag_coefficient
}

/// [`retardation`] scaled by a form factor (drag of the projectile relative
/// to the reference shape). A form factor of 1.0 gives exactly [`retardation`].
pub fn retardation_with_form_factor(
    drag_model: DragModel,
    drag_coefficient: f64,
    velocity: f64,
    form_factor: f64,
) -> f64 {
    retardation(drag_model, drag_coefficient, velocity) * form_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g1_known_value() {
        // 2700 fps falls in the 2680..2830 segment: A = 2.1629e-3, M = 1.625
        let expected = 2.162887202930376e-03 * 2700.0_f64.powf(1.625);
        let r = retardation(DragModel::G1, 1.0, 2700.0);
        assert!((r - expected).abs() < 1e-9);
        assert!(r > 800.0 && r < 830.0, "G1 retardation at 2700 fps: {r}");
    }

    #[test]
    fn test_ballistic_coefficient_scaling() {
        let r1 = retardation(DragModel::G7, 1.0, 2650.0);
        let r_half = retardation(DragModel::G7, 0.5, 2650.0);
        assert!((r_half - 2.0 * r1).abs() < 1e-9);
    }

    #[test]
    fn test_segment_lookup() {
        let table = drag_table(DragModel::G7);
        assert_eq!(table.segment(5000.0).unwrap().min_velocity_fps, 4200.0);
        assert_eq!(table.segment(3000.0).unwrap().min_velocity_fps, 1470.0); // bound is exclusive
        assert_eq!(table.segment(3000.5).unwrap().min_velocity_fps, 3000.0);
        assert_eq!(table.segment(10.0).unwrap().min_velocity_fps, 0.0);
        assert_eq!(table.segment(0.0).unwrap().min_velocity_fps, 0.0);
    }

    #[test]
    fn test_empty_table_has_no_retardation() {
        let empty = DragTable { segments: &[] };
        assert!(empty.segment(2650.0).is_none());
        assert_eq!(empty.reference_retardation(2650.0), 0.0);
    }

    #[test]
    fn test_saturation_at_bounds() {
        for model in DragModel::ALL {
            // Zero and negative velocities have no retardation
            assert_eq!(retardation(model, 0.5, 0.0), 0.0);
            assert_eq!(retardation(model, 0.5, -100.0), 0.0);

            // Above the table the top value is held
            let top = retardation(model, 0.5, MAX_TABULATED_VELOCITY_FPS);
            let beyond = retardation(model, 0.5, 25_000.0);
            assert_eq!(top, beyond);
            assert!(beyond.is_finite() && beyond > 0.0);
        }
    }

    #[test]
    fn test_all_tables_positive_and_ordered() {
        for model in DragModel::ALL {
            let table = drag_table(model);
            assert_eq!(table.segments.last().map(|s| s.min_velocity_fps), Some(0.0));
            for pair in table.segments.windows(2) {
                assert!(pair[0].min_velocity_fps > pair[1].min_velocity_fps, "{model} not ordered");
            }
            for v in [50.0, 400.0, 900.0, 1100.0, 1500.0, 2500.0, 3500.0, 4500.0] {
                let r = retardation(model, 1.0, v);
                assert!(r > 0.0 && r.is_finite(), "{model} at {v} fps: {r}");
            }
        }
    }

    #[test]
    fn test_retardation_grows_with_speed() {
        for model in DragModel::ALL {
            let slow = retardation(model, 0.4, 800.0);
            let fast = retardation(model, 0.4, 2800.0);
            assert!(fast > slow, "{model}: {fast} <= {slow}");
        }
    }

    #[test]
    fn test_g1_continuity() {
        // The G1 fit has small steps at its segment bounds
        let table = drag_table(DragModel::G1);
        for s in table.segments.iter().filter(|s| s.min_velocity_fps > 0.0) {
            let below = retardation(DragModel::G1, 1.0, s.min_velocity_fps - 0.01);
            let above = retardation(DragModel::G1, 1.0, s.min_velocity_fps + 0.01);
            let jump = (above - below).abs() / below;
            assert!(jump < 0.05, "G1 step at {} fps: {below} vs {above}", s.min_velocity_fps);
        }
    }

    #[test]
    fn test_g7_slower_than_g1_for_same_bc() {
        // The boat-tail reference shape sheds far less speed than the flat-base one
        assert!(retardation(DragModel::G7, 0.3, 2700.0) < retardation(DragModel::G1, 0.3, 2700.0));
    }

    #[test]
    fn test_form_factor() {
        let base = retardation(DragModel::G7, 0.224, 2650.0);
        assert_eq!(retardation_with_form_factor(DragModel::G7, 0.224, 2650.0, 1.0), base);
        let scaled = retardation_with_form_factor(DragModel::G7, 0.224, 2650.0, 1.1);
        assert!((scaled - base * 1.1).abs() < 1e-9);
        // A form factor is the same as dividing the BC
        let equivalent = retardation(DragModel::G7, 0.224 / 1.1, 2650.0);
        assert!((scaled - equivalent).abs() / equivalent < 1e-12);
    }
}
