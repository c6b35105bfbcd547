use crate::constants::MPH_TO_INCHES_PER_SECOND;

/// Headwind component of a wind blowing at `wind_speed` from `wind_angle` degrees.
///
/// Angle convention: 0 is a straight headwind, 90 blows from right to left,
/// 180 is a straight tailwind, 270 (or -90) blows from left to right.
/// Positive values oppose the projectile.
pub fn headwind(wind_speed: f64, wind_angle: f64) -> f64 {
    wind_angle.to_radians().cos() * wind_speed
}

/// Crosswind component; positive values blow from the shooter's right to left.
pub fn crosswind(wind_speed: f64, wind_angle: f64) -> f64 {
    wind_angle.to_radians().sin() * wind_speed
}

/// A wind resolved against the line of fire, in the units it was given in
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindComponents {
    pub headwind: f64,
    pub crosswind: f64,
}

impl WindComponents {
    pub fn new(wind_speed: f64, wind_angle: f64) -> Self {
        WindComponents {
            headwind: headwind(wind_speed, wind_angle),
            crosswind: crosswind(wind_speed, wind_angle),
        }
    }
}

/// Windage deflection in inches, by the lag-time method.
///
/// # Arguments
/// * `crosswind_mph` - Crosswind component in miles per hour
/// * `muzzle_velocity` - Initial velocity in ft/s
/// * `distance` - Downrange distance in feet
/// * `time_of_flight` - Time to reach `distance`, in seconds
pub fn windage(crosswind_mph: f64, muzzle_velocity: f64, distance: f64, time_of_flight: f64) -> f64 {
    let wind_ips = crosswind_mph * MPH_TO_INCHES_PER_SECOND;
    wind_ips * (time_of_flight - distance / muzzle_velocity)
}
