/// Vertical deflection (aerodynamic jump) of a spin-stabilized projectile, in MOA.
///
/// Linear empirical model in the stability factor and the length in
/// calibers. The result is per unit of crosswind; the trajectory solver scales
/// it by the crosswind component before applying it.
///
/// # Arguments
/// * `stability` - Gyroscopic stability factor
/// * `bullet_length` - Bullet length in inches
/// * `caliber` - Bullet diameter in inches
pub fn vertical_deflection(stability: f64, bullet_length: f64, caliber: f64) -> f64 {
    0.01 * stability - 0.0024 * (bullet_length / caliber) + 0.032
}
