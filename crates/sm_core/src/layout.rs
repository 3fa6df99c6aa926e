//! Sphere layout generator.
//!
//! Distributes N directions evenly over the unit sphere with the golden-angle
//! spiral. Deterministic given N; consumed by the presentation layer to place
//! cubes, never mutated afterward.

use nalgebra::Vector3;

/// Generate `n` evenly distributed unit directions.
///
/// For `i` in `0..n`: `t = i/n`, `inclination = acos(1 - 2t)`,
/// `azimuth = i * 2π * φ` with φ the golden ratio, converted to Cartesian.
pub fn generate_directions(n: usize) -> Vec<Vector3<f32>> {
    let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let angle_increment = std::f32::consts::PI * 2.0 * golden_ratio;

    let mut directions = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f32 / n as f32;
        let inclination = (1.0 - 2.0 * t).acos();
        let azimuth = angle_increment * i as f32;

        directions.push(Vector3::new(
            inclination.sin() * azimuth.cos(),
            inclination.sin() * azimuth.sin(),
            inclination.cos(),
        ));
    }
    directions
}
