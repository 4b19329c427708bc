//! Built-in starting systems

use super::states::{Body, NVec3};

/// Sun, Earth and Mars on the x axis, planets moving along +y.
///
/// Planets start at mean orbital distance with mean orbital speed. The Sun
/// starts at rest, so the system's center of mass drifts slowly.
pub fn solar_system() -> Vec<Body> {
    vec![
        Body::new("Sun", 1.989e30, 6.9634e8, "#ffff00", NVec3::zeros(), NVec3::zeros()),
        Body::new(
            "Earth",
            5.972e24,
            6.371e6,
            "#0000ff",
            NVec3::new(1.496e11, 0.0, 0.0),
            NVec3::new(0.0, 29_780.0, 0.0),
        ),
        Body::new(
            "Mars",
            6.39e23,
            3.3895e6,
            "#ff0000",
            NVec3::new(2.279e11, 0.0, 0.0),
            NVec3::new(0.0, 24_077.0, 0.0),
        ),
    ]
}
