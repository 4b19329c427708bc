//! Physical constants and numerical parameters for the simulation
//!
//! `Parameters` holds the values the force model reads on every evaluation:
//! - gravitational constant `g`
//! - speed of light `c` (only used by the relativity correction)
//! - squared-distance cutoff `softening2` below which a pair is skipped

/// Newtonian constant of gravitation, m^3 kg^-1 s^-2 (CODATA 2018)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Speed of light in vacuum, m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Pairs closer than 1 km are excluded from the force sum
pub const DEFAULT_SOFTENING2: f64 = 1.0e6;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub c: f64, // speed of light
    pub softening2: f64, // squared-distance cutoff, m^2
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            c: SPEED_OF_LIGHT,
            softening2: DEFAULT_SOFTENING2,
        }
    }
}
