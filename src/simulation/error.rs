use std::fmt;

/// Reasons a body is refused by the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be strictly positive and finite
    InvalidMass { name: String, mass: f64 },
    /// Radius must be zero or positive
    InvalidRadius { name: String, radius: f64 },
    /// Position and velocity components must all be finite
    NonFiniteState { name: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::InvalidMass { name, mass } => {
                write!(f, "body '{}' has invalid mass {} kg (must be > 0)", name, mass)
            }
            SimError::InvalidRadius { name, radius } => {
                write!(f, "body '{}' has invalid radius {} m (must be >= 0)", name, radius)
            }
            SimError::NonFiniteState { name } => {
                write!(f, "body '{}' has a non-finite position or velocity", name)
            }
        }
    }
}

impl std::error::Error for SimError {}
