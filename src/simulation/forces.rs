//! Force / acceleration contributors for the simulation
//!
//! Every evaluation works on a [`Snapshot`]: borrowed, read-only positions,
//! velocities and masses that may describe the real state or a hypothetical
//! one (RK4 stages). Results are written index-aligned into `out`, and any
//! acceleration cached on the bodies is ignored.

use rayon::prelude::*;

use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;

/// Body count from which the outer loop fans out across the rayon pool
pub const PARALLEL_THRESHOLD: usize = 64;

/// Immutable state handed to the force terms for one evaluation
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub positions: &'a [NVec3],
    pub velocities: &'a [NVec3],
    pub masses: &'a [f64],
}

impl<'a> Snapshot<'a> {
    pub fn new(positions: &'a [NVec3], velocities: &'a [NVec3], masses: &'a [f64]) -> Self {
        debug_assert_eq!(positions.len(), masses.len());
        debug_assert_eq!(velocities.len(), masses.len());
        Self { positions, velocities, masses }
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

/// Trait for acceleration sources
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, params: &Parameters, relativity: bool, snap: &Snapshot, out: &mut [NVec3]);
}

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// The set used by a plain simulation: direct Newtonian gravity only
    pub fn gravity() -> Self {
        Self::new().with(NewtonianGravity::default())
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `snap`
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    /// - `out` must already be sized to the snapshot
    pub fn accumulate_accels(&self, params: &Parameters, relativity: bool, snap: &Snapshot, out: &mut [NVec3]) {
        assert_eq!(out.len(), snap.len(), "acceleration buffer not sized to body count");
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(params, relativity, snap, out);
        }
    }
}

/// Direct-summation Newtonian gravity with a hard softening cutoff and an
/// optional first-order post-Newtonian multiplier.
///
/// Every ordered pair (i, j) is visited, so each pair is computed twice. In
/// exchange `out[i]` depends only on the snapshot, and the loop over `i` can
/// run in parallel with no locks.
///
/// With relativity on, the pull on `i` is scaled by `1 + 3 |v_i|^2 / c^2`
/// using only the receiving body's own velocity. The two bodies of a pair
/// therefore scale their mutual pull differently and momentum is no longer
/// exactly conserved. This is kept as is.
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub parallel_threshold: usize,
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self { parallel_threshold: PARALLEL_THRESHOLD }
    }
}

impl NewtonianGravity {
    /// Run everything on the calling thread
    pub fn sequential() -> Self {
        Self { parallel_threshold: usize::MAX }
    }

    /// Summed pull on body `i` from every other body in the snapshot
    fn accel_on(&self, i: usize, params: &Parameters, relativity: bool, snap: &Snapshot) -> NVec3 {
        let xi = snap.positions[i];
        let mut acc = NVec3::zeros();

        for (j, (xj, mj)) in snap.positions.iter().zip(snap.masses.iter()).enumerate() {
            if j == i {
                continue;
            }
            let r = xj - xi;
            let dist2 = r.norm_squared();

            // near-coincident pair: excluded, not singular
            if dist2 < params.softening2 {
                continue;
            }

            let dist = dist2.sqrt();
            acc += r * (params.g * mj / (dist2 * dist));
        }

        if relativity {
            let v2 = snap.velocities[i].norm_squared();
            acc *= 1.0 + 3.0 * v2 / (params.c * params.c);
        }
        acc
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, params: &Parameters, relativity: bool, snap: &Snapshot, out: &mut [NVec3]) {
        let n = snap.len();
        if n < 2 { // nothing to pull on
            return;
        }

        if n >= self.parallel_threshold {
            out.par_iter_mut().enumerate().for_each(|(i, a)| {
                *a += self.accel_on(i, params, relativity, snap);
            });
        } else {
            for (i, a) in out.iter_mut().enumerate() {
                *a += self.accel_on(i, params, relativity, snap);
            }
        }
    }
}
