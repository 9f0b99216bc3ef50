//! Weight initialization.
//!
//! A freshly allocated weight matrix is either left at zero or drawn uniformly from
//! `[-r, r]` where `r = 2 / sqrt(cols)`. `cols` is the fan-in of the units the matrix
//! feeds, so wider layers start with proportionally smaller weights and the variance of
//! the initial weighted sum stays roughly independent of layer width.
//!
//! Randomness is always injected: callers pass an `Rng` (or a seed, which becomes a
//! `StdRng`). Nothing here reads a global generator.

use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::{Error, Result};

/// How to fill cells that have no prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Init {
    /// Every cell is `0.0`.
    Zeros,
    /// Uniform in `[-standard_synapse_range(cols), standard_synapse_range(cols)]`.
    #[default]
    Synapse,
}

/// Half-width of the uniform synapse distribution for a matrix with `cols` columns.
///
/// Returns `2 / sqrt(cols)`. `cols == 0` is rejected.
pub fn standard_synapse_range(cols: usize) -> Result<f32> {
    if cols == 0 {
        return Err(Error::InvalidShape(
            "synapse range requires cols > 0".to_owned(),
        ));
    }
    Ok(range_for(cols))
}

#[inline]
fn range_for(cols: usize) -> f32 {
    debug_assert!(cols > 0);
    2.0 / (cols as f32).sqrt()
}

impl Init {
    /// Overwrite `values` (a row-major buffer with `cols` columns) according to the policy.
    ///
    /// `cols` must be non-zero; `Matrix` guarantees this for its own buffers.
    pub(crate) fn fill<R: Rng + ?Sized>(self, values: &mut [f32], cols: usize, rng: &mut R) {
        match self {
            Init::Zeros => values.fill(0.0),
            Init::Synapse => {
                let range = range_for(cols);
                let dist = Uniform::new_inclusive(-range, range);
                for v in values.iter_mut() {
                    *v = dist.sample(rng);
                }
            }
        }
    }
}
