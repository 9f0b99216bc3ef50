//! Dense weight matrices for small feed-forward networks.
//!
//! `rust-synapse` provides [`Matrix`], a row-major `f32` grid holding the synapse weights of
//! one layer transition, plus the operations a network layer needs around it: forward
//! products, elementwise sums, random initialization, raw value exchange for persistence, and
//! a weight-preserving resize used when a layer's width is edited live.
//!
//! # Design goals
//!
//! - Contiguous storage: one `Vec<f32>` per matrix, so rows can never be jagged.
//! - Explicit contracts: every shape and index precondition is checked on every build and
//!   reported through [`Result`]. Nothing panics on misuse.
//! - Reproducible randomness: every random operation takes an injected `Rng` or a seed.
//!
//! # Errors
//!
//! - [`Error::InvalidShape`]: zero rows or zero columns.
//! - [`Error::DimensionMismatch`]: incompatible shapes for `multiply`, `add`, or a strict copy.
//! - [`Error::IndexOutOfRange`]: a row, column, or cell outside the matrix.
//! - [`Error::InvalidData`]: raw input that cannot form a matrix (jagged grid, bad length).
//!
//! An operation that returns an error has not mutated anything. The mismatch-tolerant copies
//! (`allow_mismatch = true`) and the `redimension_*` family write only the overlapping region;
//! that partial write is their contract, not a failure.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Matrix`] via a versioned, validated format.
//! - `matrixmultiply`: use `matrixmultiply::sgemm` inside [`Matrix::multiply`].
//!
//! # Logging
//!
//! Resizes are reported at `debug` level and truncating copies at `trace` level through the
//! `log` facade. Install any `log` backend to see them.
//!
//! # Quick start
//!
//! ```rust
//! use rust_synapse::{Init, Matrix};
//!
//! # fn main() -> rust_synapse::Result<()> {
//! // 3 inputs feeding 2 units: weights are (inputs x units).
//! let mut weights = Matrix::new(3, 2)?;
//! weights.init_synapse_with_seed(0);
//!
//! let input = Matrix::from_rows(&[vec![0.5, -1.0, 0.25]])?;
//! let activations = input.multiply(&weights, false)?;
//! assert_eq!(activations.shape(), (1, 2));
//!
//! // The user widens the layer to 4 units: trained weights stay, new ones are random.
//! let wider = weights.redimension_with_seed(3, 4, Init::Synapse, 1)?;
//! assert_eq!(wider.get_cell(2, 1)?, weights.get_cell(2, 1)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod init;
pub(crate) mod matmul;
pub mod matrix;

#[cfg(feature = "serde")]
pub mod serde_matrix;

pub use error::{Error, Result};
pub use init::{Init, standard_synapse_range};
pub use matrix::Matrix;
