//! Dense row-major `f32` matrix.
//!
//! `Matrix` stores a weight grid for one layer transition. Rows and columns are fixed
//! at construction; every shape change goes through [`Matrix::redimension_with_rng`]
//! (or one of its variants), which returns a new matrix and keeps the overlapping
//! cells of the old one.
//!
//! Storage is a single contiguous buffer, cell `(i, j)` at `i * cols + j`.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::matmul::matmul_f32;
use crate::{Error, Init, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    /// Row-major, `rows * cols` cells.
    values: Vec<f32>,
}

#[inline]
fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidShape(format!(
            "rows and cols must be > 0, got {rows}x{cols}"
        )));
    }
    rows.checked_mul(cols)
        .ok_or_else(|| Error::InvalidShape(format!("{rows}x{cols} overflows usize")))
}

impl Matrix {
    /// Allocate a `rows x cols` matrix with every cell set to `0.0`.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            values: vec![0.0; len],
        })
    }

    /// Build a matrix from a row-major buffer of `rows * cols` values.
    pub fn from_flat(rows: usize, cols: usize, values: Vec<f32>) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if values.len() != len {
            return Err(Error::InvalidData(format!(
                "values length {} does not match {rows}x{cols}",
                values.len()
            )));
        }
        Ok(Self { rows, cols, values })
    }

    /// Build a matrix from per-row vectors.
    ///
    /// This copies into contiguous storage. The grid must be non-empty and rectangular.
    pub fn from_rows(grid: &[Vec<f32>]) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::InvalidData("grid must not be empty".to_owned()));
        }

        let cols = grid[0].len();
        let len = checked_len(grid.len(), cols)?;
        for (i, row) in grid.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidData(format!(
                    "grid row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
        }

        let mut values = Vec::with_capacity(len);
        for row in grid {
            values.extend_from_slice(row);
        }

        Ok(Self {
            rows: grid.len(),
            cols,
            values,
        })
    }

    /// A `rows x cols` matrix with ones on the diagonal `i == j` and zeros elsewhere.
    pub fn identity(rows: usize, cols: usize) -> Result<Self> {
        let mut m = Self::new(rows, cols)?;
        m.set_to_identity();
        Ok(m)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    /// Total number of cells (`rows * cols`, never zero).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    /// Always false: a matrix has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True iff both matrices have exactly the same rows and cols.
    #[inline]
    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// True iff `grid` has `rows` rows of exactly `cols` cells each.
    pub fn same_shape_as_rows(&self, grid: &[Vec<f32>]) -> bool {
        grid.len() == self.rows && grid.iter().all(|row| row.len() == self.cols)
    }

    /// Matrix product `self * rhs`, shape `(self.rows, rhs.cols)`.
    ///
    /// With `normalize`, every cell is divided by `self.cols`, i.e. the result holds the mean
    /// of each weighted sum instead of the sum itself.
    ///
    /// Returns `DimensionMismatch` unless `self.cols == rhs.rows`.
    pub fn multiply(&self, rhs: &Matrix, normalize: bool) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::DimensionMismatch(format!(
                "multiply: lhs is {}x{} but rhs is {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )));
        }

        let mut out = Matrix::new(self.rows, rhs.cols)?;
        matmul_f32(
            self.rows,
            rhs.cols,
            self.cols,
            &self.values,
            &rhs.values,
            &mut out.values,
        );

        if normalize {
            let k = self.cols as f32;
            for v in &mut out.values {
                *v /= k;
            }
        }
        Ok(out)
    }

    /// Elementwise sum. Both matrices must have the same shape.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        if !self.same_shape(rhs) {
            return Err(mismatch("add", self.shape(), rhs.shape()));
        }

        let values = self
            .values
            .iter()
            .zip(&rhs.values)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            values,
        })
    }

    pub fn set_to_zero(&mut self) -> &mut Self {
        self.values.fill(0.0);
        self
    }

    pub fn set_to_one(&mut self) -> &mut Self {
        self.values.fill(1.0);
        self
    }

    /// Ones where `i == j`, zeros elsewhere. Non-square matrices get the same rule.
    pub fn set_to_identity(&mut self) -> &mut Self {
        let cols = self.cols;
        for (idx, v) in self.values.iter_mut().enumerate() {
            *v = if idx / cols == idx % cols { 1.0 } else { 0.0 };
        }
        self
    }

    /// Overwrite every cell according to `init`.
    pub fn fill<R: Rng + ?Sized>(&mut self, init: Init, rng: &mut R) -> &mut Self {
        init.fill(&mut self.values, self.cols, rng);
        self
    }

    /// Redraw every cell uniformly from `[-r, r]`, `r = standard_synapse_range(cols)`.
    ///
    /// Each call draws fresh values from `rng`.
    pub fn init_synapse_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        self.fill(Init::Synapse, rng)
    }

    /// Like [`Matrix::init_synapse_with_rng`] with a deterministic `StdRng`.
    pub fn init_synapse_with_seed(&mut self, seed: u64) -> &mut Self {
        let mut rng = StdRng::seed_from_u64(seed);
        self.init_synapse_with_rng(&mut rng)
    }

    /// Returns a copy of row `row`.
    pub fn get_row(&self, row: usize) -> Result<Vec<f32>> {
        self.check_row(row)?;
        let start = row * self.cols;
        Ok(self.values[start..start + self.cols].to_vec())
    }

    /// Returns a copy of column `col`.
    pub fn get_column(&self, col: usize) -> Result<Vec<f32>> {
        self.check_col(col)?;
        Ok(self
            .values
            .iter()
            .skip(col)
            .step_by(self.cols)
            .copied()
            .collect())
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<f32> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.values[row * self.cols + col])
    }

    /// Row-major view of all cells (`rows * cols`).
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Owned per-row copy of all cells.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.values
            .chunks_exact(self.cols)
            .map(<[f32]>::to_vec)
            .collect()
    }

    /// Copy all cells from `source`.
    ///
    /// If the shapes differ and `allow_mismatch` is false this returns `DimensionMismatch`
    /// and nothing is written. With `allow_mismatch`, only the overlapping
    /// `min(rows) x min(cols)` region is copied and the remaining cells are left untouched.
    pub fn set_all_values(&mut self, source: &Matrix, allow_mismatch: bool) -> Result<()> {
        if !self.same_shape(source) {
            if !allow_mismatch {
                return Err(mismatch("set_all_values", self.shape(), source.shape()));
            }
            log::trace!(
                "partial copy from {}x{} into {}x{}",
                source.rows,
                source.cols,
                self.rows,
                self.cols
            );
        }
        self.copy_overlap(source);
        Ok(())
    }

    /// Copy all cells from a per-row grid; the raw-grid counterpart of
    /// [`Matrix::set_all_values`].
    ///
    /// With `allow_mismatch`, row `i` (for `i < min(rows, grid.len())`) copies the first
    /// `min(cols, grid[i].len())` cells; rows may have different lengths.
    pub fn set_all_from_rows(&mut self, grid: &[Vec<f32>], allow_mismatch: bool) -> Result<()> {
        if !self.same_shape_as_rows(grid) {
            if !allow_mismatch {
                return Err(Error::DimensionMismatch(format!(
                    "set_all_from_rows: matrix is {}x{} but grid has {} rows with lengths {:?}",
                    self.rows,
                    self.cols,
                    grid.len(),
                    grid.iter().map(Vec::len).collect::<Vec<_>>()
                )));
            }
            log::trace!(
                "partial copy from {}-row grid into {}x{}",
                grid.len(),
                self.rows,
                self.cols
            );
        }

        for (dst, src) in self.values.chunks_exact_mut(self.cols).zip(grid) {
            let n = dst.len().min(src.len());
            dst[..n].copy_from_slice(&src[..n]);
        }
        Ok(())
    }

    /// Overwrite row `row` with `values`.
    ///
    /// Writes `min(cols, values.len())` cells. A length mismatch is an error unless
    /// `allow_mismatch` is set; on error nothing is written.
    pub fn set_row(&mut self, row: usize, values: &[f32], allow_mismatch: bool) -> Result<()> {
        self.check_row(row)?;
        if values.len() != self.cols {
            if !allow_mismatch {
                return Err(Error::DimensionMismatch(format!(
                    "set_row: got {} values for a row of {} cells",
                    values.len(),
                    self.cols
                )));
            }
            log::trace!(
                "set_row {row}: writing {} of {} values",
                values.len().min(self.cols),
                values.len()
            );
        }

        let n = self.cols.min(values.len());
        let start = row * self.cols;
        self.values[start..start + n].copy_from_slice(&values[..n]);
        Ok(())
    }

    /// Overwrite column `col` with `values`. Same mismatch rules as [`Matrix::set_row`].
    pub fn set_column(&mut self, col: usize, values: &[f32], allow_mismatch: bool) -> Result<()> {
        self.check_col(col)?;
        if values.len() != self.rows {
            if !allow_mismatch {
                return Err(Error::DimensionMismatch(format!(
                    "set_column: got {} values for a column of {} cells",
                    values.len(),
                    self.rows
                )));
            }
            log::trace!(
                "set_column {col}: writing {} of {} values",
                values.len().min(self.rows),
                values.len()
            );
        }

        let cols = self.cols;
        for (i, v) in values.iter().take(self.rows).enumerate() {
            self.values[i * cols + col] = *v;
        }
        Ok(())
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        self.check_row(row)?;
        self.check_col(col)?;
        self.values[row * self.cols + col] = value;
        Ok(())
    }

    /// Reallocate as a `rows x cols` matrix, keeping learned weights where they still fit.
    ///
    /// The new matrix is first filled according to `init`, then the overlapping region
    /// `min(rows, self.rows) x min(cols, self.cols)` is overwritten with this matrix's cells.
    /// Cells that fall outside the new shape are dropped; shrinking and growing back does not
    /// bring them back.
    pub fn redimension_with_rng<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        init: Init,
        rng: &mut R,
    ) -> Result<Matrix> {
        let mut out = Matrix::new(rows, cols)?;
        out.fill(init, rng);
        out.copy_overlap(self);

        log::debug!(
            "redimension {}x{} -> {rows}x{cols} ({init:?}), kept {}x{}",
            self.rows,
            self.cols,
            rows.min(self.rows),
            cols.min(self.cols)
        );
        Ok(out)
    }

    /// Like [`Matrix::redimension_with_rng`] with a deterministic `StdRng`.
    pub fn redimension_with_seed(
        &self,
        rows: usize,
        cols: usize,
        init: Init,
        seed: u64,
    ) -> Result<Matrix> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.redimension_with_rng(rows, cols, init, &mut rng)
    }

    /// Redimension with new cells set to zero. Needs no random source.
    pub fn redimension_zeroed(&self, rows: usize, cols: usize) -> Result<Matrix> {
        let mut out = Matrix::new(rows, cols)?;
        out.copy_overlap(self);

        log::debug!(
            "redimension {}x{} -> {rows}x{cols} (Zeros), kept {}x{}",
            self.rows,
            self.cols,
            rows.min(self.rows),
            cols.min(self.cols)
        );
        Ok(out)
    }

    /// Copy the `min(rows) x min(cols)` top-left region of `source` into `self`.
    fn copy_overlap(&mut self, source: &Matrix) {
        let cols = self.cols.min(source.cols);
        for (dst, src) in self
            .values
            .chunks_exact_mut(self.cols)
            .zip(source.values.chunks_exact(source.cols))
        {
            dst[..cols].copy_from_slice(&src[..cols]);
        }
    }

    #[inline]
    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(Error::IndexOutOfRange(format!(
                "row {row} in a {}x{} matrix",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    #[inline]
    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.cols {
            return Err(Error::IndexOutOfRange(format!(
                "column {col} in a {}x{} matrix",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}

fn mismatch(op: &str, lhs: (usize, usize), rhs: (usize, usize)) -> Error {
    Error::DimensionMismatch(format!(
        "{op}: {}x{} vs {}x{}",
        lhs.0, lhs.1, rhs.0, rhs.1
    ))
}

/// One line per row, cells separated by a space. Honors `{:.N}` precision.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.values.chunks_exact(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match f.precision() {
                    Some(p) => write!(f, "{v:.p$}")?,
                    None => write!(f, "{v}")?,
                }
            }
        }
        Ok(())
    }
}
