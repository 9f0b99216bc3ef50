//! Matrix serialization (feature: `serde`).
//!
//! `Matrix` is (de)serialized through [`SerializedMatrix`], a versioned row-major
//! snapshot. Keeping the wire shape separate lets the in-memory layout change without
//! breaking stored weights.
//!
//! Deserialization validates the version, the shape, the buffer length, and that every
//! value is finite, so a corrupt file cannot produce a jagged or NaN-poisoned matrix.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Matrix, Result};

pub const MATRIX_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedMatrix {
    pub format_version: u32,
    pub rows: usize,
    pub cols: usize,
    /// Row-major (rows, cols).
    pub values: Vec<f32>,
}

impl SerializedMatrix {
    pub fn validate(&self) -> Result<()> {
        if self.format_version != MATRIX_FORMAT_VERSION {
            return Err(Error::InvalidData(format!(
                "unsupported matrix format_version {}; expected {}",
                self.format_version, MATRIX_FORMAT_VERSION
            )));
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidData(format!(
                "matrix dims must be > 0, got {}x{}",
                self.rows, self.cols
            )));
        }

        let expected = self
            .rows
            .checked_mul(self.cols)
            .ok_or_else(|| Error::InvalidData("matrix shape overflow".to_owned()))?;
        if self.values.len() != expected {
            return Err(Error::InvalidData(format!(
                "values length {} does not match rows * cols ({} * {})",
                self.values.len(),
                self.rows,
                self.cols
            )));
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "values must contain only finite numbers".to_owned(),
            ));
        }

        Ok(())
    }
}

impl From<&Matrix> for SerializedMatrix {
    fn from(m: &Matrix) -> Self {
        Self {
            format_version: MATRIX_FORMAT_VERSION,
            rows: m.rows(),
            cols: m.cols(),
            values: m.as_slice().to_vec(),
        }
    }
}

impl TryFrom<SerializedMatrix> for Matrix {
    type Error = Error;

    fn try_from(value: SerializedMatrix) -> std::result::Result<Self, Self::Error> {
        value.validate()?;
        Matrix::from_flat(value.rows, value.cols, value.values)
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SerializedMatrix::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let ser = SerializedMatrix::deserialize(deserializer)?;
        Matrix::try_from(ser).map_err(serde::de::Error::custom)
    }
}
