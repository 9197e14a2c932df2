//! Canonical Array Representation
//!
//! Frame data is stored as a homogeneous array of scalar values with an
//! explicit dtype and shape. Both survive a write/read round trip exactly:
//! the store never reshapes or converts element types implicitly.

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

// =============================================================================
// DType
// =============================================================================

/// Scalar element type of an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Complex with f32 components (64 bits per element)
    C64,
    /// Complex with f64 components (128 bits per element)
    C128,
}

impl DType {
    /// Human-readable dtype name
    pub fn name(self) -> &'static str {
        match self {
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::C64 => "complex64",
            DType::C128 => "complex128",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ArrayData
// =============================================================================

/// Element storage, one variant per supported dtype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayData {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    C64(Vec<Complex<f32>>),
    C128(Vec<Complex<f64>>),
}

impl ArrayData {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            ArrayData::I8(v) => v.len(),
            ArrayData::I16(v) => v.len(),
            ArrayData::I32(v) => v.len(),
            ArrayData::I64(v) => v.len(),
            ArrayData::U8(v) => v.len(),
            ArrayData::U16(v) => v.len(),
            ArrayData::U32(v) => v.len(),
            ArrayData::U64(v) => v.len(),
            ArrayData::F32(v) => v.len(),
            ArrayData::F64(v) => v.len(),
            ArrayData::C64(v) => v.len(),
            ArrayData::C128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element dtype of this storage
    pub fn dtype(&self) -> DType {
        match self {
            ArrayData::I8(_) => DType::I8,
            ArrayData::I16(_) => DType::I16,
            ArrayData::I32(_) => DType::I32,
            ArrayData::I64(_) => DType::I64,
            ArrayData::U8(_) => DType::U8,
            ArrayData::U16(_) => DType::U16,
            ArrayData::U32(_) => DType::U32,
            ArrayData::U64(_) => DType::U64,
            ArrayData::F32(_) => DType::F32,
            ArrayData::F64(_) => DType::F64,
            ArrayData::C64(_) => DType::C64,
            ArrayData::C128(_) => DType::C128,
        }
    }
}

// =============================================================================
// Array
// =============================================================================

/// A typed, shaped array of scalar values.
///
/// Constructors produce a 1-D array; use [`Array::with_shape`] to attach a
/// multi-dimensional shape (the element count must match exactly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Array {
    shape: Vec<u64>,
    data: ArrayData,
}

impl Array {
    fn new_1d(data: ArrayData) -> Self {
        Self {
            shape: vec![data.len() as u64],
            data,
        }
    }

    pub fn from_i8(data: impl Into<Vec<i8>>) -> Self {
        Self::new_1d(ArrayData::I8(data.into()))
    }

    pub fn from_i16(data: impl Into<Vec<i16>>) -> Self {
        Self::new_1d(ArrayData::I16(data.into()))
    }

    pub fn from_i32(data: impl Into<Vec<i32>>) -> Self {
        Self::new_1d(ArrayData::I32(data.into()))
    }

    pub fn from_i64(data: impl Into<Vec<i64>>) -> Self {
        Self::new_1d(ArrayData::I64(data.into()))
    }

    pub fn from_u8(data: impl Into<Vec<u8>>) -> Self {
        Self::new_1d(ArrayData::U8(data.into()))
    }

    pub fn from_u16(data: impl Into<Vec<u16>>) -> Self {
        Self::new_1d(ArrayData::U16(data.into()))
    }

    pub fn from_u32(data: impl Into<Vec<u32>>) -> Self {
        Self::new_1d(ArrayData::U32(data.into()))
    }

    pub fn from_u64(data: impl Into<Vec<u64>>) -> Self {
        Self::new_1d(ArrayData::U64(data.into()))
    }

    pub fn from_f32(data: impl Into<Vec<f32>>) -> Self {
        Self::new_1d(ArrayData::F32(data.into()))
    }

    pub fn from_f64(data: impl Into<Vec<f64>>) -> Self {
        Self::new_1d(ArrayData::F64(data.into()))
    }

    pub fn from_c64(data: impl Into<Vec<Complex<f32>>>) -> Self {
        Self::new_1d(ArrayData::C64(data.into()))
    }

    pub fn from_c128(data: impl Into<Vec<Complex<f64>>>) -> Self {
        Self::new_1d(ArrayData::C128(data.into()))
    }

    /// Attach a multi-dimensional shape.
    ///
    /// Fails with [`StoreError::ShapeMismatch`] if the shape's element
    /// count differs from the data length; no implicit reshaping.
    pub fn with_shape(mut self, shape: impl Into<Vec<u64>>) -> Result<Self> {
        let shape = shape.into();
        // Checked product so an adversarial shape cannot wrap around to a
        // matching element count.
        let expected = shape
            .iter()
            .try_fold(1u64, |count, &dim| count.checked_mul(dim));
        if expected != Some(self.data.len() as u64) {
            return Err(StoreError::ShapeMismatch {
                expected: expected.unwrap_or(u64::MAX),
                actual: self.data.len(),
            });
        }
        self.shape = shape;
        Ok(self)
    }

    /// Element dtype
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Array shape (length per dimension)
    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw element storage
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    // -------------------------------------------------------------------------
    // Typed accessors (None on dtype mismatch)
    // -------------------------------------------------------------------------

    pub fn as_i8(&self) -> Option<&[i8]> {
        match &self.data {
            ArrayData::I8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<&[i16]> {
        match &self.data {
            ArrayData::I16(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match &self.data {
            ArrayData::I32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match &self.data {
            ArrayData::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            ArrayData::U8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.data {
            ArrayData::U16(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<&[u32]> {
        match &self.data {
            ArrayData::U32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<&[u64]> {
        match &self.data {
            ArrayData::U64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            ArrayData::F32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.data {
            ArrayData::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_c64(&self) -> Option<&[Complex<f32>]> {
        match &self.data {
            ArrayData::C64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_c128(&self) -> Option<&[Complex<f64>]> {
        match &self.data {
            ArrayData::C128(v) => Some(v),
            _ => None,
        }
    }
}
