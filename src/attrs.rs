//! Attribute Maps
//!
//! An attribute map is an unordered string-keyed metadata dictionary
//! attachable to either a frame group or an individual dataset. Two maps on
//! different nodes are fully independent; keys within one map are unique.

use std::collections::BTreeMap;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::array::Array;

/// A single attribute value: a scalar or a small array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    Complex(Complex<f64>),
    Str(String),
    Array(Array),
}

/// Attribute map attached to a group or a dataset.
///
/// BTreeMap keeps serialization deterministic.
pub type AttrMap = BTreeMap<String, AttrValue>;

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::I64(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::F64(v)
    }
}

impl From<Complex<f64>> for AttrValue {
    fn from(v: Complex<f64>) -> Self {
        AttrValue::Complex(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<Array> for AttrValue {
    fn from(v: Array) -> Self {
        AttrValue::Array(v)
    }
}
