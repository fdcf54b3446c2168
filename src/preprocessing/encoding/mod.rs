//! Binary encoding of nominal attributes.
//!
//! This module turns every nominal attribute other than the class into one or
//! more binary attributes, so that numeric learners can consume the data.
//!
//! # Encodings
//!
//! ## Nominal class: one-hot
//! An attribute with `k > 2` labels becomes `k` indicator columns.
//!
//! ```text
//! // color in {red, green, blue}, value = green
//! // color=red  color=green  color=blue
//! //     0           1            0
//! ```
//!
//! ## Numeric class: cumulative (CART-style) splits
//! Labels are ranked by mean class value ([`CategoryRanking`]); an attribute with
//! `k > 2` labels becomes `k - 1` columns, column `p` being 1 when the value's rank
//! is at least `p`.
//!
//! ```text
//! // order [red, blue, green]
//! // color=blue,green  color=green
//! // red:       0            0
//! // blue:      1            0
//! // green:     1            1
//! ```
//!
//! Attributes with at most two labels are always kept as a single column.
//!
//! # Design Notes
//!
//! [`BinaryLayout`] bundles the output header with the per-column conversion plan,
//! so the schema and the record conversion cannot disagree. The batch controller
//! [`NominalToBinary`] replaces the layout as a whole.

mod convert;
mod layout;
mod nominal_to_binary;
mod ranking;

pub use convert::convert;
pub use layout::{BinaryLayout, ColumnPlan, TargetEncoding};
pub use nominal_to_binary::{NominalToBinary, NominalToBinaryConfig, NominalToBinaryParams};
pub use ranking::{CategoryRanking, RankedColumn};

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetError, Header, Record};
use crate::preprocessing::error::FilterError;

/// How generated binary attributes are typed in the output header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryCoding {
    /// Numeric attributes holding 0 or 1.
    #[default]
    Numeric,
    /// Nominal attributes with labels `false` and `true`.
    Categorical,
}

impl BinaryCoding {
    pub fn from_categorical_flag(binary_columns_as_categorical: bool) -> Self {
        if binary_columns_as_categorical {
            BinaryCoding::Categorical
        } else {
            BinaryCoding::Numeric
        }
    }
}

/// Labels of generated nominal binary attributes, in code order.
pub const BINARY_LABELS: [&str; 2] = ["false", "true"];

/// Reject a record whose width differs from the header.
pub(crate) fn check_width<R: Record>(header: &Header, record: &R) -> Result<(), FilterError> {
    if record.num_attributes() != header.num_attributes() {
        return Err(DatasetError::AttributeCountMismatch {
            expected: header.num_attributes(),
            got: record.num_attributes(),
        }
        .into());
    }
    Ok(())
}

/// Interpret a stored nominal value as a category code in `0..num_values`.
pub(crate) fn category_code(
    column: usize,
    value: f64,
    num_values: usize,
) -> Result<usize, FilterError> {
    if value < 0.0 || value.fract() != 0.0 || value >= num_values as f64 {
        return Err(FilterError::InvalidCategory { column, value });
    }
    Ok(value as usize)
}
