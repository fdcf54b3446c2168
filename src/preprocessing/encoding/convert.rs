//! Record conversion against a [`BinaryLayout`].

use crate::dataset::{Record, MISSING_VALUE};
use crate::preprocessing::encoding::{category_code, check_width, BinaryLayout, ColumnPlan};
use crate::preprocessing::error::FilterError;

/// Rewrite `record` into the output layout.
///
/// The result keeps the record's weight and representation. A missing nominal
/// value becomes missing in every column it expands to.
///
/// # Errors
/// - [`FilterError::Dataset`] if the record's width differs from the input header.
/// - [`FilterError::InvalidCategory`] if a nominal column holds an invalid code.
/// - [`FilterError::SchemaRankingMismatch`] if a category is absent from the ranking.
pub fn convert<R: Record>(record: &R, layout: &BinaryLayout) -> Result<R, FilterError> {
    check_width(layout.input(), record)?;

    let mut values = Vec::with_capacity(layout.output().num_attributes());
    for (j, plan) in layout.plans().iter().enumerate() {
        let value = record.value(j);
        match plan {
            ColumnPlan::Copy => values.push(value),
            ColumnPlan::Collapsed { num_values } => {
                if !record.is_missing(j) {
                    category_code(j, value, *num_values)?;
                }
                values.push(value);
            }
            ColumnPlan::OneHot { width } => {
                if record.is_missing(j) {
                    values.extend(std::iter::repeat(MISSING_VALUE).take(*width));
                } else {
                    let code = category_code(j, value, *width)?;
                    values.extend((0..*width).map(|slot| if slot == code { 1.0 } else { 0.0 }));
                }
            }
            ColumnPlan::Cumulative { order } => {
                let width = plan.width();
                if record.is_missing(j) {
                    values.extend(std::iter::repeat(MISSING_VALUE).take(width));
                } else {
                    let code = category_code(j, value, order.len())?;
                    let rank = order
                        .iter()
                        .position(|&c| c == code)
                        .ok_or(FilterError::SchemaRankingMismatch { column: j, code })?;
                    values.extend((0..width).map(|slot| if slot < rank { 1.0 } else { 0.0 }));
                }
            }
        }
    }

    Ok(record.like_this(record.weight(), values))
}
