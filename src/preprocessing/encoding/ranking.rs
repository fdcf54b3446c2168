//! Category ranking by average class value.
//!
//! For a numeric class, the categories of each nominal attribute are sorted by the
//! weighted mean class value observed with them. The sorted order defines the
//! split points of the cumulative encoding: output column `p` answers "is this
//! category ranked at `p` or above".
//!
//! ```text
//! color:  red -> 1.0   green -> 5.0   blue -> 3.0
//! order:  [red, blue, green]   (codes [0, 2, 1])
//! ```

use serde::{Deserialize, Serialize};

use crate::dataset::{Header, Record};
use crate::preprocessing::encoding::category_code;
use crate::preprocessing::error::FilterError;

/// Weights at or below this are treated as no observation.
const WEIGHT_EPSILON: f64 = 1e-6;

/// Ranked categories of one nominal attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedColumn {
    /// Category codes, lowest mean class value first.
    pub order: Vec<usize>,
    /// Mean class value per category code (global mean for unseen categories).
    pub means: Vec<f64>,
}

/// Per-column category orderings computed from one batch.
///
/// Only nominal attributes other than the class carry a ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRanking {
    columns: Vec<Option<RankedColumn>>,
}

impl CategoryRanking {
    /// Rank the categories of every nominal non-class attribute over `records`.
    ///
    /// Only records where both the attribute and the class are present contribute.
    /// Ties are broken by category code, so the result is reproducible.
    ///
    /// # Errors
    /// - [`FilterError::NoClassAttribute`] if the header has no class.
    /// - [`FilterError::TargetNotContinuous`] if the class is nominal.
    /// - [`FilterError::Dataset`] if a record's width differs from the header.
    /// - [`FilterError::InvalidCategory`] if a nominal value is not a valid code.
    pub fn compute<R: Record>(header: &Header, records: &[R]) -> Result<Self, FilterError> {
        let class_index = header.class_index().ok_or(FilterError::NoClassAttribute)?;
        let class_attr = header
            .class_attribute()
            .ok_or(FilterError::NoClassAttribute)?;
        if class_attr.is_nominal() {
            return Err(FilterError::TargetNotContinuous(class_attr.name().to_string()));
        }
        for record in records {
            super::check_width(header, record)?;
        }

        let columns = header
            .attributes()
            .iter()
            .enumerate()
            .map(|(j, att)| {
                if j == class_index || !att.is_nominal() {
                    return Ok(None);
                }
                rank_column(j, att.num_values(), class_index, records).map(Some)
            })
            .collect::<Result<Vec<_>, FilterError>>()?;

        Ok(Self { columns })
    }

    /// Category codes of `column` from lowest to highest rank.
    pub fn order(&self, column: usize) -> Option<&[usize]> {
        self.column(column).map(|c| c.order.as_slice())
    }

    /// Mean class value per category code of `column`.
    pub fn means(&self, column: usize) -> Option<&[f64]> {
        self.column(column).map(|c| c.means.as_slice())
    }

    /// Rank position of a category code.
    pub fn rank_of(&self, column: usize, code: usize) -> Option<usize> {
        self.order(column)?.iter().position(|&c| c == code)
    }

    pub fn column(&self, column: usize) -> Option<&RankedColumn> {
        self.columns.get(column).and_then(Option::as_ref)
    }

    /// Number of attribute positions covered (ranked or not).
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

fn rank_column<R: Record>(
    column: usize,
    num_values: usize,
    class_index: usize,
    records: &[R],
) -> Result<RankedColumn, FilterError> {
    let mut counts = vec![0.0; num_values];
    let mut sums = vec![0.0; num_values];

    for record in records {
        if record.is_missing(class_index) || record.is_missing(column) {
            continue;
        }
        let code = category_code(column, record.value(column), num_values)?;
        counts[code] += record.weight();
        sums[code] += record.weight() * record.value(class_index);
    }

    let total_count: f64 = counts.iter().sum();
    let total_sum: f64 = sums.iter().sum();
    let mut means = sums;
    if total_count > WEIGHT_EPSILON {
        let global_mean = total_sum / total_count;
        for (mean, &count) in means.iter_mut().zip(&counts) {
            *mean = if count > WEIGHT_EPSILON {
                *mean / count
            } else {
                global_mean
            };
        }
    }

    let mut order: Vec<usize> = (0..num_values).collect();
    // Stable sort keeps ties in code order.
    order.sort_by(|&a, &b| means[a].total_cmp(&means[b]));

    Ok(RankedColumn { order, means })
}
