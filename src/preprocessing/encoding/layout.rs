//! Output header construction.
//!
//! [`BinaryLayout::build`] maps an input header to the output header and records,
//! for every input column, how its values are rewritten ([`ColumnPlan`]). The
//! class column and numeric columns pass through; nominal columns with at most
//! two labels collapse to one column; wider nominal columns expand.

use serde::{Deserialize, Serialize};

use crate::dataset::{Attribute, DatasetError, Header};
use crate::preprocessing::encoding::{BinaryCoding, CategoryRanking, BINARY_LABELS};
use crate::preprocessing::error::FilterError;

/// What drives the expansion of wide nominal columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TargetEncoding {
    /// Nominal class: one indicator column per label.
    Categorical,
    /// Numeric class: one column per ranked split point.
    Continuous(CategoryRanking),
}

impl TargetEncoding {
    pub fn ranking(&self) -> Option<&CategoryRanking> {
        match self {
            TargetEncoding::Categorical => None,
            TargetEncoding::Continuous(ranking) => Some(ranking),
        }
    }
}

/// How one input column is written to the output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnPlan {
    /// The raw value is copied to a single output column.
    Copy,
    /// A nominal column with at most two labels; its code is checked and copied.
    Collapsed { num_values: usize },
    /// One indicator per category code.
    OneHot { width: usize },
    /// Step encoding over the ranked codes; `order.len() - 1` output columns.
    Cumulative { order: Vec<usize> },
}

impl ColumnPlan {
    /// Number of output columns produced.
    pub fn width(&self) -> usize {
        match self {
            ColumnPlan::Copy | ColumnPlan::Collapsed { .. } => 1,
            ColumnPlan::OneHot { width } => *width,
            ColumnPlan::Cumulative { order } => order.len().saturating_sub(1),
        }
    }
}

/// Output header plus the conversion plan that produces it.
///
/// Built once per batch configuration and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryLayout {
    input: Header,
    output: Header,
    encoding: TargetEncoding,
    coding: BinaryCoding,
    plans: Vec<ColumnPlan>,
}

impl BinaryLayout {
    /// Derive the output layout for `input`.
    ///
    /// # Errors
    /// - [`FilterError::NoClassAttribute`] if `input` has no class.
    /// - [`FilterError::Dataset`] if the class index lies outside `input`.
    /// - [`FilterError::TargetNotContinuous`] for a ranking with a nominal class.
    /// - [`FilterError::SchemaRankingMismatch`] if the ranking does not order every
    ///   label of an expanded column.
    pub fn build(
        input: &Header,
        encoding: TargetEncoding,
        coding: BinaryCoding,
    ) -> Result<Self, FilterError> {
        let class_index = input.class_index().ok_or(FilterError::NoClassAttribute)?;
        if class_index >= input.num_attributes() {
            return Err(DatasetError::ClassIndexOutOfRange {
                index: class_index,
                num_attributes: input.num_attributes(),
            }
            .into());
        }
        if let (TargetEncoding::Continuous(_), Some(class_attr)) =
            (&encoding, input.class_attribute())
        {
            if class_attr.is_nominal() {
                return Err(FilterError::TargetNotContinuous(
                    class_attr.name().to_string(),
                ));
            }
        }

        let mut attributes = Vec::with_capacity(input.num_attributes());
        let mut plans = Vec::with_capacity(input.num_attributes());

        for (j, att) in input.attributes().iter().enumerate() {
            if j == class_index || !att.is_nominal() {
                attributes.push(att.clone());
                plans.push(ColumnPlan::Copy);
                continue;
            }

            let k = att.num_values();
            if k <= 2 {
                attributes.push(binary_attribute(att.name().to_string(), coding));
                plans.push(ColumnPlan::Collapsed { num_values: k });
                continue;
            }

            match &encoding {
                TargetEncoding::Categorical => {
                    for code in 0..k {
                        let label = att.value(code).unwrap_or_default();
                        attributes.push(binary_attribute(
                            format!("{}={}", att.name(), label),
                            coding,
                        ));
                    }
                    plans.push(ColumnPlan::OneHot { width: k });
                }
                TargetEncoding::Continuous(ranking) => {
                    let order = ranked_order(ranking, j, k)?;
                    for p in 1..k {
                        let labels: Vec<&str> = order[p..]
                            .iter()
                            .map(|&code| att.value(code).unwrap_or_default())
                            .collect();
                        attributes.push(binary_attribute(
                            format!("{}={}", att.name(), labels.join(",")),
                            coding,
                        ));
                    }
                    plans.push(ColumnPlan::Cumulative { order });
                }
            }
        }

        // Every expanded column before the class shifts it by its extra width.
        let new_class_index = class_index
            + plans[..class_index]
                .iter()
                .map(|plan| plan.width() - 1)
                .sum::<usize>();

        let output = Header::new(input.relation_name(), attributes)
            .with_class_index(new_class_index)?;

        Ok(Self {
            input: input.clone(),
            output,
            encoding,
            coding,
            plans,
        })
    }

    pub fn input(&self) -> &Header {
        &self.input
    }

    pub fn output(&self) -> &Header {
        &self.output
    }

    pub fn encoding(&self) -> &TargetEncoding {
        &self.encoding
    }

    pub fn coding(&self) -> BinaryCoding {
        self.coding
    }

    pub fn ranking(&self) -> Option<&CategoryRanking> {
        self.encoding.ranking()
    }

    /// Conversion plan per input column.
    pub fn plans(&self) -> &[ColumnPlan] {
        &self.plans
    }
}

fn binary_attribute(name: String, coding: BinaryCoding) -> Attribute {
    match coding {
        BinaryCoding::Numeric => Attribute::numeric(name),
        BinaryCoding::Categorical => Attribute::nominal(name, BINARY_LABELS),
    }
}

/// The ranked codes of `column`, checked to be a permutation of `0..k`.
fn ranked_order(
    ranking: &CategoryRanking,
    column: usize,
    k: usize,
) -> Result<Vec<usize>, FilterError> {
    let order = ranking.order(column).unwrap_or_default();
    if let Some(code) = (0..k).find(|code| !order.contains(code)) {
        return Err(FilterError::SchemaRankingMismatch { column, code });
    }
    if order.len() != k {
        let code = order.iter().copied().find(|&c| c >= k).unwrap_or(order[k]);
        return Err(FilterError::SchemaRankingMismatch { column, code });
    }
    Ok(order.to_vec())
}
