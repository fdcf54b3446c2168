//! Property-based tests for the nominal-to-binary filter.
//!
//! Random headers mix numeric and nominal attributes of various widths, with either
//! a nominal or a numeric class; random batches include missing values.

use std::cmp::Ordering;

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use nominal_binary::dataset::{
    Attribute, DenseInstance, Header, Instance, Instances, Record, MISSING_VALUE,
};
use nominal_binary::preprocessing::{CategoryRanking, NominalToBinary, StreamFilter};

// =============================================================================
// Scenario Generators
// =============================================================================

/// A header description plus one batch of weighted rows.
///
/// `columns[j] == 0` is a numeric attribute, otherwise a nominal attribute with
/// that many labels. The class is appended after the columns.
#[derive(Clone, Debug)]
struct Scenario {
    columns: Vec<usize>,
    nominal_class: bool,
    rows: Vec<(f64, Vec<f64>)>,
}

impl Scenario {
    fn header(&self) -> Header {
        let mut attributes: Vec<Attribute> = self
            .columns
            .iter()
            .enumerate()
            .map(|(j, &k)| {
                if k == 0 {
                    Attribute::numeric(format!("a{j}"))
                } else {
                    Attribute::nominal(format!("a{j}"), (0..k).map(|c| format!("v{c}")))
                }
            })
            .collect();
        attributes.push(if self.nominal_class {
            Attribute::nominal("class", ["yes", "no"])
        } else {
            Attribute::numeric("class")
        });
        Header::new("random", attributes)
            .with_class_index(self.columns.len())
            .unwrap()
    }

    fn instances(&self) -> Instances<Instance> {
        let records = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, (weight, values))| {
                if i % 2 == 0 {
                    Instance::dense(*weight, values.clone())
                } else {
                    Instance::sparse(*weight, values)
                }
            })
            .collect();
        Instances::new(self.header(), records).unwrap()
    }

    /// Output width of input column `j`.
    fn expected_width(&self, j: usize) -> usize {
        match self.columns[j] {
            k if k <= 2 => 1,
            k if self.nominal_class => k,
            k => k - 1,
        }
    }
}

fn arb_cell(num_labels: usize) -> BoxedStrategy<f64> {
    if num_labels == 0 {
        prop_oneof![9 => -10.0f64..10.0, 1 => Just(MISSING_VALUE)].boxed()
    } else {
        prop_oneof![
            9 => (0..num_labels).prop_map(|code| code as f64),
            1 => Just(MISSING_VALUE),
        ]
        .boxed()
    }
}

fn arb_row(columns: &[usize], nominal_class: bool) -> Vec<BoxedStrategy<f64>> {
    let mut cells: Vec<BoxedStrategy<f64>> = columns.iter().map(|&k| arb_cell(k)).collect();
    cells.push(if nominal_class {
        arb_cell(2)
    } else {
        prop_oneof![9 => -100.0f64..100.0, 1 => Just(MISSING_VALUE)].boxed()
    });
    cells
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (prop_vec(0usize..6, 1..5), any::<bool>()).prop_flat_map(|(columns, nominal_class)| {
        let rows = prop_vec((0.5f64..3.0, arb_row(&columns, nominal_class)), 1..30);
        rows.prop_map(move |rows| Scenario {
            columns: columns.clone(),
            nominal_class,
            rows,
        })
    })
}

fn filter(scenario: &Scenario) -> Instances<Instance> {
    let mut filter = NominalToBinary::new();
    filter.filter_instances(&scenario.instances()).unwrap()
}

/// Bit patterns, so that missing values compare equal.
fn bits(record: &Instance) -> Vec<u64> {
    record.to_values().iter().map(|v| v.to_bits()).collect()
}

fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn output_width_matches_column_plans(scenario in arb_scenario()) {
        let out = filter(&scenario);
        let expected: usize = (0..scenario.columns.len())
            .map(|j| scenario.expected_width(j))
            .sum::<usize>()
            + 1;

        prop_assert_eq!(out.header().num_attributes(), expected);
        prop_assert_eq!(out.header().class_index(), Some(expected - 1));
        for record in out.records() {
            prop_assert_eq!(record.num_attributes(), expected);
        }
    }

    #[test]
    fn records_keep_weight_and_order(scenario in arb_scenario()) {
        let out = filter(&scenario);
        prop_assert_eq!(out.len(), scenario.rows.len());
        for ((weight, values), record) in scenario.rows.iter().zip(out.records()) {
            prop_assert_eq!(record.weight(), *weight);
            let class = values[scenario.columns.len()];
            let out_class = record.value(record.num_attributes() - 1);
            prop_assert!(same_value(class, out_class));
        }
    }

    #[test]
    fn expanded_blocks_are_well_formed(scenario in arb_scenario()) {
        let out = filter(&scenario);
        for ((_, values), record) in scenario.rows.iter().zip(out.records()) {
            let mut offset = 0;
            for (j, &k) in scenario.columns.iter().enumerate() {
                let width = scenario.expected_width(j);
                let block: Vec<f64> = (offset..offset + width).map(|i| record.value(i)).collect();
                offset += width;
                if k <= 2 {
                    prop_assert!(same_value(block[0], values[j]));
                    continue;
                }

                if values[j].is_nan() {
                    prop_assert!(block.iter().all(|v| v.is_nan()));
                } else if scenario.nominal_class {
                    let ones: Vec<usize> = (0..width).filter(|&i| block[i] == 1.0).collect();
                    prop_assert_eq!(ones, vec![values[j] as usize]);
                    prop_assert!(block.iter().all(|&v| v == 0.0 || v == 1.0));
                } else {
                    prop_assert!(block.iter().all(|&v| v == 0.0 || v == 1.0));
                    prop_assert!(block.windows(2).all(|pair| pair[0] >= pair[1]));
                }
            }
        }
    }

    #[test]
    fn filtering_is_deterministic(scenario in arb_scenario()) {
        let first = filter(&scenario);
        let second = filter(&scenario);
        prop_assert_eq!(first.header(), second.header());
        for (a, b) in first.records().iter().zip(second.records()) {
            prop_assert_eq!(bits(a), bits(b));
            prop_assert_eq!(a.representation(), b.representation());
        }
    }

    #[test]
    fn later_batches_reuse_the_first_layout(scenario in arb_scenario()) {
        let data = scenario.instances();
        let mut filter = NominalToBinary::new();
        let first = filter.filter_instances(&data).unwrap();
        let again = filter.filter_batch(data.records()).unwrap();

        prop_assert_eq!(filter.output_header(), Some(first.header()));
        for (a, b) in first.records().iter().zip(&again) {
            prop_assert_eq!(bits(a), bits(b));
        }
    }

    #[test]
    fn ranking_orders_by_mean(scenario in arb_scenario()) {
        prop_assume!(!scenario.nominal_class);
        let header = scenario.header();
        let records: Vec<DenseInstance> = scenario
            .rows
            .iter()
            .map(|(weight, values)| DenseInstance::new(*weight, values.clone()))
            .collect();
        let ranking = CategoryRanking::compute(&header, &records).unwrap();

        for (j, &k) in scenario.columns.iter().enumerate() {
            if k == 0 {
                prop_assert!(ranking.order(j).is_none());
                continue;
            }
            let order = ranking.order(j).unwrap();
            let means = ranking.means(j).unwrap();
            let mut sorted = order.to_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..k).collect::<Vec<_>>());
            for pair in order.windows(2) {
                match means[pair[0]].total_cmp(&means[pair[1]]) {
                    Ordering::Less => {}
                    Ordering::Equal => prop_assert!(pair[0] < pair[1]),
                    Ordering::Greater => prop_assert!(false, "order not sorted by mean"),
                }
            }
        }
    }
}
