//! Dataset abstractions consumed by the binary encoding filter.
//!
//! This module provides the minimal record container the filter reads from and
//! writes to: attribute metadata, a [`Header`] describing the column layout, and
//! the [`Record`] capability implemented by dense and sparse instances.
//!
//! # Core Concepts
//!
//! - **Attribute**: A named column, either nominal (an ordered list of labels, where
//!   the label's position is its category code) or numeric.
//! - **Header**: The ordered attributes of a relation plus the optional class
//!   (target) attribute index.
//! - **Record**: A weighted vector of `f64` values aligned to a header. Nominal
//!   values are stored as category codes; missing values are [`MISSING_VALUE`].
//! - **Instances**: A header together with the records of one batch.
//!
//! # Example
//!
//! ```rust
//! use nominal_binary::dataset::{Attribute, DenseInstance, Header, Instances, Record};
//!
//! let header = Header::new(
//!     "weather",
//!     vec![
//!         Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]),
//!         Attribute::numeric("temperature"),
//!     ],
//! )
//! .with_class_index(1)
//! .unwrap();
//!
//! let mut data = Instances::empty(header);
//! data.push(DenseInstance::new(1.0, vec![2.0, 18.5])).unwrap();
//! assert_eq!(data.len(), 1);
//! assert_eq!(data.records()[0].value(1), 18.5);
//! ```

mod attribute;
mod header;
mod instance;
pub mod memory;

pub use self::attribute::{Attribute, AttributeKind};
pub use self::header::Header;
pub use self::instance::{
    is_missing, DenseInstance, Instance, Record, Representation, SparseInstance, MISSING_VALUE,
};
pub use self::memory::Instances;

/// Errors raised when a header or record violates the dataset shape contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// The class index points past the last attribute.
    #[error("class index {index} out of range for {num_attributes} attributes")]
    ClassIndexOutOfRange {
        index: usize,
        num_attributes: usize,
    },

    /// A record does not have one value per header attribute.
    #[error("attribute count mismatch: expected {expected} values, got {got}")]
    AttributeCountMismatch { expected: usize, got: usize },
}
