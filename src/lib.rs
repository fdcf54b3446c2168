//! # nominal-binary
//!
//! Converts nominal (categorical) attributes of a dataset into binary attributes
//! so that numeric learners can consume them.
//!
//! ## Core Design Principles
//!
//! - **Class-driven encoding**: With a nominal class, wide nominal attributes become
//!   one-hot indicator columns. With a numeric class, their labels are ranked by mean
//!   class value and encoded as cumulative split columns.
//! - **Batch protocol**: Filters are configured with a header, fed records and told
//!   when a batch ends. Statistics gathered on the first batch are reused for later ones.
//! - **Representation preserving**: Dense records stay dense, sparse stay sparse,
//!   weights are carried over.
//! - **Serializable**: The fitted layout can be saved and loaded.
//!
//! ## Quick Start
//!
//! ```rust
//! use nominal_binary::dataset::{Attribute, Header, Instance, Instances, Record};
//! use nominal_binary::preprocessing::{NominalToBinary, StreamFilter};
//!
//! let header = Header::new(
//!     "paint",
//!     vec![
//!         Attribute::nominal("color", ["red", "green", "blue"]),
//!         Attribute::numeric("price"),
//!     ],
//! )
//! .with_class_index(1)
//! .unwrap();
//!
//! let data = Instances::new(
//!     header,
//!     vec![
//!         Instance::dense(1.0, vec![0.0, 1.0]),
//!         Instance::dense(1.0, vec![1.0, 5.0]),
//!         Instance::dense(1.0, vec![2.0, 3.0]),
//!     ],
//! )
//! .unwrap();
//!
//! let mut filter = NominalToBinary::new();
//! let encoded = filter.filter_instances(&data).unwrap();
//!
//! assert_eq!(encoded.header().attribute(0).unwrap().name(), "color=blue,green");
//! assert_eq!(encoded.records()[1].to_values(), vec![1.0, 1.0, 5.0]);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: Attributes, headers and dense/sparse records
//! - `preprocessing`: The [`StreamFilter`] protocol and the nominal-to-binary filter
//! - `serialization`: Persistence of fitted parameters

pub mod dataset;
pub mod preprocessing;
pub mod serialization;

pub use dataset::{Attribute, Header, Instance, Instances, Record};
pub use preprocessing::{FilterError, NominalToBinary, NominalToBinaryConfig, StreamFilter};
pub use serialization::SerializableParams;
