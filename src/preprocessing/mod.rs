//! Record filters that rewrite a dataset's attributes.
//!
//! # Core Traits
//!
//! - [`StreamFilter`]: configure with a header, feed records batch by batch,
//!   collect the filtered records.
//!
//! # Available Filters
//!
//! ## Encoding
//! - [`NominalToBinary`]: Replace nominal attributes by binary indicator or split columns
//!
//! # Example
//!
//! ```ignore
//! use nominal_binary::preprocessing::{NominalToBinary, StreamFilter};
//!
//! let mut filter = NominalToBinary::new();
//! let encoded_train = filter.filter_instances(&train)?;
//!
//! // Save the fitted layout for later use
//! filter.save_to_file("nominal_to_binary.bin")?;
//!
//! // Later, load and encode new data with the same layout
//! let mut loaded = NominalToBinary::load_from_file("nominal_to_binary.bin")?;
//! let encoded_test = loaded.filter_batch(test.records())?;
//! ```

pub mod encoding;
pub mod error;
pub mod traits;

// Re-export main types
pub use encoding::{
    convert, BinaryCoding, BinaryLayout, CategoryRanking, ColumnPlan, NominalToBinary,
    NominalToBinaryConfig, NominalToBinaryParams, RankedColumn, TargetEncoding,
};
pub use error::FilterError;
pub use traits::StreamFilter;
