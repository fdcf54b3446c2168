//! Core trait for batch-aware streaming filters.
//!
//! A [`StreamFilter`] is driven in three steps per batch:
//! 1. [`configure`](StreamFilter::configure) with the input header,
//! 2. [`accept`](StreamFilter::accept) every record of the batch,
//! 3. [`end_of_batch`](StreamFilter::end_of_batch), then collect with
//!    [`output`](StreamFilter::output).
//!
//! Filters that need to see the whole batch before producing anything hold the
//! records back until step 3; others emit as records arrive.

use crate::dataset::{Header, Instances, Record};
use crate::preprocessing::error::FilterError;

/// Trait for filters that rewrite records one batch at a time.
///
/// # Type Parameters
/// - `R`: The record type flowing through the filter.
///
/// # Example
/// ```ignore
/// use nominal_binary::preprocessing::{NominalToBinary, StreamFilter};
///
/// let mut filter = NominalToBinary::new();
/// let train_out = filter.filter_instances(&train)?;
/// // Later batches reuse the statistics gathered on `train`.
/// let test_out = filter.filter_batch(test.records())?;
/// ```
pub trait StreamFilter<R: Record> {
    /// Set the input header, discarding any state from a previous configuration.
    ///
    /// Returns `true` if the output header is known immediately.
    ///
    /// # Errors
    /// Returns [`FilterError`] if the header is unsuitable for the filter.
    fn configure(&mut self, header: Header) -> Result<bool, FilterError>;

    /// Feed one record.
    ///
    /// Returns `true` if filtered output can be collected now.
    fn accept(&mut self, record: R) -> Result<bool, FilterError>;

    /// Signal that the current batch is complete.
    ///
    /// Returns `true` if filtered records are pending collection.
    fn end_of_batch(&mut self) -> Result<bool, FilterError>;

    /// Take the oldest pending filtered record.
    fn output(&mut self) -> Option<R>;

    /// Number of filtered records waiting to be collected.
    fn num_pending_output(&self) -> usize;

    /// Output header, once known.
    fn output_header(&self) -> Option<&Header>;

    /// Run one more batch through an already configured filter.
    fn filter_batch(&mut self, records: &[R]) -> Result<Vec<R>, FilterError> {
        for record in records {
            self.accept(record.clone())?;
        }
        self.end_of_batch()?;
        let mut filtered = Vec::with_capacity(self.num_pending_output());
        while let Some(record) = self.output() {
            filtered.push(record);
        }
        Ok(filtered)
    }

    /// Configure on `data`'s header and filter all of its records as one batch.
    fn filter_instances(&mut self, data: &Instances<R>) -> Result<Instances<R>, FilterError> {
        self.configure(data.header().clone())?;
        let records = self.filter_batch(data.records())?;
        let header = self
            .output_header()
            .cloned()
            .ok_or(FilterError::OutputFormatPending)?;
        Ok(Instances::new(header, records)?)
    }
}
