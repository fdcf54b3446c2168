//! The nominal-to-binary batch filter.
//!
//! The filter's behavior depends on the class attribute:
//!
//! ```text
//!                   configure(header)
//!                          |
//!         +----------------+----------------+
//!         | nominal class                   | numeric class
//!         v                                 v
//!     Streaming                         Buffering --end_of_batch--> Ready
//!  (convert on accept)               (hold records;              (convert on accept)
//!                                     rank, build, convert)
//! ```
//!
//! The output header and the category ranking live together in one
//! [`BinaryLayout`] that is installed in a single assignment.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::dataset::{Header, Instance, Record};
use crate::preprocessing::encoding::{
    check_width, convert, BinaryCoding, BinaryLayout, CategoryRanking, TargetEncoding,
};
use crate::preprocessing::error::FilterError;
use crate::preprocessing::traits::StreamFilter;
use crate::serialization::SerializableParams;

/// Configuration for NominalToBinary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NominalToBinaryConfig {
    /// If true, generated binary attributes are nominal `{false, true}` instead of numeric.
    pub binary_columns_as_categorical: bool,
}

impl NominalToBinaryConfig {
    pub fn coding(&self) -> BinaryCoding {
        BinaryCoding::from_categorical_flag(self.binary_columns_as_categorical)
    }

    /// Parse a JSON configuration; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Serializable parameters of a filter whose output header is known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NominalToBinaryParams {
    /// Configuration options.
    pub config: NominalToBinaryConfig,
    /// Input/output headers, ranking and per-column plans.
    pub layout: BinaryLayout,
}

#[derive(Clone, Debug)]
enum FilterState<R> {
    Unconfigured,
    /// Nominal class: the layout is known from the header alone.
    Streaming(BinaryLayout),
    /// Numeric class, first batch: records are held until the ranking exists.
    Buffering { input: Header, held: Vec<R> },
    /// Numeric class, ranking installed.
    Ready(BinaryLayout),
}

/// Converts nominal attributes into binary attributes.
///
/// With a nominal class, an attribute with `k > 2` labels becomes `k` one-hot
/// columns and records are converted as they arrive. With a numeric class, the
/// labels are ranked by mean class value over the first batch and the attribute
/// becomes `k - 1` cumulative split columns; records are held until
/// [`end_of_batch`](StreamFilter::end_of_batch).
///
/// # Example
/// ```ignore
/// use nominal_binary::preprocessing::{NominalToBinary, StreamFilter};
///
/// let mut filter = NominalToBinary::new().with_binary_columns_as_categorical(false);
/// filter.configure(header)?;
/// for record in records {
///     filter.accept(record)?;
/// }
/// filter.end_of_batch()?;
/// let encoded: Vec<_> = filter.drain_output().collect();
/// ```
#[derive(Clone, Debug)]
pub struct NominalToBinary<R: Record = Instance> {
    config: NominalToBinaryConfig,
    state: FilterState<R>,
    queue: VecDeque<R>,
    new_batch: bool,
}

impl<R: Record> Default for NominalToBinary<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> NominalToBinary<R> {
    /// Create a new filter with default configuration.
    pub fn new() -> Self {
        Self::with_config(NominalToBinaryConfig::default())
    }

    pub fn with_config(config: NominalToBinaryConfig) -> Self {
        Self {
            config,
            state: FilterState::Unconfigured,
            queue: VecDeque::new(),
            new_batch: true,
        }
    }

    /// Set whether generated binary attributes are nominal.
    pub fn with_binary_columns_as_categorical(mut self, flag: bool) -> Self {
        self.config.binary_columns_as_categorical = flag;
        self
    }

    pub fn config(&self) -> &NominalToBinaryConfig {
        &self.config
    }

    pub fn binary_columns_as_categorical(&self) -> bool {
        self.config.binary_columns_as_categorical
    }

    /// Change the coding convention.
    ///
    /// A configured filter is configured again with its current input header,
    /// which discards the ranking and any held or pending records.
    pub fn set_binary_columns_as_categorical(&mut self, flag: bool) -> Result<(), FilterError> {
        self.config.binary_columns_as_categorical = flag;
        if let Some(input) = self.input_header().cloned() {
            self.configure(input)?;
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self.state, FilterState::Unconfigured)
    }

    pub fn input_header(&self) -> Option<&Header> {
        match &self.state {
            FilterState::Unconfigured => None,
            FilterState::Buffering { input, .. } => Some(input),
            FilterState::Streaming(layout) | FilterState::Ready(layout) => Some(layout.input()),
        }
    }

    /// Installed layout; `None` while unconfigured or buffering.
    pub fn layout(&self) -> Option<&BinaryLayout> {
        match &self.state {
            FilterState::Streaming(layout) | FilterState::Ready(layout) => Some(layout),
            FilterState::Unconfigured | FilterState::Buffering { .. } => None,
        }
    }

    /// Category ranking of the installed layout (numeric class only).
    pub fn ranking(&self) -> Option<&CategoryRanking> {
        self.layout().and_then(BinaryLayout::ranking)
    }

    /// Number of records held back for the current batch.
    pub fn num_buffered(&self) -> usize {
        match &self.state {
            FilterState::Buffering { held, .. } => held.len(),
            _ => 0,
        }
    }

    /// Take all pending filtered records, oldest first.
    pub fn drain_output(&mut self) -> std::collections::vec_deque::Drain<'_, R> {
        self.queue.drain(..)
    }

    /// Extract the fitted parameters, once the output header is known.
    pub fn extract_params(&self) -> Option<NominalToBinaryParams> {
        self.layout().map(|layout| NominalToBinaryParams {
            config: self.config.clone(),
            layout: layout.clone(),
        })
    }

    /// Rebuild a filter that converts records immediately with `params`.
    ///
    /// # Errors
    /// Returns [`FilterError::Serialization`] if the stored layout is not the one
    /// its own input header, ranking and coding produce.
    pub fn from_params(params: NominalToBinaryParams) -> Result<Self, FilterError> {
        let layout = &params.layout;
        let rebuilt =
            BinaryLayout::build(layout.input(), layout.encoding().clone(), layout.coding())
                .map_err(|err| {
                    FilterError::Serialization(format!("invalid stored layout: {err}"))
                })?;
        if rebuilt != *layout {
            return Err(FilterError::Serialization(
                "stored layout does not match its input header".to_string(),
            ));
        }
        debug!(
            inputs = layout.input().num_attributes(),
            outputs = layout.output().num_attributes(),
            "restoring filter from parameters"
        );

        let mut filter = Self::with_config(params.config);
        filter.state = if params.layout.ranking().is_some() {
            FilterState::Ready(params.layout)
        } else {
            FilterState::Streaming(params.layout)
        };
        Ok(filter)
    }

    /// Save the fitted parameters to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FilterError> {
        let params = self
            .extract_params()
            .ok_or(FilterError::OutputFormatPending)?;
        let bytes = params.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a filter saved with [`save_to_file`](Self::save_to_file).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let bytes = std::fs::read(path)?;
        let params = NominalToBinaryParams::from_bytes(&bytes)?;
        Self::from_params(params)
    }

    /// Reset the output queue on the first record of a new batch.
    fn begin_batch(&mut self) {
        if !self.new_batch {
            return;
        }
        if !self.queue.is_empty() {
            warn!(
                discarded = self.queue.len(),
                "new batch started before output was collected"
            );
        }
        self.queue.clear();
        self.new_batch = false;
    }
}

/// Rank, build and convert a held batch without touching the filter's state.
fn finish_buffered<R: Record>(
    input: &Header,
    held: &[R],
    coding: BinaryCoding,
) -> Result<(BinaryLayout, Vec<R>), FilterError> {
    let ranking = CategoryRanking::compute(input, held)?;
    let layout = BinaryLayout::build(input, TargetEncoding::Continuous(ranking), coding)?;
    let converted = held
        .iter()
        .map(|record| convert(record, &layout))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((layout, converted))
}

impl<R: Record> StreamFilter<R> for NominalToBinary<R> {
    fn configure(&mut self, header: Header) -> Result<bool, FilterError> {
        let class_attr = header
            .class_attribute()
            .ok_or(FilterError::NoClassAttribute)?;

        if class_attr.is_nominal() {
            let layout =
                BinaryLayout::build(&header, TargetEncoding::Categorical, self.config.coding())?;
            debug!(
                relation = header.relation_name(),
                inputs = header.num_attributes(),
                outputs = layout.output().num_attributes(),
                "configured for nominal class"
            );
            self.state = FilterState::Streaming(layout);
        } else {
            debug!(
                relation = header.relation_name(),
                inputs = header.num_attributes(),
                "configured for numeric class, buffering first batch"
            );
            self.state = FilterState::Buffering {
                input: header,
                held: Vec::new(),
            };
        }

        self.queue.clear();
        self.new_batch = true;
        Ok(matches!(self.state, FilterState::Streaming(_)))
    }

    fn accept(&mut self, record: R) -> Result<bool, FilterError> {
        if !self.is_configured() {
            return Err(FilterError::NotConfigured);
        }
        self.begin_batch();

        match &mut self.state {
            FilterState::Unconfigured => Err(FilterError::NotConfigured),
            FilterState::Buffering { input, held } => {
                check_width(input, &record)?;
                held.push(record);
                trace!(held = held.len(), "record buffered");
                Ok(false)
            }
            FilterState::Streaming(layout) | FilterState::Ready(layout) => {
                let converted = convert(&record, layout)?;
                self.queue.push_back(converted);
                trace!(pending = self.queue.len(), "record converted");
                Ok(true)
            }
        }
    }

    fn end_of_batch(&mut self) -> Result<bool, FilterError> {
        let coding = self.config.coding();
        let finished = match &mut self.state {
            FilterState::Unconfigured => return Err(FilterError::NotConfigured),
            FilterState::Buffering { input, held } => {
                let held = std::mem::take(held);
                debug!(records = held.len(), "ranking categories over buffered batch");
                match finish_buffered(input, &held, coding) {
                    Ok(finished) => Some(finished),
                    Err(err) => {
                        warn!(error = %err, discarded = held.len(), "buffered batch rejected");
                        self.new_batch = true;
                        return Err(err);
                    }
                }
            }
            FilterState::Streaming(_) | FilterState::Ready(_) => None,
        };

        if let Some((layout, converted)) = finished {
            info!(
                relation = layout.output().relation_name(),
                outputs = layout.output().num_attributes(),
                records = converted.len(),
                "category ranking installed"
            );
            self.state = FilterState::Ready(layout);
            self.queue.extend(converted);
        }

        self.new_batch = true;
        Ok(!self.queue.is_empty())
    }

    fn output(&mut self) -> Option<R> {
        self.queue.pop_front()
    }

    fn num_pending_output(&self) -> usize {
        self.queue.len()
    }

    fn output_header(&self) -> Option<&Header> {
        self.layout().map(BinaryLayout::output)
    }
}
