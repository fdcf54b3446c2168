//! Weighted records in dense and sparse representation.

use super::DatasetError;

/// Sentinel stored in a value slot that has no value.
pub const MISSING_VALUE: f64 = f64::NAN;

/// Whether a stored value is the missing sentinel.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Storage layout of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Representation {
    Dense,
    Sparse,
}

/// Capability the filter needs from a record.
///
/// Values are read by attribute position; nominal values are category codes.
/// `like_this` builds a new record with the same representation, which is how the
/// converter preserves dense/sparse storage without inspecting concrete types.
pub trait Record: Clone {
    /// Instance weight.
    fn weight(&self) -> f64;

    /// Number of attribute positions the record spans.
    fn num_attributes(&self) -> usize;

    /// Value at the given attribute position.
    ///
    /// # Panics
    /// Dense records panic when `index >= num_attributes()`.
    fn value(&self, index: usize) -> f64;

    fn is_missing(&self, index: usize) -> bool {
        is_missing(self.value(index))
    }

    fn representation(&self) -> Representation;

    /// Build a record of the same representation from a full value vector.
    fn like_this(&self, weight: f64, values: Vec<f64>) -> Self;

    /// All values, one per attribute position.
    fn to_values(&self) -> Vec<f64> {
        (0..self.num_attributes()).map(|i| self.value(i)).collect()
    }
}

/// Record storing every attribute position.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseInstance {
    weight: f64,
    values: Vec<f64>,
}

impl DenseInstance {
    pub fn new(weight: f64, values: Vec<f64>) -> Self {
        Self { weight, values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Record for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn num_attributes(&self) -> usize {
        self.values.len()
    }

    fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    fn representation(&self) -> Representation {
        Representation::Dense
    }

    fn like_this(&self, weight: f64, values: Vec<f64>) -> Self {
        DenseInstance::new(weight, values)
    }

    fn to_values(&self) -> Vec<f64> {
        self.values.clone()
    }
}

/// Record storing only non-zero positions.
///
/// Positions that are not stored read as `0.0`. Missing values are stored
/// explicitly, since the sentinel is not zero.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseInstance {
    weight: f64,
    num_attributes: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseInstance {
    /// Build from a full value vector, dropping zeros.
    pub fn from_dense(weight: f64, dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();
        Self {
            weight,
            num_attributes: dense.len(),
            indices,
            values,
        }
    }

    /// Build from `(position, value)` pairs. Later pairs win on duplicate positions.
    ///
    /// # Errors
    /// Returns [`DatasetError::AttributeCountMismatch`] if a position is outside
    /// `0..num_attributes`.
    pub fn from_pairs(
        weight: f64,
        num_attributes: usize,
        pairs: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<Self, DatasetError> {
        let mut dense = vec![0.0; num_attributes];
        for (index, value) in pairs {
            if index >= num_attributes {
                return Err(DatasetError::AttributeCountMismatch {
                    expected: num_attributes,
                    got: index + 1,
                });
            }
            dense[index] = value;
        }
        Ok(Self::from_dense(weight, &dense))
    }

    /// Number of explicitly stored positions.
    pub fn num_stored(&self) -> usize {
        self.indices.len()
    }

    /// Stored positions, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl Record for SparseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn num_attributes(&self) -> usize {
        self.num_attributes
    }

    fn value(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    fn representation(&self) -> Representation {
        Representation::Sparse
    }

    fn like_this(&self, weight: f64, values: Vec<f64>) -> Self {
        SparseInstance::from_dense(weight, &values)
    }
}

/// A record in either representation, for streams that mix both.
#[derive(Clone, Debug, PartialEq)]
pub enum Instance {
    Dense(DenseInstance),
    Sparse(SparseInstance),
}

impl Instance {
    pub fn dense(weight: f64, values: Vec<f64>) -> Self {
        Instance::Dense(DenseInstance::new(weight, values))
    }

    pub fn sparse(weight: f64, values: &[f64]) -> Self {
        Instance::Sparse(SparseInstance::from_dense(weight, values))
    }
}

impl From<DenseInstance> for Instance {
    fn from(inst: DenseInstance) -> Self {
        Instance::Dense(inst)
    }
}

impl From<SparseInstance> for Instance {
    fn from(inst: SparseInstance) -> Self {
        Instance::Sparse(inst)
    }
}

impl Record for Instance {
    fn weight(&self) -> f64 {
        match self {
            Instance::Dense(inst) => inst.weight(),
            Instance::Sparse(inst) => inst.weight(),
        }
    }

    fn num_attributes(&self) -> usize {
        match self {
            Instance::Dense(inst) => inst.num_attributes(),
            Instance::Sparse(inst) => inst.num_attributes(),
        }
    }

    fn value(&self, index: usize) -> f64 {
        match self {
            Instance::Dense(inst) => inst.value(index),
            Instance::Sparse(inst) => inst.value(index),
        }
    }

    fn representation(&self) -> Representation {
        match self {
            Instance::Dense(_) => Representation::Dense,
            Instance::Sparse(_) => Representation::Sparse,
        }
    }

    fn like_this(&self, weight: f64, values: Vec<f64>) -> Self {
        match self {
            Instance::Dense(inst) => Instance::Dense(inst.like_this(weight, values)),
            Instance::Sparse(inst) => Instance::Sparse(inst.like_this(weight, values)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_instance_values() {
        let inst = DenseInstance::new(2.0, vec![1.0, MISSING_VALUE, 0.0]);
        assert_eq!(inst.weight(), 2.0);
        assert_eq!(inst.num_attributes(), 3);
        assert_eq!(inst.value(0), 1.0);
        assert!(inst.is_missing(1));
        assert!(!inst.is_missing(2));
        assert_eq!(inst.representation(), Representation::Dense);
    }

    #[test]
    fn test_sparse_instance_drops_zeros() {
        let inst = SparseInstance::from_dense(1.0, &[0.0, 3.0, 0.0, MISSING_VALUE]);
        assert_eq!(inst.num_attributes(), 4);
        assert_eq!(inst.num_stored(), 2);
        assert_eq!(inst.indices(), &[1, 3]);
        assert_eq!(inst.value(0), 0.0);
        assert_eq!(inst.value(1), 3.0);
        assert!(inst.is_missing(3));
        assert_eq!(inst.representation(), Representation::Sparse);
    }

    #[test]
    fn test_sparse_from_pairs() {
        let inst = SparseInstance::from_pairs(1.0, 5, vec![(4, 2.0), (1, 1.0), (4, 7.0)]).unwrap();
        assert_eq!(inst.to_values(), vec![0.0, 1.0, 0.0, 0.0, 7.0]);
    }

    #[test]
    fn test_sparse_from_pairs_out_of_range() {
        let result = SparseInstance::from_pairs(1.0, 2, vec![(2, 1.0)]);
        assert!(matches!(
            result,
            Err(DatasetError::AttributeCountMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_like_this_preserves_representation() {
        let dense = Instance::dense(1.0, vec![1.0, 2.0]);
        let sparse = Instance::sparse(0.5, &[0.0, 2.0]);

        let new_dense = dense.like_this(3.0, vec![0.0, 0.0, 1.0]);
        let new_sparse = sparse.like_this(0.5, vec![0.0, 0.0, 1.0]);

        assert_eq!(new_dense.representation(), Representation::Dense);
        assert_eq!(new_dense.weight(), 3.0);
        assert_eq!(new_sparse.representation(), Representation::Sparse);
        assert_eq!(new_sparse.to_values(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_is_missing_sentinel() {
        assert!(is_missing(MISSING_VALUE));
        assert!(!is_missing(0.0));
    }
}
