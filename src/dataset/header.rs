//! Relation header: ordered attributes plus the class attribute.

use serde::{Deserialize, Serialize};

use super::{Attribute, DatasetError};

/// Column layout of a relation.
///
/// The class attribute is optional at construction time; the binary encoding
/// filter refuses a header without one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    relation: String,
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
}

impl Header {
    /// Create a header with no class attribute.
    pub fn new(relation: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            relation: relation.into(),
            attributes,
            class_index: None,
        }
    }

    /// Designate the class attribute.
    ///
    /// # Errors
    /// Returns [`DatasetError::ClassIndexOutOfRange`] if `index` is not a valid
    /// attribute position.
    pub fn with_class_index(mut self, index: usize) -> Result<Self, DatasetError> {
        self.set_class_index(Some(index))?;
        Ok(self)
    }

    /// Set or clear the class attribute.
    pub fn set_class_index(&mut self, index: Option<usize>) -> Result<(), DatasetError> {
        if let Some(index) = index {
            if index >= self.attributes.len() {
                return Err(DatasetError::ClassIndexOutOfRange {
                    index,
                    num_attributes: self.attributes.len(),
                });
            }
        }
        self.class_index = index;
        Ok(())
    }

    pub fn relation_name(&self) -> &str {
        &self.relation
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// Position of the attribute with the given name.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&Attribute> {
        self.class_index.and_then(|i| self.attributes.get(i))
    }
}
