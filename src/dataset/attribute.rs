//! Attribute metadata.

use serde::{Deserialize, Serialize};

/// The kind of values an attribute holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Categorical attribute; the position of a label is its category code.
    Nominal { values: Vec<String> },
    /// Continuous attribute.
    Numeric,
}

/// A named column of a relation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    /// Create a numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    /// Create a nominal attribute from its labels, in category code order.
    pub fn nominal<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal { .. })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, AttributeKind::Numeric)
    }

    /// Number of labels of a nominal attribute; zero for numeric attributes.
    pub fn num_values(&self) -> usize {
        match &self.kind {
            AttributeKind::Nominal { values } => values.len(),
            AttributeKind::Numeric => 0,
        }
    }

    /// Label of the given category code.
    pub fn value(&self, code: usize) -> Option<&str> {
        match &self.kind {
            AttributeKind::Nominal { values } => values.get(code).map(String::as_str),
            AttributeKind::Numeric => None,
        }
    }

    /// Category code of the given label.
    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        match &self.kind {
            AttributeKind::Nominal { values } => values.iter().position(|v| v == label),
            AttributeKind::Numeric => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_attribute() {
        let att = Attribute::nominal("color", ["red", "green", "blue"]);
        assert!(att.is_nominal());
        assert!(!att.is_numeric());
        assert_eq!(att.num_values(), 3);
        assert_eq!(att.value(1), Some("green"));
        assert_eq!(att.value(3), None);
        assert_eq!(att.index_of_value("blue"), Some(2));
        assert_eq!(att.index_of_value("pink"), None);
    }

    #[test]
    fn test_numeric_attribute() {
        let att = Attribute::numeric("price");
        assert!(att.is_numeric());
        assert_eq!(att.name(), "price");
        assert_eq!(att.num_values(), 0);
        assert_eq!(att.value(0), None);
        assert_eq!(att.kind(), &AttributeKind::Numeric);
    }
}
