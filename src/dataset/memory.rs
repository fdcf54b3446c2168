use super::{DatasetError, Header, Instance, Record};

/// A header together with the records of one batch.
///
/// Every record is checked against the header width when it is added.
#[derive(Clone, Debug)]
pub struct Instances<R: Record = Instance> {
    header: Header,
    records: Vec<R>,
}

impl<R: Record> Instances<R> {
    pub fn new(header: Header, records: Vec<R>) -> Result<Self, DatasetError> {
        let mut data = Self::empty(header);
        data.records.reserve(records.len());
        for record in records {
            data.push(record)?;
        }
        Ok(data)
    }

    pub fn empty(header: Header) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: R) -> Result<(), DatasetError> {
        if record.num_attributes() != self.header.num_attributes() {
            return Err(DatasetError::AttributeCountMismatch {
                expected: self.header.num_attributes(),
                got: record.num_attributes(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn into_parts(self) -> (Header, Vec<R>) {
        (self.header, self.records)
    }
}

impl<'a, R: Record> IntoIterator for &'a Instances<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
