use crate::models::Record;

/// Ordered subset of loaded records; never owns or mutates them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    records: Vec<&'a Record>,
}

impl<'a> Selection<'a> {
    /// Every loaded record, in load order
    pub fn all(records: &'a [Record]) -> Self {
        Self {
            records: records.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    /// Order-preserving subsequence of the records matching `predicate`
    pub fn retain_where<F>(&self, predicate: F) -> Selection<'a>
    where
        F: Fn(&Record) -> bool,
    {
        self.iter().filter(|r| predicate(r)).collect()
    }
}

impl<'a> FromIterator<&'a Record> for Selection<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
