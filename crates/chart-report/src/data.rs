// File: crates/chart-report/src/data.rs
// Summary: Time-series datasets as seen by the report pipeline, and the shared load-ordered collection.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{ReportError, Result};

/// One measurement type of a dataset (e.g. `CPU_ALL`), holding one column of
/// values per field, aligned with the dataset's timestamps.
#[derive(Clone, Debug)]
pub struct DataType {
    id: String,
    fields: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl DataType {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn column(&self, field: &str) -> Option<&[f64]> {
        let index = self.fields.iter().position(|f| f == field)?;
        self.columns.get(index).map(Vec::as_slice)
    }
}

/// Time-series data of one host. Timestamps are milliseconds since the Unix
/// epoch in ascending order.
#[derive(Clone, Debug)]
pub struct DataSet {
    hostname: String,
    timestamps: Vec<i64>,
    types: Vec<DataType>,
}

impl DataSet {
    pub fn new(hostname: impl Into<String>, timestamps: Vec<i64>) -> Self {
        Self { hostname: hostname.into(), timestamps, types: Vec::new() }
    }

    /// Add a data type whose `columns` line up with `fields`. Every column must
    /// have one value per timestamp. Re-adding a type id replaces it.
    pub fn with_type(
        mut self,
        id: impl Into<String>,
        fields: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let id = id.into();
        if fields.len() != columns.len() {
            return Err(ReportError::ColumnLength {
                data_type: id,
                field: String::from("*"),
                expected: fields.len(),
                actual: columns.len(),
            });
        }
        for (field, column) in fields.iter().zip(&columns) {
            if column.len() != self.timestamps.len() {
                return Err(ReportError::ColumnLength {
                    data_type: id,
                    field: field.clone(),
                    expected: self.timestamps.len(),
                    actual: column.len(),
                });
            }
        }

        let data_type = DataType { id, fields, columns };
        match self.types.iter_mut().find(|t| t.id == data_type.id) {
            Some(existing) => *existing = data_type,
            None => self.types.push(data_type),
        }
        Ok(self)
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn start_time(&self) -> Option<i64> {
        self.timestamps.first().copied()
    }

    pub fn end_time(&self) -> Option<i64> {
        self.timestamps.last().copied()
    }

    pub fn types(&self) -> impl Iterator<Item = &DataType> {
        self.types.iter()
    }

    pub fn data_type(&self, id: &str) -> Option<&DataType> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn has_field(&self, data_type: &str, field: &str) -> bool {
        self.data_type(data_type).is_some_and(|t| t.has_field(field))
    }

    /// `(timestamp, value)` pairs of one field.
    pub fn series<'a>(&'a self, data_type: &str, field: &str) -> Option<impl Iterator<Item = (i64, f64)> + 'a> {
        let column = self.data_type(data_type)?.column(field)?;
        Some(self.timestamps.iter().copied().zip(column.iter().copied()))
    }
}

/// The datasets currently loaded, in load order.
///
/// Writers replace the whole list; readers take a snapshot, so a report run
/// never observes a collection that changes under it.
#[derive(Debug)]
pub struct DataSets {
    sets: RwLock<Arc<[Arc<DataSet>]>>,
}

impl Default for DataSets {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSets {
    pub fn new() -> Self {
        Self { sets: RwLock::new(Arc::from(Vec::new())) }
    }

    pub fn add(&self, data: DataSet) -> Arc<DataSet> {
        let data = Arc::new(data);
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = sets.to_vec();
        next.push(Arc::clone(&data));
        *sets = next.into();
        data
    }

    /// Remove every dataset with `hostname`; returns how many were removed.
    pub fn remove(&self, hostname: &str) -> usize {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        let next: Vec<_> = sets.iter().filter(|d| d.hostname() != hostname).cloned().collect();
        let removed = sets.len() - next.len();
        *sets = next.into();
        removed
    }

    pub fn clear(&self) {
        *self.sets.write().unwrap_or_else(PoisonError::into_inner) = Arc::from(Vec::new());
    }

    pub fn snapshot(&self) -> Arc<[Arc<DataSet>]> {
        Arc::clone(&self.sets.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Earliest start and latest end over all datasets with data.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        self.snapshot()
            .iter()
            .filter_map(|data| Some((data.start_time()?, data.end_time()?)))
            .reduce(|(s1, e1), (s2, e2)| (s1.min(s2), e1.max(e2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str, times: Vec<i64>) -> DataSet {
        let n = times.len();
        DataSet::new(name, times)
            .with_type("CPU_ALL", vec!["User%".into()], vec![vec![1.0; n]])
            .expect("aligned columns")
    }

    #[test]
    fn rejects_misaligned_columns() {
        let err = DataSet::new("a", vec![0, 1])
            .with_type("MEM", vec!["memfree".into()], vec![vec![1.0]])
            .expect_err("column too short");
        assert!(matches!(err, ReportError::ColumnLength { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn series_pairs_timestamps_with_values() {
        let data = DataSet::new("a", vec![10, 20])
            .with_type("MEM", vec!["memfree".into()], vec![vec![5.0, 6.0]])
            .expect("aligned");
        let pairs: Vec<_> = data.series("MEM", "memfree").expect("field").collect();
        assert_eq!(pairs, vec![(10, 5.0), (20, 6.0)]);
        assert!(data.series("MEM", "memtotal").is_none());
        assert!(data.has_field("MEM", "memfree"));
    }

    #[test]
    fn collection_keeps_load_order_and_snapshots() {
        let sets = DataSets::new();
        sets.add(host("b", vec![5, 50]));
        let before = sets.snapshot();
        sets.add(host("a", vec![1, 20]));

        assert_eq!(before.len(), 1);
        let names: Vec<_> = sets.snapshot().iter().map(|d| d.hostname().to_owned()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(sets.time_range(), Some((1, 50)));

        assert_eq!(sets.remove("b"), 1);
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn empty_datasets_have_no_range() {
        let sets = DataSets::new();
        sets.add(DataSet::new("empty", Vec::new()));
        assert_eq!(sets.time_range(), None);
    }
}
