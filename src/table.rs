//! In-memory tables.
//!
//! A [`Table`] is one logical dataset held as a single Arrow [`RecordBatch`].
//! CSV readers yield several batches; they are concatenated on load so every
//! stage can address rows by a plain index.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::compute::concat_batches;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::{PrepError, Result};

/// A named table
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    batch: RecordBatch,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }

    /// Build a table from any number of batches sharing `schema`
    pub fn from_batches(
        name: impl Into<String>,
        schema: SchemaRef,
        batches: &[RecordBatch],
    ) -> Result<Self> {
        let batch = concat_batches(&schema, batches)?;
        Ok(Self::new(name, batch))
    }

    /// Build a table from named columns
    pub fn from_columns(name: impl Into<String>, columns: Vec<(Field, ArrayRef)>) -> Result<Self> {
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Ok(Self::new(name, batch))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.batch.schema().index_of(column).is_ok()
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Look up a column, failing with the table and column name
    pub fn column(&self, column: &str) -> Result<&ArrayRef> {
        let idx = self
            .batch
            .schema()
            .index_of(column)
            .map_err(|_| PrepError::missing_column(&self.name, column))?;
        Ok(self.batch.column(idx))
    }

    /// Total number of missing cells across all columns
    #[must_use]
    pub fn missing_cells(&self) -> usize {
        self.batch.columns().iter().map(|c| c.logical_null_count()).sum()
    }

    /// First `n` rows, or fewer if the table is shorter
    #[must_use]
    pub fn head(&self, n: usize) -> RecordBatch {
        self.batch.slice(0, n.min(self.num_rows()))
    }

    /// Same data under another name
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.batch.clone())
    }

    #[must_use]
    pub fn with_batch(&self, batch: RecordBatch) -> Self {
        Self::new(self.name.clone(), batch)
    }
}

/// Ordered collection of tables addressed by name
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any table of the same name in place
    pub fn insert(&mut self, table: Table) {
        match self.tables.iter_mut().find(|t| t.name() == table.name()) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Look up a table that must be present
    pub fn require(&self, name: &str) -> Result<&Table> {
        self.get(name)
            .ok_or_else(|| PrepError::MissingTable(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(Table::name).collect()
    }
}

impl FromIterator<Table> for TableSet {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut set = Self::new();
        for table in iter {
            set.insert(table);
        }
        set
    }
}

impl IntoIterator for TableSet {
    type Item = Table;
    type IntoIter = std::vec::IntoIter<Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

/// Upper-case the first letter and lower-case the rest, e.g. `job_postings` -> `Job_postings`
#[must_use]
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::DataType;

    fn sample() -> Table {
        Table::from_columns(
            "sample",
            vec![
                (
                    Field::new("id", DataType::Int64, true),
                    Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])) as ArrayRef,
                ),
                (
                    Field::new("name", DataType::Utf8, true),
                    Arc::new(StringArray::from(vec![Some("a"), Some("b"), None])) as ArrayRef,
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_table_accessors() {
        let table = sample();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column_names(), vec!["id", "name"]);
        assert_eq!(table.missing_cells(), 2);
        assert_eq!(table.head(2).num_rows(), 2);
        assert_eq!(table.head(10).num_rows(), 3);
        assert!(matches!(
            table.column("missing"),
            Err(PrepError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_table_set_replaces_by_name() {
        let mut set = TableSet::new();
        set.insert(sample());
        set.insert(sample().renamed("other"));
        set.insert(sample());
        assert_eq!(set.names(), vec!["sample", "other"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("job_postings"), "Job_postings");
        assert_eq!(display_name("MERGED"), "Merged");
        assert_eq!(display_name(""), "");
    }
}
