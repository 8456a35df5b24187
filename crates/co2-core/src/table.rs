//! In-memory emissions table and borrowed row views.

use std::collections::HashSet;
use std::sync::Arc;

use crate::record::{EmissionsRecord, Schema};

/// Full dataset as loaded from the source. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Arc<Schema>,
    rows: Vec<EmissionsRecord>,
}

impl Table {
    pub fn new(schema: Schema, rows: Vec<EmissionsRecord>) -> Self {
        Self {
            schema: Arc::new(schema),
            rows,
        }
    }

    /// Table with the canonical typed-column schema (fixtures, tests).
    pub fn from_records(rows: Vec<EmissionsRecord>) -> Self {
        Self::new(Schema::canonical(), rows)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    pub fn rows(&self) -> &[EmissionsRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// View over every row.
    pub fn view(&self) -> View<'_> {
        View {
            table: self,
            indices: (0..self.rows.len()).collect(),
        }
    }

    /// View over the first `n` rows.
    pub fn head(&self, n: usize) -> View<'_> {
        View {
            table: self,
            indices: (0..n.min(self.rows.len())).collect(),
        }
    }

    /// Distinct country names in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.country.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Smallest and largest year present, `None` for an empty table.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.rows.iter().map(|r| r.year).min()?;
        let max = self.rows.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

/// Filtered, non-owning subset of a [`Table`]'s rows.
///
/// Row indices are kept in ascending order so iteration follows source order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    table: &'a Table,
    indices: Vec<usize>,
}

impl<'a> View<'a> {
    pub(crate) fn select<F>(table: &'a Table, predicate: F) -> Self
    where
        F: Fn(&EmissionsRecord) -> bool,
    {
        let indices = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(row))
            .map(|(idx, _)| idx)
            .collect();
        Self { table, indices }
    }

    pub(crate) fn narrow<F>(&self, predicate: F) -> Self
    where
        F: Fn(&EmissionsRecord) -> bool,
    {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&idx| predicate(&self.table.rows[idx]))
            .collect();
        Self {
            table: self.table,
            indices,
        }
    }

    /// The table this view borrows from.
    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn schema(&self) -> &'a Schema {
        self.table.schema()
    }

    /// Same column set as the underlying table.
    pub fn columns(&self) -> &'a [String] {
        self.table.columns()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&'a EmissionsRecord> {
        let table = self.table;
        self.indices.get(position).map(|&idx| &table.rows[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a EmissionsRecord> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&idx| &table.rows[idx])
    }

    /// Positions of the selected rows in the underlying table.
    pub fn row_indices(&self) -> &[usize] {
        &self.indices
    }

    /// Rows whose country is one of `names` (exact, case-sensitive).
    pub fn filter_by_countries<I, S>(&self, names: I) -> View<'a>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted = name_set(names);
        self.narrow(|row| wanted.contains(row.country.as_str()))
    }

    /// Rows for exactly `year`.
    pub fn filter_by_year(&self, year: i32) -> View<'a> {
        self.narrow(|row| row.year == year)
    }

    /// Rows whose country equals `name` (exact, case-sensitive).
    pub fn filter_by_country(&self, name: &str) -> View<'a> {
        self.narrow(|row| row.country == name)
    }

    /// Copy the selected rows into an owned table with the same schema.
    pub fn to_table(&self) -> Table {
        Table {
            schema: Arc::clone(&self.table.schema),
            rows: self.iter().cloned().collect(),
        }
    }
}

impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.columns() == other.columns() && self.iter().eq(other.iter())
    }
}

pub(crate) fn name_set<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| n.as_ref().to_owned()).collect()
}
