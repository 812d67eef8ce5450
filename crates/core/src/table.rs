//! A small in-memory sheet: a header row plus string cells.
//!
//! Every backend reads into and writes out of this shape, so appending and
//! column ordering live here rather than in each store.

use serde::Serialize;

use crate::rows::SheetRow;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, squaring off ragged rows.
    ///
    /// Short rows are padded with empty cells. Cells past the header get
    /// placeholder `Unnamed: <n>` columns so no data is silently dropped.
    pub fn new(mut columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        for idx in columns.len()..widest {
            columns.push(format!("Unnamed: {idx}"));
        }
        for row in &mut rows {
            row.resize(columns.len(), String::new());
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` under `column`, if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Append keyed records after the existing rows.
    ///
    /// The header becomes the union of the existing columns and the record
    /// keys (new keys appended in first-seen order); any cell a row does not
    /// supply is left empty.
    pub fn append_records(&mut self, records: &[SheetRow]) {
        for record in records {
            for key in record.keys() {
                if self.column_index(key).is_none() {
                    self.columns.push(key.clone());
                }
            }
        }

        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }

        for record in records {
            let row = self
                .columns
                .iter()
                .map(|col| record.get(col).cloned().unwrap_or_default())
                .collect();
            self.rows.push(row);
        }
    }

    /// Rearrange columns: those named in `order` first (in that order, when
    /// present), then any others in their current relative order.
    pub fn reorder(&mut self, order: &[&str]) {
        let mut picks: Vec<usize> = order
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        let rest: Vec<usize> = (0..self.columns.len())
            .filter(|idx| !picks.contains(idx))
            .collect();
        picks.extend(rest);

        let columns: Vec<String> = picks.iter().map(|&i| self.columns[i].clone()).collect();
        self.columns = columns;
        for row in &mut self.rows {
            let cells: Vec<String> = picks.iter().map(|&i| std::mem::take(&mut row[i])).collect();
            *row = cells;
        }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
