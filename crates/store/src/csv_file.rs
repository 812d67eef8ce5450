//! Worksheet backed by a local CSV file.
//!
//! The first record is the header. Writes go to a sibling temp file that is
//! renamed over the old file, so a crash mid-write never leaves a truncated
//! sheet behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fiber_survey_core::table::Table;

use crate::error::StoreError;
use crate::store::SheetStore;

#[derive(Debug, Clone)]
pub struct CsvSheetStore {
    path: PathBuf,
}

impl CsvSheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SheetStore for CsvSheetStore {
    async fn read(&self) -> Result<Table, StoreError> {
        let path = self.path.clone();
        run_blocking(move || read_table(&path)).await
    }

    async fn update(&self, table: &Table) -> Result<(), StoreError> {
        let path = self.path.clone();
        let table = table.clone();
        run_blocking(move || write_table(&path, &table)).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Unavailable(format!("CSV worker panicked: {e}")))?
}

fn read_table(path: &Path) -> Result<Table, StoreError> {
    if !path.exists() {
        return Ok(Table::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok(Table::new(columns, rows))
}

fn write_table(path: &Path, table: &Table) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp)?;
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp, path)?;

    tracing::debug!(path = %path.display(), rows = table.len(), "CSV sheet written");
    Ok(())
}
