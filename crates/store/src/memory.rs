//! In-process worksheet for tests and local runs without a spreadsheet.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use fiber_survey_core::table::Table;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::SheetStore;

#[derive(Debug, Default)]
pub struct MemorySheetStore {
    table: RwLock<Table>,
    fail_reads: AtomicBool,
    fail_updates: AtomicBool,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Table) -> Self {
        Self {
            table: RwLock::new(table),
            ..Self::default()
        }
    }

    /// Current contents without going through the trait.
    pub async fn snapshot(&self) -> Table {
        self.table.read().await.clone()
    }

    /// Make subsequent reads fail until switched off again.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent updates fail until switched off again.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn read(&self) -> Result<Table, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory sheet read disabled".into()));
        }
        Ok(self.table.read().await.clone())
    }

    async fn update(&self, table: &Table) -> Result<(), StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory sheet update disabled".into()));
        }
        *self.table.write().await = table.clone();
        Ok(())
    }
}
