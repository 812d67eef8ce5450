use async_trait::async_trait;
use fiber_survey_core::table::Table;

use crate::error::StoreError;

/// One worksheet, read and written as a whole.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Current contents. A sheet that does not exist yet reads as empty.
    async fn read(&self) -> Result<Table, StoreError>;

    /// Replace the contents with `table`.
    async fn update(&self, table: &Table) -> Result<(), StoreError>;
}
