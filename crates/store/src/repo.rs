use fiber_survey_core::rows::SheetRow;

use crate::error::StoreError;
use crate::store::SheetStore;

/// Append operations over any [`SheetStore`].
pub struct SheetRepo;

impl SheetRepo {
    /// Append `rows` to the sheet: read everything, concatenate, put the
    /// `order` columns first, and write everything back.
    ///
    /// The store sees a single read and a single write. Callers that share a
    /// store must serialize appends themselves; two interleaved appends lose
    /// whichever write lands first.
    pub async fn append(
        store: &dyn SheetStore,
        rows: &[SheetRow],
        order: &[&str],
    ) -> Result<usize, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut table = store.read().await?;
        let existing = table.len();

        table.append_records(rows);
        table.reorder(order);
        store.update(&table).await?;

        tracing::info!(existing, appended = rows.len(), "Rows appended to sheet");
        Ok(rows.len())
    }
}
