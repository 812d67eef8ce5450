use std::sync::Arc;

use fiber_survey_core::survey::FormVariant;
use fiber_survey_store::{CsvSheetStore, GoogleSheetStore, ServiceAccountKey, SheetStore};
use tokio::sync::Mutex;

use crate::config::{ServerConfig, SheetConfig};
use crate::geo::GeoTreeCache;
use crate::session::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Build-once geographic lookup tree.
    pub geo: Arc<GeoTreeCache>,
    /// Live form drafts keyed by session cookie.
    pub sessions: Arc<SessionStore>,
    /// Destination worksheets.
    pub sheets: Arc<SheetTargets>,
}

/// One worksheet per form variant, each with its own append lock.
pub struct SheetTargets {
    simple: SheetTarget,
    extended: SheetTarget,
}

pub struct SheetTarget {
    pub store: Arc<dyn SheetStore>,
    /// Serializes read-modify-write appends from this process.
    pub append_lock: Mutex<()>,
}

impl SheetTargets {
    pub fn new(simple: Arc<dyn SheetStore>, extended: Arc<dyn SheetStore>) -> Self {
        Self {
            simple: SheetTarget {
                store: simple,
                append_lock: Mutex::new(()),
            },
            extended: SheetTarget {
                store: extended,
                append_lock: Mutex::new(()),
            },
        }
    }

    pub fn for_variant(&self, variant: FormVariant) -> &SheetTarget {
        match variant {
            FormVariant::Simple => &self.simple,
            FormVariant::Extended => &self.extended,
        }
    }
}

/// Open the configured spreadsheet backend for both variants.
///
/// # Panics
///
/// Panics if the Google service-account key cannot be loaded; the server
/// cannot accept submissions without it.
pub fn open_sheet_targets(config: &SheetConfig) -> SheetTargets {
    match config {
        SheetConfig::Csv { dir } => SheetTargets::new(
            Arc::new(CsvSheetStore::new(dir.join("simple.csv"))),
            Arc::new(CsvSheetStore::new(dir.join("extended.csv"))),
        ),
        SheetConfig::GoogleSheets {
            spreadsheet_id,
            credentials_path,
            simple_worksheet,
            extended_worksheet,
        } => {
            let key = ServiceAccountKey::from_file(credentials_path)
                .unwrap_or_else(|e| panic!("Failed to load Google credentials: {e}"));
            SheetTargets::new(
                Arc::new(GoogleSheetStore::new(
                    key.clone(),
                    spreadsheet_id.clone(),
                    simple_worksheet.clone(),
                )),
                Arc::new(GoogleSheetStore::new(
                    key,
                    spreadsheet_id.clone(),
                    extended_worksheet.clone(),
                )),
            )
        }
    }
}
