//! Spreadsheet persistence for survey submissions.
//!
//! A [`SheetStore`] is one worksheet that can be read whole and written back
//! whole. [`SheetRepo::append`] layers the read-modify-write append on top.

pub mod csv_file;
pub mod error;
pub mod gsheets;
pub mod memory;
pub mod repo;
pub mod store;

pub use csv_file::CsvSheetStore;
pub use error::StoreError;
pub use gsheets::{GoogleSheetStore, ServiceAccountKey};
pub use memory::MemorySheetStore;
pub use repo::SheetRepo;
pub use store::SheetStore;
