//! Bangladesh administrative geography: division → district → upazila → union.
//!
//! - [`record`] -- raw unit records and the document shapes they arrive in.
//! - [`tree`] -- joining the four record lists into a [`GeoTree`].
//! - [`select`] -- cascading option sets over a partially chosen path.

pub mod record;
pub mod select;
pub mod tree;

pub use record::{extract_records, GeoRecord, GeoSources};
pub use select::{select_options, GeoLevel, GeoSelection, ResolvedGeo};
pub use tree::GeoTree;
