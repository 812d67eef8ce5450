//! Domain logic for the fiber core connection survey.
//!
//! Everything here is pure: the geo lookup tree and cascading selector, the
//! per-session draft (fiber lines and their intermediate points), submit-time
//! validation, and the shaping of a submission into spreadsheet rows. Network
//! and storage live in the `store` and `api` crates.

pub mod choice;
pub mod draft;
pub mod error;
pub mod geo;
pub mod labels;
pub mod rows;
pub mod survey;
pub mod table;
pub mod validation;
