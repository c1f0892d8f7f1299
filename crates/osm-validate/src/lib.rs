//! Schema contract for shaped OSM records.
//!
//! A [`Schema`] lists, per record kind, the fields that must be present and
//! the type each must parse as. The [`Validator`] reports the first field
//! that breaks it.

pub mod error;
pub mod schema;
pub mod validator;

pub use error::{Result, ValidationError};
pub use schema::{FieldRule, FieldType, RecordSchema, Schema};
pub use validator::Validator;
