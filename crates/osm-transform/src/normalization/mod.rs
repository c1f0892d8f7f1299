//! Normalization of `addr:*` tag values.
//!
//! - **mapping**: learned abbreviation → canonical word table
//! - **street**: street-type auditing against the expected set and abbreviation rules
//! - **name**: rewriting street names from the mapping
//! - **postcode**: postal-code cleanup and change log

pub mod mapping;
pub mod name;
pub mod postcode;
pub mod street;

pub use mapping::NormalizationMapping;
pub use name::update_name;
pub use postcode::PostcodeAuditor;
pub use street::{StreetAudit, StreetTypeAuditor, street_type};
