//! OSM element transformation.
//!
//! This crate turns streamed OSM elements into flat records:
//!
//! - **classify**: tag-key categories (`lower`, `lower_colon`, `problemchars`, `other`)
//! - **normalization**: street-type auditing, name rewriting, postal-code cleanup
//! - **shaper**: node / way → entity, tag, and way-node records

pub mod classify;
pub mod error;
pub mod normalization;
pub mod shaper;

pub use classify::{KeyTally, TagCategory, TagClassifier, classify_key};
pub use error::{Result, TransformError};
pub use normalization::{
    NormalizationMapping, PostcodeAuditor, StreetAudit, StreetTypeAuditor, street_type,
    update_name,
};
pub use shaper::{ElementShaper, POSTCODE_KEY, STREET_KEY, split_tag_key};
