//! Data model for the OSM wrangling pipeline.
//!
//! - **element**: one top-level OSM element (`node`, `way`, `relation`) and its children
//! - **record**: flat node / way / tag / way-node rows with fixed column orders
//! - **options**: shaping and normalization settings

pub mod element;
pub mod error;
pub mod options;
pub mod record;

pub use element::{Attributes, Child, Element, ElementKind, NODE_REF_CHILD, TAG_CHILD};
pub use error::{ModelError, Result};
pub use options::{AbbreviationRule, ProcessingOptions, TagCleaning};
pub use record::{
    DEFAULT_TAG_TYPE, NODE_FIELDS, NODE_TAGS_FIELDS, NodeRecord, Record, ShapedElement,
    ShapedNode, ShapedWay, TagRecord, WAY_FIELDS, WAY_NODES_FIELDS, WAY_TAGS_FIELDS, WayNodeRecord,
    WayRecord,
};
