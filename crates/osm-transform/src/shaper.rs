//! Element shaping: one OSM element in, flat records out.

use tracing::trace;

use osm_model::{
    DEFAULT_TAG_TYPE, Element, ElementKind, NodeRecord, ProcessingOptions, ShapedElement,
    ShapedNode, ShapedWay, TagCleaning, TagRecord, WayNodeRecord, WayRecord,
};

use crate::classify::{TagCategory, TagClassifier};
use crate::error::Result;
use crate::normalization::{NormalizationMapping, PostcodeAuditor, StreetTypeAuditor, update_name};

/// Raw tag key whose value is a street name.
pub const STREET_KEY: &str = "addr:street";

/// Raw tag key whose value is a postal code.
pub const POSTCODE_KEY: &str = "addr:postcode";

/// Split a raw tag key into `(type, key)`.
///
/// Keys without a colon get the default `regular` type. Otherwise the text
/// before the first colon is the type and the rest, including any further
/// colons, is the key.
pub fn split_tag_key(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((tag_type, key)) => (tag_type, key),
        None => (DEFAULT_TAG_TYPE, raw),
    }
}

/// Shapes elements into records, auditing `addr:*` values along the way.
///
/// The normalization mapping is passed into every call rather than owned, so
/// callers control its seed and can inspect it between elements.
#[derive(Debug, Clone)]
pub struct ElementShaper {
    cleaning: TagCleaning,
    classifier: TagClassifier,
    streets: StreetTypeAuditor,
    postcodes: PostcodeAuditor,
    dropped_tags: u64,
}

impl ElementShaper {
    /// Build a shaper from processing options.
    ///
    /// # Errors
    ///
    /// Fails if an abbreviation rule cannot be compiled.
    pub fn new(options: &ProcessingOptions) -> Result<Self> {
        Ok(Self {
            cleaning: options.tag_cleaning,
            classifier: TagClassifier::new(),
            streets: StreetTypeAuditor::from_options(options)?,
            postcodes: PostcodeAuditor::from_options(options),
            dropped_tags: 0,
        })
    }

    /// Shape a node or way. Other element kinds produce `None`.
    ///
    /// # Errors
    ///
    /// Fails when the element or one of its children lacks a required attribute.
    pub fn shape(
        &mut self,
        element: &Element,
        mapping: &mut NormalizationMapping,
    ) -> Result<Option<ShapedElement>> {
        let shaped = match element.kind {
            ElementKind::Node => Some(ShapedElement::Node(self.shape_node(element, mapping)?)),
            ElementKind::Way => Some(ShapedElement::Way(self.shape_way(element, mapping)?)),
            ElementKind::Relation => None,
        };
        Ok(shaped)
    }

    fn shape_node(
        &mut self,
        element: &Element,
        mapping: &mut NormalizationMapping,
    ) -> Result<ShapedNode> {
        let node = NodeRecord {
            id: element.require("id")?.to_string(),
            lat: element.require("lat")?.to_string(),
            lon: element.require("lon")?.to_string(),
            user: element.require("user")?.to_string(),
            uid: element.require("uid")?.to_string(),
            version: element.require("version")?.to_string(),
            changeset: element.require("changeset")?.to_string(),
            timestamp: element.require("timestamp")?.to_string(),
        };
        let node_tags = self.shape_tags(element, &node.id, true, mapping)?;
        Ok(ShapedNode { node, node_tags })
    }

    fn shape_way(
        &mut self,
        element: &Element,
        mapping: &mut NormalizationMapping,
    ) -> Result<ShapedWay> {
        let way = WayRecord {
            id: element.require("id")?.to_string(),
            user: element.require("user")?.to_string(),
            uid: element.require("uid")?.to_string(),
            version: element.require("version")?.to_string(),
            changeset: element.require("changeset")?.to_string(),
            timestamp: element.require("timestamp")?.to_string(),
        };
        let clean = self.cleaning == TagCleaning::Uniform;
        let way_tags = self.shape_tags(element, &way.id, clean, mapping)?;

        let mut way_nodes = Vec::new();
        for (position, nd) in element.node_refs().enumerate() {
            way_nodes.push(WayNodeRecord {
                id: way.id.clone(),
                node_id: element.require_child(nd, "ref")?.to_string(),
                position,
            });
        }
        Ok(ShapedWay {
            way,
            way_nodes,
            way_tags,
        })
    }

    fn shape_tags(
        &mut self,
        element: &Element,
        id: &str,
        clean: bool,
        mapping: &mut NormalizationMapping,
    ) -> Result<Vec<TagRecord>> {
        let mut records = Vec::new();
        for tag in element.tags() {
            let raw_key = element.require_child(tag, "k")?;
            let raw_value = element.require_child(tag, "v")?;
            if self.classifier.classify(raw_key) == TagCategory::ProblemChars {
                self.dropped_tags += 1;
                trace!(id, key = raw_key, "dropped tag with problem characters");
                continue;
            }
            let (tag_type, key) = split_tag_key(raw_key);
            records.push(TagRecord {
                id: id.to_string(),
                key: key.to_string(),
                value: self.tag_value(raw_key, raw_value, clean, mapping),
                tag_type: tag_type.to_string(),
            });
        }
        Ok(records)
    }

    /// Value to store for one tag. Street names are audited even when
    /// cleaning is off so the mapping keeps learning.
    fn tag_value(
        &mut self,
        raw_key: &str,
        raw_value: &str,
        clean: bool,
        mapping: &mut NormalizationMapping,
    ) -> String {
        match raw_key {
            STREET_KEY => {
                self.streets.audit(raw_value, mapping);
                if clean {
                    update_name(raw_value, mapping)
                } else {
                    raw_value.to_string()
                }
            }
            POSTCODE_KEY if clean => self.postcodes.audit(raw_value),
            _ => raw_value.to_string(),
        }
    }

    pub fn tag_cleaning(&self) -> TagCleaning {
        self.cleaning
    }

    pub fn classifier(&self) -> &TagClassifier {
        &self.classifier
    }

    pub fn street_auditor(&self) -> &StreetTypeAuditor {
        &self.streets
    }

    pub fn postcode_auditor(&self) -> &PostcodeAuditor {
        &self.postcodes
    }

    /// Tags dropped because their key contained problem characters.
    pub fn dropped_tags(&self) -> u64 {
        self.dropped_tags
    }
}
