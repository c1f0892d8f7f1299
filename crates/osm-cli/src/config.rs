//! TOML configuration file.
//!
//! ```toml
//! [processing]
//! tag_cleaning = "nodes-only"
//! postcode_max_len = 5
//!
//! [output]
//! dir = "out"
//! way_tags = "ways_tags.csv"
//!
//! [[schema.node]]
//! name = "id"
//! type = "integer"
//! ```
//!
//! Every table and key is optional; missing ones keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use osm_model::{ProcessingOptions, TagCleaning};
use osm_output::OutputFiles;
use osm_validate::Schema;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub processing: ProcessingOptions,
    pub output: OutputFiles,
    pub schema: Schema,
}

impl AppConfig {
    /// Load `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply command-line flags on top of the file; a flag that is set wins.
    #[must_use]
    pub fn with_overrides(
        mut self,
        tag_cleaning: Option<TagCleaning>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(mode) = tag_cleaning {
            self.processing.tag_cleaning = mode;
        }
        if let Some(dir) = output_dir {
            self.output.dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = AppConfig::parse(
            r#"
            [processing]
            tag_cleaning = "nodes-only"

            [output]
            nodes = "points.csv"
            "#,
        )
        .unwrap();
        assert_eq!(config.processing.tag_cleaning, TagCleaning::NodesOnly);
        assert_eq!(config.processing.postcode_max_len, 5);
        assert_eq!(config.output.nodes, "points.csv");
        assert_eq!(config.output.ways, "ways.csv");
        assert_eq!(config.schema, Schema::default());
    }

    #[test]
    fn test_flags_beat_the_file() {
        let config = AppConfig::parse(
            r#"
            [processing]
            tag_cleaning = "uniform"

            [output]
            dir = "from-file"
            "#,
        )
        .unwrap();

        let unchanged = config.clone().with_overrides(None, None);
        assert_eq!(unchanged, config);

        let overridden = config.with_overrides(
            Some(TagCleaning::NodesOnly),
            Some(PathBuf::from("from-flag")),
        );
        assert_eq!(overridden.processing.tag_cleaning, TagCleaning::NodesOnly);
        assert_eq!(overridden.output.dir, Path::new("from-flag"));
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let err = AppConfig::parse("[outputs]\nnodes = \"x.csv\"").unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_unknown_nested_key_is_rejected() {
        let err = AppConfig::parse("[processing]\ntag_cleanin = \"nodes-only\"").unwrap_err();
        assert!(format!("{err:#}").contains("tag_cleanin"));
    }
}
