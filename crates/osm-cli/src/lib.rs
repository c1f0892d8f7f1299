//! Library side of `osm-wrangle`: pipeline driver, audit passes,
//! configuration and logging setup.

pub mod census;
pub mod config;
pub mod logging;
pub mod pipeline;
