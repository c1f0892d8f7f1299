//! CLI argument definitions for `osm-wrangle`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use osm_model::TagCleaning;

#[derive(Parser)]
#[command(
    name = "osm-wrangle",
    version,
    about = "Audit, clean and export OpenStreetMap XML as CSV",
    long_about = "Stream an OpenStreetMap XML extract, normalize street names and postal codes,\n\
                  and write nodes, ways and their tags as five CSV tables.\n\
                  Audit subcommands report street types, tag keys and contributors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix every log event with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Shape every node and way into CSV tables.
    Process(ProcessArgs),

    /// Report unexpected street types and the abbreviations they teach.
    AuditStreets(AuditArgs),

    /// Count tag keys by category.
    Tags(SourceArgs),

    /// List unique contributors.
    Users(UsersArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// OpenStreetMap XML file to read.
    #[arg(value_name = "OSM_FILE")]
    pub osm_file: PathBuf,
}

#[derive(Args)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory for the CSV files; overrides `[output] dir` (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Check every shaped element against the schema; the first violation aborts the run.
    #[arg(long = "validate")]
    pub validate: bool,

    /// Which elements get street and postcode cleanup; overrides `[processing] tag_cleaning`.
    #[arg(long = "tag-cleaning", value_enum)]
    pub tag_cleaning: Option<TagCleaningArg>,

    /// TOML file with [processing], [output] and [schema] tables.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct AuditArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// TOML file with a [processing] table.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct UsersArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print every contributor, not just the count.
    #[arg(long = "list")]
    pub list: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TagCleaningArg {
    /// Clean node and way tags alike.
    Uniform,
    /// Clean node tags only; way values are audited but kept verbatim.
    NodesOnly,
}

impl From<TagCleaningArg> for TagCleaning {
    fn from(arg: TagCleaningArg) -> Self {
        match arg {
            TagCleaningArg::Uniform => TagCleaning::Uniform,
            TagCleaningArg::NodesOnly => TagCleaning::NodesOnly,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
