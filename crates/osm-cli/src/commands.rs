use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use osm_cli::census::{
    Contributors, StreetReport, audit_streets, collect_contributors, tally_tag_keys,
};
use osm_cli::config::AppConfig;
use osm_cli::pipeline::Pipeline;
use osm_ingest::ElementReader;
use osm_output::CsvSinks;
use osm_transform::{KeyTally, NormalizationMapping};
use osm_validate::Validator;

use crate::cli::{AuditArgs, ProcessArgs, SourceArgs, UsersArgs};
use crate::types::ProcessResult;

fn open(path: &Path) -> Result<ElementReader<std::io::BufReader<std::fs::File>>> {
    ElementReader::open(path).with_context(|| format!("open {}", path.display()))
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let source = &args.source.osm_file;
    let span = info_span!("run", source = %source.display());
    let _guard = span.enter();

    let config = AppConfig::load(args.config.as_deref())?
        .with_overrides(args.tag_cleaning.map(Into::into), args.output_dir.clone());
    let output_dir = config.output.dir.clone();

    let reader = open(source)?;
    let mapping = NormalizationMapping::seeded(&config.processing);
    let mut pipeline = Pipeline::new(&config.processing, mapping)?;
    if args.validate {
        pipeline = pipeline.with_validator(Validator::new(config.schema.clone()));
    }
    let mut sinks = CsvSinks::create(&output_dir, &config.output)
        .with_context(|| format!("create outputs in {}", output_dir.display()))?;
    info!(
        output_dir = %output_dir.display(),
        tag_cleaning = ?config.processing.tag_cleaning,
        validate = args.validate,
        "processing started"
    );

    let stats = pipeline.run(reader, &mut sinks)?;
    let rows = *sinks.counts();
    sinks.into_inner().context("close outputs")?;

    let shaper = pipeline.shaper();
    Ok(ProcessResult {
        source: source.clone(),
        files: config.output.paths(&output_dir),
        output_dir,
        rows,
        stats,
        tally: *shaper.classifier().tally(),
        postcode_changes: shaper.postcode_auditor().changes().clone(),
        mapping: pipeline.mapping().clone(),
        validated: args.validate,
    })
}

pub fn run_audit_streets(args: &AuditArgs) -> Result<StreetReport> {
    let config = AppConfig::load(args.config.as_deref())?;
    let reader = open(&args.source.osm_file)?;
    let mapping = NormalizationMapping::seeded(&config.processing);
    audit_streets(reader, &config.processing, mapping)
}

pub fn run_tags(args: &SourceArgs) -> Result<KeyTally> {
    tally_tag_keys(open(&args.osm_file)?)
}

pub fn run_users(args: &UsersArgs) -> Result<Contributors> {
    collect_contributors(open(&args.source.osm_file)?)
}
