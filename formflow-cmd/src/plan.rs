//! Planning runs over a project CSV.

use crate::report;
use anyhow::bail;
use formflow_core::config::PlanningConfig;
use formflow_core::error::FormflowError;
use formflow_core::ingest::{load_project, ProjectTable};
use formflow_core::kitting::KittingEngine;
use formflow_sim::export::{write_manifest, write_segments, write_timeline};
use formflow_sim::manifest::dispatch_manifest;
use formflow_sim::standardization::StandardizationReport;
use formflow_sim::{DemandSimulator, DemandSummary, InventoryTimeline, ScanStrategy};
use log::info;
use std::fs::File;

/// Switches for the `plan` subcommand.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub timeline_csv: Option<String>,
    pub strict: bool,
    pub require_events: bool,
    pub day_scan: bool,
}

/// Everything computed for one project.
#[derive(Debug)]
pub struct PlanOutcome {
    pub table: ProjectTable,
    pub timeline: InventoryTimeline,
    pub summary: DemandSummary,
    pub standards: StandardizationReport,
}

fn read_project(project_csv: &str, config: &PlanningConfig) -> anyhow::Result<ProjectTable> {
    load_project(project_csv, config)
        .map_err(|e| anyhow::anyhow!("Failed to load project {}: {}", project_csv, e))
}

/// Simulate an already loaded project table.
pub fn plan_project(
    table: ProjectTable,
    config: &PlanningConfig,
    options: &PlanOptions,
) -> anyhow::Result<PlanOutcome> {
    if options.strict && !table.is_clean() {
        bail!(
            "{} rows rejected in strict mode:\n{}",
            table.rejected.len(),
            report::render_rejections(&table.rejected)
        );
    }
    let strategy = if options.day_scan {
        ScanStrategy::DayScan
    } else {
        ScanStrategy::SweepLine
    };
    let timeline = DemandSimulator::new(strategy)
        .require_events(options.require_events)
        .simulate(&table.events)?;
    let summary = DemandSummary::new(&table.events, &timeline);
    let standards = StandardizationReport::new(
        &table.events,
        config.kitting.module_width_mm,
        config.waste_alert_threshold_mm,
    );
    Ok(PlanOutcome {
        table,
        timeline,
        summary,
        standards,
    })
}

pub fn run_plan(
    project_csv: &str,
    config: &PlanningConfig,
    options: &PlanOptions,
) -> anyhow::Result<()> {
    let table = read_project(project_csv, config)?;
    let outcome = plan_project(table, config, options)?;
    println!("{}", report::render_plan(&outcome, config));

    if let Some(path) = &options.timeline_csv {
        let series = outcome
            .timeline
            .with_display_padding(config.display_padding_days);
        write_timeline(File::create(path)?, &series)?;
        info!("Wrote {} timeline days to {}", series.len(), path);
    }
    Ok(())
}

pub fn run_kit(width_mm: f64, height_mm: Option<f64>, config: &PlanningConfig) -> anyhow::Result<()> {
    if let Some(height) = height_mm {
        if !height.is_finite() || height <= 0.0 {
            return Err(FormflowError::InvalidGeometry {
                dimension: "height",
                value_mm: height,
            }
            .into());
        }
    }
    let engine = KittingEngine::new(config.kitting.clone())?;
    let kit = engine.kit(width_mm)?;
    println!("{}", report::render_kit(width_mm, height_mm, &kit, &config.kitting));
    Ok(())
}

pub fn run_standards(
    project_csv: &str,
    config: &PlanningConfig,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let table = read_project(project_csv, config)?;
    let standards = StandardizationReport::new(
        &table.events,
        config.kitting.module_width_mm,
        config.waste_alert_threshold_mm,
    );
    println!("{}", report::render_standards(&standards));

    if let Some(path) = output {
        write_segments(File::create(path)?, &standards.segments)?;
        info!("Wrote {} misaligned segments to {}", standards.segments.len(), path);
    }
    Ok(())
}

pub fn run_manifest(
    project_csv: &str,
    config: &PlanningConfig,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let table = read_project(project_csv, config)?;
    let rows = dispatch_manifest(&table.events);
    match output {
        Some(path) => {
            write_manifest(File::create(path)?, &rows)?;
            info!("Wrote {} manifest rows to {}", rows.len(), path);
        }
        None => write_manifest(std::io::stdout().lock(), &rows)?,
    }
    Ok(())
}
