//! CSV ingestion of project tables.
//!
//! # CSV Format
//!
//! Headers are required; extra columns are ignored and header names are
//! trimmed before matching.
//!
//! ```text
//! AreaID,Width_mm,Height_mm,PourDate
//! W-01,650,3000,2024-05-01
//! ```
//!
//! Header problems fail the whole load before any row is read. Problems with
//! an individual row are collected as [`RowError`]s and the remaining rows
//! are still processed.

use crate::config::PlanningConfig;
use crate::error::{FormflowError, Result};
use crate::kitting::KittingEngine;
use crate::pour::{PourEvent, PourRecord};
use csv::{ReaderBuilder, StringRecord};
use formflow_utils::dates::parse_date;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

pub const AREA_ID: &str = "AreaID";
pub const WIDTH_MM: &str = "Width_mm";
pub const HEIGHT_MM: &str = "Height_mm";
pub const POUR_DATE: &str = "PourDate";

/// Columns every project table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [AREA_ID, WIDTH_MM, HEIGHT_MM, POUR_DATE];

/// A row that could not be turned into a pour event.
#[derive(Debug)]
pub struct RowError {
    /// 1-based data row, not counting the header line.
    pub row: usize,
    pub area_id: Option<String>,
    pub error: FormflowError,
}

/// Annotated events plus every row that was rejected on the way.
#[derive(Debug, Default)]
pub struct ProjectTable {
    pub events: Vec<PourEvent>,
    pub rejected: Vec<RowError>,
}

impl ProjectTable {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Raw rows read from a CSV source.
#[derive(Debug, Default)]
pub struct ParsedRows {
    /// `(row, record)` pairs in file order.
    pub records: Vec<(usize, PourRecord)>,
    pub rejected: Vec<RowError>,
}

struct ColumnIndex {
    area_id: usize,
    width_mm: usize,
    height_mm: usize,
    pour_date: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| FormflowError::MissingField(name.to_string()))
        };
        Ok(ColumnIndex {
            area_id: find(AREA_ID)?,
            width_mm: find(WIDTH_MM)?,
            height_mm: find(HEIGHT_MM)?,
            pour_date: find(POUR_DATE)?,
        })
    }

    fn parse(&self, record: &StringRecord) -> Result<PourRecord> {
        let area_id = cell(record, self.area_id, AREA_ID)?.to_string();
        let width_mm = number(record, self.width_mm, WIDTH_MM)?;
        let height_mm = number(record, self.height_mm, HEIGHT_MM)?;
        let raw_date = cell(record, self.pour_date, POUR_DATE)?;
        let pour_date = parse_date(raw_date)
            .map_err(|_| FormflowError::DateParse(raw_date.to_string()))?;
        Ok(PourRecord {
            area_id,
            width_mm,
            height_mm,
            pour_date,
        })
    }
}

fn cell<'r>(record: &'r StringRecord, index: usize, name: &str) -> Result<&'r str> {
    match record.get(index).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(FormflowError::MissingField(name.to_string())),
    }
}

fn number(record: &StringRecord, index: usize, name: &str) -> Result<f64> {
    let value = cell(record, index, name)?;
    value.parse::<f64>().map_err(|_| FormflowError::InvalidNumber {
        field: name.to_string(),
        value: value.to_string(),
    })
}

/// Read pour records from any CSV source.
pub fn read_records<R: Read>(reader: R) -> Result<ParsedRows> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut parsed = ParsedRows::default();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable row {}: {}", row, e);
                parsed.rejected.push(RowError {
                    row,
                    area_id: None,
                    error: e.into(),
                });
                continue;
            }
        };
        match columns.parse(&record) {
            Ok(pour) => parsed.records.push((row, pour)),
            Err(error) => {
                let area_id = record
                    .get(columns.area_id)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
                warn!("Skipping row {}: {}", row, error);
                parsed.rejected.push(RowError {
                    row,
                    area_id,
                    error,
                });
            }
        }
    }
    Ok(parsed)
}

/// Kit every record and resolve its release date.
///
/// Only configuration problems fail the call; bad rows and repeated area ids
/// land in [`ProjectTable::rejected`]. The first accepted row for an id wins;
/// a rejected row does not claim its id.
pub fn annotate_records(parsed: ParsedRows, config: &PlanningConfig) -> Result<ProjectTable> {
    let engine = KittingEngine::new(config.kitting.clone())?;
    let mut table = ProjectTable {
        events: Vec::with_capacity(parsed.records.len()),
        rejected: parsed.rejected,
    };
    let mut seen: HashSet<String> = HashSet::new();

    for (row, record) in parsed.records {
        let area_id = record.area_id.clone();
        if seen.contains(&area_id) {
            warn!("Skipping row {}: duplicate area id {}", row, area_id);
            table.rejected.push(RowError {
                row,
                area_id: Some(area_id.clone()),
                error: FormflowError::DuplicateAreaId(area_id),
            });
            continue;
        }
        match PourEvent::annotate(record, &engine, config.buffer_days) {
            Ok(event) => {
                debug!(
                    "{}: {} panels, gap {} mm, {} -> {}",
                    event.area_id(),
                    event.main_panels(),
                    event.waste_gap_mm(),
                    event.pour_date(),
                    event.release_date()
                );
                seen.insert(area_id);
                table.events.push(event);
            }
            Err(error) => {
                warn!("Skipping row {} ({}): {}", row, area_id, error);
                table.rejected.push(RowError {
                    row,
                    area_id: Some(area_id),
                    error,
                });
            }
        }
    }
    table.rejected.sort_by_key(|e| e.row);
    info!(
        "Annotated {} pour events, rejected {} rows",
        table.events.len(),
        table.rejected.len()
    );
    Ok(table)
}

/// Parse and annotate a project table held in memory.
pub fn load_project_str(csv_data: &str, config: &PlanningConfig) -> Result<ProjectTable> {
    let parsed = read_records(csv_data.as_bytes())?;
    annotate_records(parsed, config)
}

/// Parse and annotate a project table from a CSV file.
pub fn load_project<P: AsRef<Path>>(path: P, config: &PlanningConfig) -> Result<ProjectTable> {
    let file = std::fs::File::open(path.as_ref())?;
    info!("Reading project table {}", path.as_ref().display());
    let parsed = read_records(file)?;
    annotate_records(parsed, config)
}
