use crate::error::{FormflowError, Result};
use crate::kitting::{KitManifest, KittingEngine};
use chrono::NaiveDate;
use formflow_utils::dates::add_days;
use serde::{Deserialize, Serialize};

/// One row of the project table as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PourRecord {
    pub area_id: String,
    pub width_mm: f64,
    /// Carried through to reports; panel counts depend on width only.
    pub height_mm: f64,
    pub pour_date: NaiveDate,
}

/// Release date of a pour held for `buffer_days`.
///
/// A pour always occupies its panels for at least the pour day itself, so a
/// zero-day buffer releases on the following day.
pub fn release_date_for(pour_date: NaiveDate, buffer_days: u32) -> Result<NaiveDate> {
    add_days(pour_date, buffer_days.max(1)).ok_or_else(|| {
        FormflowError::InvalidConfig(format!(
            "a {} day buffer from {} runs past the end of the calendar",
            buffer_days, pour_date
        ))
    })
}

/// A pour annotated with its kit and release date.
///
/// The derived fields are computed together in [`PourEvent::annotate`] and
/// never patched afterwards: every `with_*` method re-annotates from scratch
/// and returns a new event.
#[derive(Debug, Clone, PartialEq)]
pub struct PourEvent {
    record: PourRecord,
    buffer_days: u32,
    kit: KitManifest,
    release_date: NaiveDate,
}

impl PourEvent {
    pub fn annotate(record: PourRecord, engine: &KittingEngine, buffer_days: u32) -> Result<Self> {
        if !record.height_mm.is_finite() || record.height_mm <= 0.0 {
            return Err(FormflowError::InvalidGeometry {
                dimension: "height",
                value_mm: record.height_mm,
            });
        }
        let kit = engine.kit(record.width_mm)?;
        let release_date = release_date_for(record.pour_date, buffer_days)?;
        Ok(PourEvent {
            record,
            buffer_days,
            kit,
            release_date,
        })
    }

    pub fn with_width(&self, width_mm: f64, engine: &KittingEngine) -> Result<Self> {
        let record = PourRecord {
            width_mm,
            ..self.record.clone()
        };
        PourEvent::annotate(record, engine, self.buffer_days)
    }

    pub fn with_height(&self, height_mm: f64, engine: &KittingEngine) -> Result<Self> {
        let record = PourRecord {
            height_mm,
            ..self.record.clone()
        };
        PourEvent::annotate(record, engine, self.buffer_days)
    }

    pub fn with_pour_date(&self, pour_date: NaiveDate, engine: &KittingEngine) -> Result<Self> {
        let record = PourRecord {
            pour_date,
            ..self.record.clone()
        };
        PourEvent::annotate(record, engine, self.buffer_days)
    }

    pub fn with_buffer_days(&self, buffer_days: u32, engine: &KittingEngine) -> Result<Self> {
        PourEvent::annotate(self.record.clone(), engine, buffer_days)
    }

    pub fn record(&self) -> &PourRecord {
        &self.record
    }

    pub fn area_id(&self) -> &str {
        &self.record.area_id
    }

    pub fn width_mm(&self) -> f64 {
        self.record.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.record.height_mm
    }

    pub fn pour_date(&self) -> NaiveDate {
        self.record.pour_date
    }

    pub fn buffer_days(&self) -> u32 {
        self.buffer_days
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn kit(&self) -> &KitManifest {
        &self.kit
    }

    pub fn main_panels(&self) -> u32 {
        self.kit.main_panels
    }

    pub fn waste_gap_mm(&self) -> u32 {
        self.kit.waste_gap_mm
    }
}
