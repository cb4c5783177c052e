//! Design standardisation report.
//!
//! Walls whose width is not a whole number of panel modules need custom
//! timber filler. This collects those walls and totals the filler.

use formflow_core::pour::PourEvent;
use log::warn;
use serde::Serialize;

/// A wall that does not align to the panel module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MisalignedSegment {
    #[serde(rename = "AreaID")]
    pub area_id: String,
    #[serde(rename = "Width_mm")]
    pub width_mm: f64,
    #[serde(rename = "Gap_mm")]
    pub waste_gap_mm: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardizationReport {
    pub module_width_mm: u32,
    pub segments: Vec<MisalignedSegment>,
    pub total_gap_mm: u64,
    pub alert_threshold_mm: u64,
}

impl StandardizationReport {
    pub fn new(events: &[PourEvent], module_width_mm: u32, alert_threshold_mm: u64) -> Self {
        let segments: Vec<MisalignedSegment> = events
            .iter()
            .filter(|e| e.waste_gap_mm() > 0)
            .map(|e| MisalignedSegment {
                area_id: e.area_id().to_string(),
                width_mm: e.width_mm(),
                waste_gap_mm: e.waste_gap_mm(),
            })
            .collect();
        let total_gap_mm = segments.iter().map(|s| u64::from(s.waste_gap_mm)).sum();
        let report = StandardizationReport {
            module_width_mm,
            segments,
            total_gap_mm,
            alert_threshold_mm,
        };
        if report.design_alert() {
            warn!(
                "{} segments need {:.2} m of custom filler",
                report.segments.len(),
                report.total_gap_m()
            );
        }
        report
    }

    /// True when every wall is a whole number of modules wide.
    pub fn is_fully_aligned(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_gap_m(&self) -> f64 {
        self.total_gap_mm as f64 / 1000.0
    }

    /// Filler total exceeds the configured threshold.
    pub fn design_alert(&self) -> bool {
        self.total_gap_mm > self.alert_threshold_mm
    }

    /// Recommendation printed alongside the alert.
    pub fn recommendation(&self) -> String {
        format!(
            "Standardize wall widths to multiples of {}mm.",
            self.module_width_mm
        )
    }
}
