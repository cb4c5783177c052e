use crate::timeline::{ActiveInterval, InventoryTimeline};
use chrono::NaiveDate;
use serde::Serialize;

/// Fleet sizing figures for one project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandSummary {
    /// Most panels on site on any single day; the fleet to buy or rent.
    pub peak_demand: u64,
    /// Panels needed if no wall ever reused another wall's panels.
    pub total_linear_need: u64,
    /// Share of the naive total saved by reuse. 0.0 for an empty project.
    pub savings_pct: f64,
    pub peak_date: Option<NaiveDate>,
}

impl DemandSummary {
    pub fn new<E: ActiveInterval>(events: &[E], timeline: &InventoryTimeline) -> Self {
        let total_linear_need: u64 = events.iter().map(|e| u64::from(e.main_panels())).sum();
        let peak_demand = timeline.peak_demand();
        let mut summary = DemandSummary {
            peak_demand,
            total_linear_need,
            savings_pct: 0.0,
            peak_date: timeline.peak_date(),
        };
        if total_linear_need > 0 {
            summary.savings_pct =
                summary.panels_saved() as f64 / total_linear_need as f64 * 100.0;
        }
        summary
    }

    /// Panels that never have to be procured thanks to reuse.
    pub fn panels_saved(&self) -> u64 {
        self.total_linear_need.saturating_sub(self.peak_demand)
    }

    /// Manufacturing emissions avoided by not procuring [`Self::panels_saved`].
    pub fn carbon_offset_kg(&self, co2_kg_per_panel: f64) -> f64 {
        self.panels_saved() as f64 * co2_kg_per_panel
    }
}
