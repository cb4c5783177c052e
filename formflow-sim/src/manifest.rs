use chrono::NaiveDate;
use formflow_core::pour::PourEvent;
use serde::Serialize;

/// One line of the daily dispatch manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRow {
    #[serde(rename = "AreaID")]
    pub area_id: String,
    #[serde(rename = "PourDate")]
    pub pour_date: NaiveDate,
    #[serde(rename = "ReleaseDate")]
    pub release_date: NaiveDate,
    #[serde(rename = "Main_Panels")]
    pub main_panels: u32,
    #[serde(rename = "Props")]
    pub props: u32,
    #[serde(rename = "Accessories")]
    pub accessories: u32,
}

/// Kits to deliver, ordered by pour date and then area id.
pub fn dispatch_manifest(events: &[PourEvent]) -> Vec<DispatchRow> {
    let mut rows: Vec<DispatchRow> = events
        .iter()
        .map(|e| DispatchRow {
            area_id: e.area_id().to_string(),
            pour_date: e.pour_date(),
            release_date: e.release_date(),
            main_panels: e.kit().main_panels,
            props: e.kit().props,
            accessories: e.kit().accessories,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.pour_date
            .cmp(&b.pour_date)
            .then_with(|| a.area_id.cmp(&b.area_id))
    });
    rows
}
