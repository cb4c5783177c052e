//! CSV writers for the computed tables.
//!
//! - **Timeline**: `date,panels_in_use`
//! - **Dispatch manifest**: `AreaID,PourDate,ReleaseDate,Main_Panels,Props,Accessories`
//! - **Misaligned segments**: `AreaID,Width_mm,Gap_mm`

use crate::manifest::DispatchRow;
use crate::standardization::MisalignedSegment;
use crate::timeline::DailyInventorySnapshot;
use formflow_core::error::Result;
use serde::Serialize;
use std::io::Write;

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_timeline<W: Write>(writer: W, snapshots: &[DailyInventorySnapshot]) -> Result<()> {
    write_rows(writer, snapshots)
}

pub fn write_manifest<W: Write>(writer: W, rows: &[DispatchRow]) -> Result<()> {
    write_rows(writer, rows)
}

pub fn write_segments<W: Write>(writer: W, segments: &[MisalignedSegment]) -> Result<()> {
    write_rows(writer, segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::dispatch_manifest;
    use crate::timeline::DemandSimulator;
    use formflow_core::config::PlanningConfig;
    use formflow_core::ingest::load_project_str;

    const CSV: &str = "AreaID,Width_mm,Height_mm,PourDate\nA,650,3000,2024-05-01\nB,600,3000,2024-05-03\n";

    #[test]
    fn test_timeline_csv() {
        let table = load_project_str(CSV, &PlanningConfig::default()).unwrap();
        let timeline = DemandSimulator::default().simulate(&table.events).unwrap();
        let mut out = Vec::new();
        write_timeline(&mut out, timeline.snapshots()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,panels_in_use");
        assert_eq!(lines[1], "2024-05-01,2");
        assert_eq!(lines[3], "2024-05-03,3");
        assert_eq!(lines.len(), 1 + 5);
    }

    #[test]
    fn test_manifest_csv() {
        let table = load_project_str(CSV, &PlanningConfig::default()).unwrap();
        let mut out = Vec::new();
        write_manifest(&mut out, &dispatch_manifest(&table.events)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("AreaID,PourDate,ReleaseDate,Main_Panels,Props,Accessories")
        );
        assert_eq!(lines.next(), Some("A,2024-05-01,2024-05-04,2,5,32"));
        assert_eq!(lines.next(), Some("B,2024-05-03,2024-05-06,1,3,16"));
    }
}
