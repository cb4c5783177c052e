//! Console rendering of planning results.

use crate::plan::PlanOutcome;
use formflow_core::config::{KittingConfig, PlanningConfig};
use formflow_core::ingest::RowError;
use formflow_core::kitting::KitManifest;
use formflow_sim::standardization::StandardizationReport;
use formflow_utils::dates::format_date;

const RULE_WIDTH: usize = 50;

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// One line per rejected row.
pub fn render_rejections(rejected: &[RowError]) -> String {
    rejected
        .iter()
        .map(|e| match &e.area_id {
            Some(id) => format!("  row {} ({}): {}", e.row, id, e.error),
            None => format!("  row {}: {}", e.row, e.error),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_alert(standards: &StandardizationReport) -> Vec<String> {
    if standards.is_fully_aligned() {
        vec!["All walls align to the standard module.".to_string()]
    } else if standards.design_alert() {
        vec![
            format!(
                "DESIGN ALERT: {} segments need {:.2} m of custom timber filler.",
                standards.segments.len(),
                standards.total_gap_m()
            ),
            format!("Recommendation: {}", standards.recommendation()),
        ]
    } else {
        vec![format!(
            "{} segments need {} mm of filler in total.",
            standards.segments.len(),
            standards.total_gap_mm
        )]
    }
}

pub fn render_plan(outcome: &PlanOutcome, config: &PlanningConfig) -> String {
    let summary = &outcome.summary;
    let mut lines = vec![
        rule('='),
        "           FORMWORK FLEET PLAN".to_string(),
        rule('='),
        format!(
            "Pour events:                  {} ({} rejected)",
            outcome.table.events.len(),
            outcome.table.rejected.len()
        ),
        format!("Reconditioning buffer:        {} days", config.buffer_days),
    ];
    if let (Some(first), Some(last)) = (
        outcome.timeline.snapshots().first(),
        outcome.timeline.snapshots().last(),
    ) {
        lines.push(format!(
            "Simulated window:             {} to {}",
            format_date(&first.date),
            format_date(&last.date)
        ));
    }
    lines.push(format!(
        "Total Individual Wall Demand: {} Panels",
        summary.total_linear_need
    ));
    lines.push(match summary.peak_date {
        Some(date) => format!(
            "Optimized Peak Fleet Needed:  {} Panels (first reached {})",
            summary.peak_demand,
            format_date(&date)
        ),
        None => format!("Optimized Peak Fleet Needed:  {} Panels", summary.peak_demand),
    });
    lines.push(format!(
        "Reduction in Capital Outlay:  {:.1}%",
        summary.savings_pct
    ));
    lines.push(format!(
        "Carbon Offset:                {:.0} kg CO2",
        summary.carbon_offset_kg(config.co2_kg_per_panel)
    ));
    lines.push(rule('-'));
    lines.extend(render_alert(&outcome.standards));
    if !outcome.table.rejected.is_empty() {
        lines.push(rule('-'));
        lines.push("Rejected rows:".to_string());
        lines.push(render_rejections(&outcome.table.rejected));
    }
    lines.push(rule('='));
    lines.join("\n")
}

pub fn render_standards(standards: &StandardizationReport) -> String {
    let mut lines = vec![format!(
        "Design standardization report ({} mm module)",
        standards.module_width_mm
    )];
    for segment in &standards.segments {
        lines.push(format!(
            "  {:<12} width {:>8} mm  gap {:>4} mm",
            segment.area_id, segment.width_mm, segment.waste_gap_mm
        ));
    }
    lines.extend(render_alert(standards));
    lines.join("\n")
}

pub fn render_kit(
    width_mm: f64,
    height_mm: Option<f64>,
    kit: &KitManifest,
    kitting: &KittingConfig,
) -> String {
    let size = match height_mm {
        Some(height) => format!("{} x {} mm", width_mm, height),
        None => format!("{} mm wide", width_mm),
    };
    let accessory_names = kitting
        .accessories
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ");
    [
        format!("Kit for {} wall ({} mm module)", size, kitting.module_width_mm),
        format!("  Main panels:  {}", kit.main_panels),
        format!("  Props:        {}", kit.props),
        format!("  Accessories:  {} ({})", kit.accessories, accessory_names),
        format!("  Filler gap:   {} mm", kit.waste_gap_mm),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{plan_project, PlanOptions};
    use formflow_core::ingest::load_project_str;
    use formflow_core::kitting::KittingEngine;

    const PROJECT_CSV: &str = include_str!("../../fixtures/project_data.csv");

    #[test]
    fn test_render_plan() {
        let config = PlanningConfig::default();
        let table = load_project_str(PROJECT_CSV, &config).unwrap();
        let outcome = plan_project(table, &config, &PlanOptions::default()).unwrap();
        let text = render_plan(&outcome, &config);
        assert!(text.contains("Total Individual Wall Demand: 37 Panels"));
        assert!(text.contains("Optimized Peak Fleet Needed:  12 Panels (first reached 2024-05-03)"));
        assert!(text.contains("Reduction in Capital Outlay:  67.6%"));
        assert!(text.contains("Carbon Offset:                625 kg CO2"));
        assert!(text.contains("Simulated window:             2024-05-01 to 2024-05-23"));
        assert!(text.contains("DESIGN ALERT: 5 segments need 2.15 m of custom timber filler."));
        assert!(!text.contains("Rejected rows"));
    }

    #[test]
    fn test_render_empty_plan() {
        let config = PlanningConfig::default();
        let table = load_project_str("AreaID,Width_mm,Height_mm,PourDate\n", &config).unwrap();
        let outcome = plan_project(table, &config, &PlanOptions::default()).unwrap();
        let text = render_plan(&outcome, &config);
        assert!(text.contains("Optimized Peak Fleet Needed:  0 Panels\n"));
        assert!(text.contains("Reduction in Capital Outlay:  0.0%"));
        assert!(!text.contains("Simulated window"));
    }

    #[test]
    fn test_render_rejections() {
        let config = PlanningConfig::default();
        let csv = "AreaID,Width_mm,Height_mm,PourDate\nA,0,3000,2024-05-01\n,600,3000,2024-05-01\n";
        let table = load_project_str(csv, &config).unwrap();
        let text = render_rejections(&table.rejected);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  row 1 (A): Invalid geometry"));
        assert_eq!(lines[1], "  row 2: Missing required field: AreaID");
    }

    #[test]
    fn test_render_kit() {
        let kitting = KittingConfig::simplified();
        let kit = KittingEngine::new(kitting.clone()).unwrap().kit(650.0).unwrap();
        let text = render_kit(650.0, Some(3000.0), &kit, &kitting);
        assert!(text.starts_with("Kit for 650 x 3000 mm wall (600 mm module)"));
        assert!(text.contains("Accessories:  16 (Fasteners)"));
        assert!(text.contains("Filler gap:   550 mm"));
    }
}
