//! Planning configuration.
//!
//! Every policy value the calculations depend on lives in [`PlanningConfig`]
//! and is passed in explicitly. Any subset of fields can be supplied from a
//! JSON file; the rest fall back to the defaults below.
//!
//! ```text
//! {
//!   "buffer_days": 4,
//!   "kitting": {
//!     "module_width_mm": 600,
//!     "props_per_panel": 2.5,
//!     "accessories": [{ "name": "Fasteners", "per_panel": 8.0 }]
//!   }
//! }
//! ```

use crate::error::{FormflowError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Standard panel width in millimetres.
pub const DEFAULT_MODULE_WIDTH_MM: u32 = 600;

/// Days a panel stays on the wall after the pour before it can be reused.
pub const DEFAULT_BUFFER_DAYS: u32 = 3;

pub const DEFAULT_PROPS_PER_PANEL: f64 = 2.5;
pub const DEFAULT_TIE_RODS_PER_PANEL: f64 = 4.0;
pub const DEFAULT_CLAMPS_PER_PANEL: f64 = 12.0;

/// Combined fastener multiplier of the simplified kit.
pub const SIMPLIFIED_FASTENERS_PER_PANEL: f64 = 8.0;

/// Embodied carbon of manufacturing one panel, in kg CO2.
pub const DEFAULT_CO2_KG_PER_PANEL: f64 = 25.0;

/// Total filler width above which the design alert fires.
pub const DEFAULT_WASTE_ALERT_THRESHOLD_MM: u64 = 1000;

/// One accessory line of a kit, counted per main panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryRate {
    pub name: String,
    pub per_panel: f64,
}

impl AccessoryRate {
    pub fn new(name: &str, per_panel: f64) -> Self {
        AccessoryRate {
            name: name.to_string(),
            per_panel,
        }
    }
}

/// Geometry and multipliers used to turn a wall width into a kit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KittingConfig {
    pub module_width_mm: u32,
    pub props_per_panel: f64,
    /// Accessory lines summed into a single accessory count per wall.
    pub accessories: Vec<AccessoryRate>,
}

impl Default for KittingConfig {
    /// Full system kit: tie rods and clamps counted separately.
    fn default() -> Self {
        KittingConfig {
            module_width_mm: DEFAULT_MODULE_WIDTH_MM,
            props_per_panel: DEFAULT_PROPS_PER_PANEL,
            accessories: vec![
                AccessoryRate::new("Tie_Rods", DEFAULT_TIE_RODS_PER_PANEL),
                AccessoryRate::new("Clamps", DEFAULT_CLAMPS_PER_PANEL),
            ],
        }
    }
}

impl KittingConfig {
    /// Kit with a single combined "Fasteners" line.
    pub fn simplified() -> Self {
        KittingConfig {
            accessories: vec![AccessoryRate::new(
                "Fasteners",
                SIMPLIFIED_FASTENERS_PER_PANEL,
            )],
            ..KittingConfig::default()
        }
    }

    /// Sum of every accessory multiplier.
    pub fn accessories_per_panel(&self) -> f64 {
        self.accessories.iter().map(|rate| rate.per_panel).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.module_width_mm == 0 {
            return Err(FormflowError::InvalidConfig(
                "module_width_mm must be greater than zero".to_string(),
            ));
        }
        check_multiplier("props_per_panel", self.props_per_panel)?;
        for rate in &self.accessories {
            check_multiplier(&rate.name, rate.per_panel)?;
        }
        Ok(())
    }
}

fn check_multiplier(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FormflowError::InvalidConfig(format!(
            "{} must be a finite non-negative multiplier, got {}",
            name, value
        )))
    }
}

/// Everything a planning run needs besides the project table itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub kitting: KittingConfig,
    /// Curing/reconditioning buffer applied to every pour.
    pub buffer_days: u32,
    pub co2_kg_per_panel: f64,
    /// Trailing zero days appended to the timeline for charting.
    pub display_padding_days: u32,
    pub waste_alert_threshold_mm: u64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        PlanningConfig {
            kitting: KittingConfig::default(),
            buffer_days: DEFAULT_BUFFER_DAYS,
            co2_kg_per_panel: DEFAULT_CO2_KG_PER_PANEL,
            display_padding_days: 0,
            waste_alert_threshold_mm: DEFAULT_WASTE_ALERT_THRESHOLD_MM,
        }
    }
}

impl PlanningConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlanningConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        PlanningConfig::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.kitting.validate()?;
        check_multiplier("co2_kg_per_panel", self.co2_kg_per_panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let config = PlanningConfig::default();
        assert_eq!(config.kitting.module_width_mm, 600);
        assert_eq!(config.buffer_days, 3);
        assert_eq!(config.kitting.props_per_panel, 2.5);
        assert_eq!(config.kitting.accessories_per_panel(), 16.0);
        assert_eq!(config.co2_kg_per_panel, 25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simplified_kit_uses_single_fastener_line() {
        let kitting = KittingConfig::simplified();
        assert_eq!(kitting.accessories.len(), 1);
        assert_eq!(kitting.accessories[0].name, "Fasteners");
        assert_eq!(kitting.accessories_per_panel(), 8.0);
        assert_eq!(kitting.module_width_mm, DEFAULT_MODULE_WIDTH_MM);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            PlanningConfig::from_json_str(r#"{ "buffer_days": 5, "kitting": { "module_width_mm": 450 } }"#)
                .unwrap();
        assert_eq!(config.buffer_days, 5);
        assert_eq!(config.kitting.module_width_mm, 450);
        assert_eq!(config.kitting.props_per_panel, 2.5);
        assert_eq!(config.kitting.accessories.len(), 2);
        assert_eq!(config.co2_kg_per_panel, 25.0);
    }

    #[test]
    fn test_zero_module_width_is_config_error() {
        let result = PlanningConfig::from_json_str(r#"{ "kitting": { "module_width_mm": 0 } }"#);
        assert!(matches!(result, Err(FormflowError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let mut kitting = KittingConfig::default();
        kitting.accessories.push(AccessoryRate::new("Wedges", -1.0));
        assert!(matches!(
            kitting.validate(),
            Err(FormflowError::InvalidConfig(_))
        ));

        let mut config = PlanningConfig::default();
        config.co2_kg_per_panel = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let result = PlanningConfig::from_json_str("{ buffer_days: ");
        assert!(matches!(result, Err(FormflowError::Json(_))));
    }
}
