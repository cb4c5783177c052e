//! Geometric kitting: wall width to bill of materials.
//!
//! Panels are rigid fixed-width units, so a wall always takes the ceiling of
//! `width / module` panels; whatever the last panel overhangs has to be made
//! up with custom filler, reported as the waste gap.

use crate::config::KittingConfig;
use crate::error::{FormflowError, Result};
use serde::{Deserialize, Serialize};

/// Bill of materials for a single wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KitManifest {
    pub main_panels: u32,
    pub props: u32,
    pub accessories: u32,
    /// Filler width in whole millimetres, always below the module width.
    pub waste_gap_mm: u32,
}

/// Stateless calculator over a validated [`KittingConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct KittingEngine {
    config: KittingConfig,
}

impl KittingEngine {
    /// Validate the configuration once so per-wall calls can only fail on
    /// the wall itself.
    pub fn new(config: KittingConfig) -> Result<Self> {
        config.validate()?;
        Ok(KittingEngine { config })
    }

    pub fn config(&self) -> &KittingConfig {
        &self.config
    }

    pub fn module_width_mm(&self) -> u32 {
        self.config.module_width_mm
    }

    /// Compute the kit for a wall `width_mm` wide.
    pub fn kit(&self, width_mm: f64) -> Result<KitManifest> {
        if !width_mm.is_finite() || width_mm <= 0.0 {
            return Err(FormflowError::InvalidGeometry {
                dimension: "width",
                value_mm: width_mm,
            });
        }
        let module = f64::from(self.config.module_width_mm);
        let panels = (width_mm / module).ceil();
        if panels > f64::from(u32::MAX) {
            return Err(FormflowError::InvalidGeometry {
                dimension: "width",
                value_mm: width_mm,
            });
        }
        let main_panels = panels as u32;

        Ok(KitManifest {
            main_panels,
            props: per_panel_count(main_panels, self.config.props_per_panel, width_mm)?,
            accessories: per_panel_count(
                main_panels,
                self.config.accessories_per_panel(),
                width_mm,
            )?,
            waste_gap_mm: waste_gap_mm(width_mm, self.config.module_width_mm),
        })
    }
}

/// Whole units for `main_panels` at `multiplier` each, rounded up.
fn per_panel_count(main_panels: u32, multiplier: f64, width_mm: f64) -> Result<u32> {
    let count = (f64::from(main_panels) * multiplier).ceil();
    if count > f64::from(u32::MAX) {
        return Err(FormflowError::InvalidGeometry {
            dimension: "width",
            value_mm: width_mm,
        });
    }
    Ok(count as u32)
}

/// `(module - width mod module) mod module`, rounded up to a whole millimetre.
///
/// Zero exactly when `width_mm` is a multiple of the module; otherwise at
/// least 1 and at most `module_width_mm - 1`.
pub fn waste_gap_mm(width_mm: f64, module_width_mm: u32) -> u32 {
    let module = f64::from(module_width_mm);
    let remainder = width_mm % module;
    if remainder == 0.0 {
        return 0;
    }
    let gap = (module - remainder).ceil() as u32;
    gap.min(module_width_mm.saturating_sub(1))
}
