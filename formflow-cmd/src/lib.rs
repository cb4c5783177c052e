//! Command implementations for the FormFlow CLI.
//!
//! Provides subcommands for planning a panel fleet from a project CSV,
//! kitting a single wall, and exporting the standardisation report and
//! dispatch manifest.

use clap::{Args, Subcommand};
use formflow_core::config::{KittingConfig, PlanningConfig};

pub mod plan;
pub mod report;

/// Planning options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanningArgs {
    /// JSON planning configuration; the flags below override it
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// Curing/reconditioning buffer in days
    #[arg(short = 'b', long)]
    pub buffer_days: Option<u32>,

    /// Standard panel width in millimetres
    #[arg(short = 'm', long)]
    pub module_width: Option<u32>,

    /// Count accessories with the single combined fastener multiplier
    #[arg(long)]
    pub simplified_fasteners: bool,

    /// Manufacturing CO2 per panel, in kg
    #[arg(long)]
    pub co2_per_panel: Option<f64>,

    /// Trailing zero days appended to the exported timeline
    #[arg(long)]
    pub padding_days: Option<u32>,
}

impl PlanningArgs {
    /// Build the effective configuration: defaults, then the config file,
    /// then command line flags.
    pub fn resolve(&self) -> anyhow::Result<PlanningConfig> {
        let mut config = match &self.config {
            Some(path) => PlanningConfig::load(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e))?,
            None => PlanningConfig::default(),
        };
        if self.simplified_fasteners {
            config.kitting.accessories = KittingConfig::simplified().accessories;
        }
        if let Some(days) = self.buffer_days {
            config.buffer_days = days;
        }
        if let Some(width) = self.module_width {
            config.kitting.module_width_mm = width;
        }
        if let Some(co2) = self.co2_per_panel {
            config.co2_kg_per_panel = co2;
        }
        if let Some(days) = self.padding_days {
            config.display_padding_days = days;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Simulate the pour schedule and report the peak panel fleet
    Plan {
        /// Project CSV with AreaID, Width_mm, Height_mm, PourDate columns
        #[arg(short = 'p', long)]
        project_csv: String,

        #[command(flatten)]
        planning: PlanningArgs,

        /// Write the daily panels-in-use series to this CSV
        #[arg(short = 't', long)]
        timeline_csv: Option<String>,

        /// Fail if any row is rejected instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Fail if the project has no valid pour events
        #[arg(long)]
        require_events: bool,

        /// Use the day-by-day reference scan instead of the sweep line
        #[arg(long)]
        day_scan: bool,
    },

    /// Print the bill of materials for a single wall
    Kit {
        /// Wall width in millimetres
        #[arg(short = 'w', long)]
        width_mm: f64,

        /// Wall height in millimetres
        #[arg(long)]
        height_mm: Option<f64>,

        #[command(flatten)]
        planning: PlanningArgs,
    },

    /// Report walls that do not align to the panel module
    Standards {
        /// Project CSV with AreaID, Width_mm, Height_mm, PourDate columns
        #[arg(short = 'p', long)]
        project_csv: String,

        #[command(flatten)]
        planning: PlanningArgs,

        /// Also write the misaligned segments to this CSV
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Write the dispatch manifest (stdout when no output path is given)
    Manifest {
        /// Project CSV with AreaID, Width_mm, Height_mm, PourDate columns
        #[arg(short = 'p', long)]
        project_csv: String,

        #[command(flatten)]
        planning: PlanningArgs,

        /// Output path for the manifest CSV
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Plan {
            project_csv,
            planning,
            timeline_csv,
            strict,
            require_events,
            day_scan,
        } => {
            let options = plan::PlanOptions {
                timeline_csv,
                strict,
                require_events,
                day_scan,
            };
            plan::run_plan(&project_csv, &planning.resolve()?, &options)
        }
        Command::Kit {
            width_mm,
            height_mm,
            planning,
        } => plan::run_kit(width_mm, height_mm, &planning.resolve()?),
        Command::Standards {
            project_csv,
            planning,
            output,
        } => plan::run_standards(&project_csv, &planning.resolve()?, output.as_deref()),
        Command::Manifest {
            project_csv,
            planning,
            output,
        } => plan::run_manifest(&project_csv, &planning.resolve()?, output.as_deref()),
    }
}
