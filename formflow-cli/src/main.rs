//! FormFlow CLI - size a shared formwork panel fleet from a pour schedule.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "formflow",
    version,
    about = "Formwork panel fleet planner"
)]
struct Cli {
    #[command(subcommand)]
    command: formflow_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("formflow {}", env!("CARGO_PKG_VERSION"));
    formflow_cmd::run(cli.command)
}
