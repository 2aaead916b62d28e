//! `geothin` command-line entry point.

mod cli;
mod io;

use anyhow::{Context, Result};
use clap::Parser;
use geothin_core::errors::ThinningErrorCode;
use geothin_core::tracing::init_tracing;
use geothin_core::ThinningConfig;
use geothin_engine::ThinningEngine;
use tracing::info;

use crate::cli::Cli;
use crate::io::{read_input, write_report, Report};

/// Keep the stable error code in the top-level message.
fn coded<E: ThinningErrorCode + std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!(e.coded_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ThinningConfig::load(cli.config.as_deref(), Some(&cli.overrides())).map_err(coded)?;
    init_tracing(config.logging.effective_level());

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let params = config.resolve().map_err(coded)?;
    let engine = ThinningEngine::new(params).map_err(coded)?;

    let (records, compositions) = cli
        .tables()
        .context("--records and --compositions are required")?;
    let input = read_input(records, compositions)?;
    info!(
        records = input.records.len(),
        compositions = input.compositions.len(),
        "tables loaded"
    );

    let outcome = engine.run(&input).map_err(coded).context("thinning failed")?;
    let summary = &outcome.summary;

    match &cli.output {
        Some(path) => {
            write_report(
                path,
                &Report {
                    survivors: &outcome.survivors,
                    summary,
                },
            )?;
            info!(path = %path.display(), survivors = summary.retained, "report written");
        }
        None => println!("{}", serde_json::to_string_pretty(summary)?),
    }

    info!(
        removed = summary.removed,
        removed_pct = summary.removed_pct,
        elapsed_ms = summary.elapsed_ms,
        "removed {} of {} records ({:.2}%)",
        summary.removed,
        summary.total,
        summary.removed_pct
    );
    Ok(())
}
