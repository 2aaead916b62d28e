//! JSON table input and report output.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geothin_core::models::{CompositionRow, RecordRow, ThinningInput, ThinningSummary};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Survivors plus run summary, as written to `--output`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub survivors: &'a [RecordRow],
    pub summary: &'a ThinningSummary,
}

fn read_table<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {what} table {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {what} table {}", path.display()))
}

pub fn read_input(records: &Path, compositions: &Path) -> Result<ThinningInput> {
    Ok(ThinningInput {
        records: read_table::<RecordRow>(records, "record")?,
        compositions: read_table::<CompositionRow>(compositions, "composition")?,
    })
}

pub fn write_report(path: &Path, report: &Report<'_>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("serializing report")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
