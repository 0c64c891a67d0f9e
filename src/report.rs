use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;
use serde::Serialize;

use crate::store::Report;
use crate::types::{Device, Interface, Module, Neighbor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Csv,
    Yaml,
}

impl Format {
    pub(crate) const NAMES: [&'static str; 2] = ["csv", "yaml"];

    pub(crate) fn from_name(name: &str) -> Option<Format> {
        match name {
            "csv" => Some(Format::Csv),
            "yaml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

pub(crate) fn write(report: &Report, format: Format, output: &Path) -> Result<(), anyhow::Error> {
    info!("{} devices", report.devices.len());
    info!("{} interfaces", report.interfaces.len());
    info!("{} neighbors", report.neighbors.len());
    info!("{} modules", report.modules.len());

    match format {
        Format::Csv => write_csv(report, output),
        Format::Yaml => write_yaml(report, output),
    }
}

/// Writes one CSV file per sheet into the `output` dir, skipping empty sheets.
fn write_csv(report: &Report, output: &Path) -> Result<(), anyhow::Error> {
    fs::create_dir_all(output).context("Creating output dir")?;

    write_sheet(&output.join("System.csv"), &Device::COLUMNS, &report.devices)?;
    write_sheet(&output.join("Interfaces.csv"), &Interface::COLUMNS, &report.interfaces)?;
    write_sheet(&output.join("CDP neighbors.csv"), &Neighbor::COLUMNS, &report.neighbors)?;
    write_sheet(&output.join("Modules.csv"), &Module::COLUMNS, &report.modules)
}

fn write_sheet<T: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: &[T],
) -> Result<(), anyhow::Error> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Creating {}", path.display()))?;
    writer
        .write_record(columns)
        .with_context(|| format!("Writing {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Writing {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Writing {}", path.display()))?;

    Ok(())
}

fn write_yaml(report: &Report, output: &Path) -> Result<(), anyhow::Error> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Creating output dir")?;
    }

    let file = fs::File::create(output)
        .with_context(|| format!("Creating {}", output.display()))?;
    serde_yaml::to_writer(file, report).with_context(|| format!("Writing {}", output.display()))
}
