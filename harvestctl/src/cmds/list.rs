//! `list` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

use harvest_common::Storage;

use crate::DatasetsConfig;

/// Fetch the list of supported formats and their description.
///
pub fn list_formats() -> Result<String> {
    harvest_formats::list()
}

/// Table of all configured datasets, with their artifact and report locations.
///
pub fn list_datasets(cfg: &DatasetsConfig, storage: &Storage) -> Result<String> {
    let mut builder = Builder::default();
    builder.push_record(["Name", "Kind", "URL", "Artifact", "Report"]);

    cfg.dataset.iter().for_each(|(name, ds)| {
        builder.push_record([
            name.clone(),
            ds.kind().to_string(),
            ds.url.clone(),
            storage.path(&ds.folder, &ds.file).display().to_string(),
            storage.path(&ds.folder, &ds.report).display().to_string(),
        ]);
    });

    let table = builder.build().with(Style::rounded()).to_string();
    Ok(format!("Listing all datasets:\n{table}"))
}
