//! Dataset descriptors, loaded from `datasets.hcl`.
//!
//! ```hcl
//! version = 1
//!
//! dataset "stadiums" {
//!   url    = "https://example.com/stadiums.csv"
//!   folder = "data-csv"
//!   file   = "data.csv"
//!   report = "results_csv.txt"
//!   column = 4
//! }
//! ```
//!
//! `kind` is optional and deduced from `file` when absent.
//!

use std::collections::BTreeMap;

use serde::Deserialize;

use harvest_common::{Kind, Versioned};
use harvest_formats::{SummaryOptions, DEF_COLUMN, DEF_FIELD};

/// Config filename
pub const CONFIG: &str = "datasets.hcl";
/// Current version
pub const CVERSION: usize = 1;

/// Embedded default configuration, installed by `init`.
pub const DEF_CONFIG: &str = include_str!("datasets.hcl");

/// One dataset: where it comes from, where it goes.
///
#[derive(Clone, Debug, Deserialize)]
pub struct Dataset {
    /// Explicit kind, otherwise deduced from `file`
    pub kind: Option<Kind>,
    /// Remote location
    pub url: String,
    /// Folder under the data directory
    pub folder: String,
    /// Artifact name
    pub file: String,
    /// Report name
    pub report: String,
    /// Category column for delimited data
    pub column: Option<usize>,
    /// Numeric column for tabular data
    pub field: Option<String>,
}

impl Dataset {
    pub fn kind(&self) -> Kind {
        self.kind.unwrap_or_else(|| Kind::from_filename(&self.file))
    }

    pub fn options(&self) -> SummaryOptions {
        SummaryOptions {
            column: self.column.unwrap_or(DEF_COLUMN),
            field: self.field.clone().unwrap_or_else(|| DEF_FIELD.to_string()),
        }
    }
}

/// Content of `datasets.hcl`.
///
#[derive(Debug, Default, Deserialize)]
pub struct DatasetsConfig {
    /// File format version
    pub version: usize,
    /// All datasets, by name
    #[serde(default)]
    pub dataset: BTreeMap<String, Dataset>,
}

impl Versioned for DatasetsConfig {
    const VERSION: usize = CVERSION;

    fn version(&self) -> usize {
        self.version
    }
}

impl DatasetsConfig {
    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.dataset.get(name)
    }
}
