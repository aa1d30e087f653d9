//! Summarizers for the four artifact formats.
//!
//! Each format gets its own module with the parsing and the statistic it computes.  They all
//! implement `Summarizer`: `summarize()` turns the artifact bytes into the report text and is
//! pure, `run()` glues it to `Storage` by reading the artifact and writing the report.
//!
//! To add a format, add a `Kind` variant, a module here with its `Summarizer` and an entry in
//! `formats.hcl`.
//!

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::PathBuf;

use serde::Deserialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, error, info};

use harvest_common::{Kind, Storage};

pub use delimited::*;
pub use error::*;
pub use structured::*;
pub use tabular::*;
pub use text::*;

mod delimited;
mod error;
mod structured;
mod tabular;
mod text;

/// Current formats.hcl version
///
const FVERSION: usize = 1;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Compute a report from an artifact.
///
pub trait Summarizer: Debug {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Compute the report text from the artifact content.  Must be deterministic.
    fn summarize(&self, data: &[u8]) -> Result<String, DataFormatError>;

    /// Read `folder/artifact`, summarize it and write `folder/report`.
    ///
    /// The report is only written if the whole computation succeeded.
    ///
    #[tracing::instrument(skip(self, storage))]
    fn run(
        &self,
        storage: &Storage,
        folder: &str,
        artifact: &str,
        report: &str,
    ) -> Result<PathBuf, SummaryError> {
        let data = storage.read(folder, artifact)?;

        let text = self.summarize(&data).map_err(|e| {
            error!("{}: can not summarize {}: {}", self.name(), artifact, e);
            e
        })?;
        debug!("{}: {} bytes of report", self.name(), text.len());

        let path = storage.write_atomic(folder, report, &text)?;
        info!("{} report for {} written", self.name(), artifact);
        Ok(path)
    }
}

/// Per-dataset knobs for the summarizers that have any.
///
#[derive(Clone, Debug)]
pub struct SummaryOptions {
    /// Category column for delimited data
    pub column: usize,
    /// Numeric column for tabular data
    pub field: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            column: DEF_COLUMN,
            field: DEF_FIELD.to_string(),
        }
    }
}

/// Return the summarizer for `kind`.
///
pub fn summarizer(kind: Kind, opts: &SummaryOptions) -> Box<dyn Summarizer> {
    match kind {
        Kind::Text => Box::new(TextSummary),
        Kind::Tabular => Box::new(TabularSummary::new(&opts.field)),
        Kind::Delimited => Box::new(DelimitedSummary::new(opts.column)),
        Kind::Structured => Box::new(StructuredSummary),
    }
}

/// One entry of `formats.hcl`.
///
#[derive(Debug, Deserialize)]
pub struct FormatDescr {
    /// Usual file extension
    #[serde(rename = "type")]
    pub dtype: String,
    /// Free text description
    pub description: String,
    /// What ends up in the report
    pub report: String,
}

/// The `formats.hcl` file embedded in the binary.
///
#[derive(Debug, Deserialize)]
pub struct FormatFile {
    /// Version
    pub version: usize,
    /// Ordered list of format metadata
    pub format: BTreeMap<String, FormatDescr>,
}

/// List all supported formats into a string using `tabled`.
///
pub fn list() -> eyre::Result<String> {
    let descr = include_str!("formats.hcl");
    let fstr: FormatFile = hcl::from_str(descr)?;

    if fstr.version != FVERSION {
        return Err(eyre::eyre!(
            "Bad formats.hcl version v{}, need v{}",
            fstr.version,
            FVERSION
        ));
    }

    let mut builder = Builder::default();
    builder.push_record(["Name", "Type", "Description"]);

    fstr.format.iter().for_each(|(name, entry)| {
        let text = format!("{}\nReport: {}", entry.description, entry.report);
        builder.push_record([name.clone(), entry.dtype.clone(), text]);
    });
    let allf = builder.build().with(Style::modern()).to_string();
    Ok(format!("List all formats:\n{allf}"))
}
