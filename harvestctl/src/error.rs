//! Error module
//!

use thiserror::Error;

use harvest_common::StorageError;
use harvest_formats::SummaryError;
use harvest_sources::FetchError;

/// Configuration-level problems, reported through `eyre` by the driver.
///
#[derive(Error, Debug)]
pub enum Status {
    #[error("Unknown dataset {0}")]
    UnknownDataset(String),
}

/// Failure of one dataset's pipeline, tagged with the stage it happened in.
///
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{name}: fetch failed: {source}")]
    Fetch {
        name: String,
        #[source]
        source: FetchError,
    },
    #[error("{name}: write failed: {source}")]
    Write {
        name: String,
        #[source]
        source: StorageError,
    },
    #[error("{name}: summarize failed: {source}")]
    Summarize {
        name: String,
        #[source]
        source: SummaryError,
    },
}

impl PipelineError {
    /// Dataset name
    pub fn name(&self) -> &str {
        match self {
            PipelineError::Fetch { name, .. }
            | PipelineError::Write { name, .. }
            | PipelineError::Summarize { name, .. } => name,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch { .. } => "fetch",
            PipelineError::Write { .. } => "write",
            PipelineError::Summarize { .. } => "summarize",
        }
    }

    /// Short name of the underlying error.
    ///
    pub fn kind(&self) -> String {
        match self {
            PipelineError::Fetch { source, .. } => source.kind(),
            PipelineError::Write { source, .. } => source.kind().to_string(),
            PipelineError::Summarize { source, .. } => source.kind().to_string(),
        }
    }

    /// Process exit code: 1 for network, 2 for local I/O, 3 for bad data.
    ///
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Fetch { .. } => 1,
            PipelineError::Write { .. } => 2,
            PipelineError::Summarize { source, .. } => match source {
                SummaryError::Storage(_) => 2,
                SummaryError::Data(_) => 3,
            },
        }
    }

    /// One-line message for the user.
    ///
    pub fn line(&self) -> String {
        format!(
            "dataset={} stage={} error={}",
            self.name(),
            self.stage(),
            self.kind()
        )
    }
}
