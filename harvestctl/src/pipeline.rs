//! Pipeline for one dataset: fetch, write, summarize.
//!
//! Every stage runs to completion before the next one starts and datasets are processed one
//! after the other.  A failure stops the current dataset only; the caller decides what to do
//! with the list of failures.
//!

use std::path::PathBuf;

use tracing::{error, info, trace};

use harvest_common::Storage;
use harvest_formats::summarizer;
use harvest_sources::{Fetcher, HttpTransport, Transport};

use crate::{Dataset, PipelineError};

/// Fetcher and storage shared by all datasets of a run.
///
#[derive(Debug)]
pub struct Pipeline<T: Transport> {
    fetcher: Fetcher<T>,
    storage: Storage,
}

impl Pipeline<HttpTransport> {
    /// Real network, data under `root`.
    ///
    pub fn http(storage: Storage) -> Self {
        Pipeline::new(Fetcher::default(), storage)
    }
}

impl<T: Transport> Pipeline<T> {
    pub fn new(fetcher: Fetcher<T>, storage: Storage) -> Self {
        Pipeline { fetcher, storage }
    }

    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Retrieve the dataset and persist it as its artifact.  Nothing is written on failure.
    ///
    #[tracing::instrument(skip(self, ds))]
    pub fn fetch(&self, name: &str, ds: &Dataset) -> Result<PathBuf, PipelineError> {
        let kind = ds.kind();
        trace!("fetch {} as {}", name, kind);

        let payload = self
            .fetcher
            .fetch(&ds.url, kind)
            .map_err(|source| PipelineError::Fetch {
                name: name.to_string(),
                source,
            })?;

        self.storage
            .write(&ds.folder, &ds.file, payload)
            .map_err(|source| {
                error!("Failed to save {}: {}", name, source);
                PipelineError::Write {
                    name: name.to_string(),
                    source,
                }
            })
    }

    /// Compute the report from an already persisted artifact.
    ///
    #[tracing::instrument(skip(self, ds))]
    pub fn summarize(&self, name: &str, ds: &Dataset) -> Result<PathBuf, PipelineError> {
        let s = summarizer(ds.kind(), &ds.options());
        trace!("summarize {} with {}", name, s.name());

        s.run(&self.storage, &ds.folder, &ds.file, &ds.report)
            .map_err(|source| PipelineError::Summarize {
                name: name.to_string(),
                source,
            })
    }

    /// Full pipeline, returns the report path.
    ///
    #[tracing::instrument(skip(self, ds))]
    pub fn run(&self, name: &str, ds: &Dataset) -> Result<PathBuf, PipelineError> {
        self.fetch(name, ds)?;
        let report = self.summarize(name, ds)?;

        info!("{} done, report in {}", name, report.display());
        Ok(report)
    }

    /// Run every dataset in turn and collect the failures, in order.
    ///
    pub fn run_all<'a, I>(&self, list: I) -> Vec<PipelineError>
    where
        I: IntoIterator<Item = (&'a str, &'a Dataset)>,
    {
        list.into_iter()
            .filter_map(|(name, ds)| self.run(name, ds).err())
            .collect()
    }
}

/// Exit code of a run: the first failure decides, 0 when there is none.
///
pub fn exit_code(failures: &[PipelineError]) -> i32 {
    failures.first().map(|e| e.exit_code()).unwrap_or(0)
}
