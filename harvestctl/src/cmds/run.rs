//! This is the module handling the `run`, `fetch` and `summarize` sub-commands.
//!
//! Pipeline failures are not errors for the driver: each one is reported on stderr as a single
//! line and turned into the process exit code.  Only configuration problems (unknown dataset
//! names) are returned as errors.
//!

use eyre::Result;
use tracing::{info, trace};

use harvest_sources::Transport;

use crate::{exit_code, Dataset, DatasetsConfig, Pipeline, PipelineError, RunOpts, Status};

/// Resolve dataset names; no name means every dataset.
///
pub fn select<'a>(
    cfg: &'a DatasetsConfig,
    names: &[String],
) -> Result<Vec<(&'a str, &'a Dataset)>> {
    if names.is_empty() {
        return Ok(cfg
            .dataset
            .iter()
            .map(|(name, ds)| (name.as_str(), ds))
            .collect());
    }

    names
        .iter()
        .map(|name| {
            cfg.dataset
                .get_key_value(name)
                .map(|(name, ds)| (name.as_str(), ds))
                .ok_or_else(|| eyre::Report::new(Status::UnknownDataset(name.clone())))
        })
        .collect()
}

/// Report a failure to the user.
///
fn report(e: &PipelineError) {
    eprintln!("{}", e.line());
}

/// Run the complete pipeline for the selected datasets and return the exit code.
///
#[tracing::instrument(skip(pipeline, cfg))]
pub fn run_datasets<T: Transport>(
    pipeline: &Pipeline<T>,
    cfg: &DatasetsConfig,
    ropts: &RunOpts,
) -> Result<i32> {
    let list = select(cfg, &ropts.names)?;
    info!("Running {} dataset(s)", list.len());

    let failures = pipeline.run_all(list);
    failures.iter().for_each(report);

    trace!("{} failure(s)", failures.len());
    Ok(exit_code(&failures))
}

/// Fetch and store one dataset.
///
#[tracing::instrument(skip(pipeline, cfg))]
pub fn fetch_dataset<T: Transport>(
    pipeline: &Pipeline<T>,
    cfg: &DatasetsConfig,
    name: &str,
) -> Result<i32> {
    let ds = cfg
        .get(name)
        .ok_or_else(|| Status::UnknownDataset(name.to_string()))?;

    Ok(match pipeline.fetch(name, ds) {
        Ok(_) => 0,
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    })
}

/// Summarize one dataset from its stored artifact.
///
#[tracing::instrument(skip(pipeline, cfg))]
pub fn summarize_dataset<T: Transport>(
    pipeline: &Pipeline<T>,
    cfg: &DatasetsConfig,
    name: &str,
) -> Result<i32> {
    let ds = cfg
        .get(name)
        .ok_or_else(|| Status::UnknownDataset(name.to_string()))?;

    Ok(match pipeline.summarize(name, ds) {
        Ok(path) => {
            info!("Report for {} in {}", name, path.display());
            0
        }
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    })
}
