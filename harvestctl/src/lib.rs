//! Library part of the `harvestctl` utility.
//!
//! A dataset is described in `datasets.hcl` by its URL, its kind and where its artifact and
//! report live.  The `Pipeline` drives the three stages for one dataset: the fetcher from
//! `harvest-sources`, the storage from `harvest-common` and the summarizer from
//! `harvest-formats`.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;
pub use pipeline::*;

mod cli;
mod cmds;
mod config;
mod error;
mod pipeline;
