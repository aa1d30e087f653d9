//! This library is there to share some common code amongst all harvest modules.
//!
//! - `Kind` tells which pipeline a dataset goes through,
//! - `Payload` is what the fetcher produces and the storage consumes,
//! - `Storage` persists artifacts and reports under a root directory,
//! - `ConfigFile` loads versioned HCL configuration files,
//! - `init_logging()` sets up `tracing`.
//!

mod config;
mod kind;
mod logging;
mod macros;
mod payload;
mod storage;

use clap::{crate_name, crate_version};

pub use config::*;
pub use kind::*;
pub use logging::*;
pub use payload::*;
pub use storage::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
