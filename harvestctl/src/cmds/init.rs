//! This is the module handling the `init` sub-command.
//!

use std::path::PathBuf;

use eyre::{eyre, Result};
use tracing::info;

use harvest_common::{config_path, install_defaults, TAG};

use crate::{CONFIG, DEF_CONFIG};

/// Install the embedded `datasets.hcl` in the default configuration directory.  An existing
/// file is left alone.
///
#[tracing::instrument]
pub fn init_config() -> Result<PathBuf> {
    let dir = config_path(TAG)?;

    let existing = dir.join(CONFIG);
    if existing.exists() {
        return Err(eyre!("{} already exists", existing.display()));
    }

    let fname = install_defaults(&dir, CONFIG, DEF_CONFIG)?;
    info!("Default configuration installed in {}", fname.display());
    Ok(fname)
}
