//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of `harvest`.
//! The loader is neutral regarding the content: it stores the base directory, reads either the
//! file given on the command line or the default one and hands back the deserialised struct
//! through `.inner()`.
//!
//! Every configuration struct carries a `version` field, checked against `Versioned::VERSION`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::makepath;

/// Main name for the directory base
pub const TAG: &str = "harvest";

/// Implemented by every struct loaded through `ConfigFile`.
///
pub trait Versioned {
    /// Version of the file format this build understands.
    const VERSION: usize;

    /// Version found in the file.
    fn version(&self) -> usize;
}

/// Configuration file wrapper.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Actual file loaded
    path: PathBuf,
    inner: T,
}

/// Returns the path of the default config directory for `tag`.
///
/// `$HOME/.config/<tag>` on UNIX, `%LOCALAPPDATA%\<tag>` on Windows.
///
#[tracing::instrument]
pub fn config_path(tag: &str) -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or_else(|| eyre!("No home directory, can not continue"))?;

    #[cfg(unix)]
    let base: PathBuf = makepath!(base.home_dir(), ".config", tag);

    #[cfg(windows)]
    let base: PathBuf = makepath!(base.data_local_dir(), tag);

    debug!("base = {base:?}");
    Ok(base)
}

/// Copy `content` into `dir/fname`, creating `dir` if needed.
///
#[tracing::instrument(skip(content))]
pub fn install_defaults(dir: &Path, fname: &str, content: &str) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?
    }

    let fname = dir.join(fname);
    fs::write(&fname, content)?;
    Ok(fname)
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - default basedir (based on $HOME or $LOCALAPPDATA) and `default`
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>, default: &str) -> Result<ConfigFile<T>> {
        let (basedir, fname) = Self::locate(fname, default, || config_path(TAG))?;

        if !fname.exists() {
            return Err(eyre!(
                "Unknown config file {:?}, use -c or run `init` to create {:?}",
                fname,
                basedir.join(default)
            ));
        }
        let path = fname.canonicalize()?;
        trace!("Loading config file {path:?}");

        let data = fs::read_to_string(&path)?;
        let inner = Self::parse(&data)?;

        Ok(ConfigFile {
            basedir,
            path,
            inner,
        })
    }

    /// Find the base directory and the file to load.
    ///
    /// The default directory is only required when no file is given: an explicit file works
    /// without a home directory, its parent then stands as the base directory.
    ///
    fn locate<F>(fname: Option<&Path>, default: &str, home: F) -> Result<(PathBuf, PathBuf)>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        match fname {
            Some(fname) => {
                let basedir = home().unwrap_or_else(|e| {
                    debug!("no default config directory: {e}");
                    fname.parent().map(Path::to_path_buf).unwrap_or_default()
                });
                Ok((basedir, fname.to_path_buf()))
            }
            None => {
                let basedir = home()?;
                let fname = basedir.join(default);
                Ok((basedir, fname))
            }
        }
    }

    /// Parse HCL content and check its version.
    ///
    #[tracing::instrument(skip(data))]
    pub fn parse(data: &str) -> Result<T> {
        let inner: T = hcl::from_str(data)?;
        debug!("struct data = {inner:?}");

        if inner.version() != T::VERSION {
            return Err(eyre!(
                "Bad config file version v{}, need v{}",
                inner.version(),
                T::VERSION
            ));
        }
        Ok(inner)
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the file actually loaded
    ///
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume the wrapper and return the configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}
