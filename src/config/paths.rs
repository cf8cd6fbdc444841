//! Path resolution for pdc configuration files.
//!
//! Everything lives in `~/.pdc/`:
//! - `config.yaml` - server address and output defaults

use std::path::PathBuf;

use crate::error::PdcError;

/// Paths to pdc configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pdc/`
    pub root: PathBuf,
    /// Config file: `~/.pdc/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PdcError> {
        let home = std::env::var("HOME")
            .map_err(|_| PdcError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".pdc")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }
}
