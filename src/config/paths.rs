//! XDG path resolution for gist configuration and data directories.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Config;

impl Config {
    /// Returns the platform-specific configuration directory for gist.
    ///
    /// Returns `~/.config/gist/` on Linux (`XDG_CONFIG_HOME/gist`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the platform-specific data directory for gist.
    ///
    /// Returns `~/.local/share/gist/` on Linux (`XDG_DATA_HOME/gist`).
    /// Used for the intermediate store.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's data directory cannot be determined.
    pub fn data_dir() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to the gist configuration file.
    ///
    /// Returns `~/.config/gist/config.toml` on Linux.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Config::config_dir`] fails.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(crate::constants::CONFIG_FILENAME))
    }

    /// Returns the intermediate store path: the configured override when
    /// present, otherwise the default under the data directory.
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.workflow.store_path {
            return Ok(path.clone());
        }
        Ok(Self::data_dir()?.join(crate::constants::STORE_FILENAME))
    }
}
