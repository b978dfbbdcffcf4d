use std::path::{Path, PathBuf};
use url::Url;

/// The name of the directory client state is kept in.
pub const APP_DIR: &str = "rideshare";

/// Where to find the server and where to keep client state.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    api_url: Url,
    storage_dir: PathBuf,
}

impl Config {
    /// Validate the API URL and pick a storage directory, falling back to
    /// [`default_storage_dir()`] when none is given.
    pub fn new(
        api_url: Url,
        storage_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_url));
        }

        let storage_dir = storage_dir
            .or_else(default_storage_dir)
            .ok_or(ConfigError::NoHomeDir)?;

        Ok(Config {
            api_url,
            storage_dir,
        })
    }

    pub fn api_url(&self) -> &Url { &self.api_url }

    pub fn storage_dir(&self) -> &Path { &self.storage_dir }
}

/// `<platform config dir>/rideshare`, e.g. `~/.config/rideshare` on Linux.
pub fn default_storage_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("The API must be served over http or https, not \"{}\"", .0.scheme())]
    UnsupportedScheme(Url),
    #[error("Unable to determine a directory for client state, try setting one explicitly")]
    NoHomeDir,
}
