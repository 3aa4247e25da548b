use crate::error::ConfigError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::schema::Config;

/// Application directory under the user config directory
const APP_DIR: &str = "cli-helper";
const CONFIG_FILE: &str = "config.toml";

/// `~/.config/cli-helper/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join(APP_DIR).join(CONFIG_FILE))
}

/// Load the config file at `path`, or at the default location
///
/// A file that does not exist is not an error: the defaults apply.
pub fn load_global_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        return Ok(Config::default());
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Config::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
