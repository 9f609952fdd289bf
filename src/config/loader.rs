//! Settings loading.

use std::fs;
use std::path::Path;

use crate::error::{RotaError, RotaResult};

use super::types::RotaSettings;

/// Loads settings from a YAML file.
///
/// # Errors
///
/// [`RotaError::ConfigNotFound`] when the file cannot be read and
/// [`RotaError::ConfigParseError`] when it is not valid YAML.
///
/// # Example
///
/// ```no_run
/// use rota_engine::config::load_settings;
///
/// let settings = load_settings("./config/rota.yaml")?;
/// # Ok::<(), rota_engine::error::RotaError>(())
/// ```
pub fn load_settings<P: AsRef<Path>>(path: P) -> RotaResult<RotaSettings> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| RotaError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| RotaError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
