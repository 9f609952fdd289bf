//! Runtime settings for the rota engine.
//!
//! Settings ship with working defaults; a YAML file can override them.

mod loader;
mod types;

pub use loader::load_settings;
pub use types::RotaSettings;
