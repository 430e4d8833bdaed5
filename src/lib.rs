pub mod args;
pub mod commands;
pub mod doctor;
pub mod env;
pub mod error;
pub mod model;
pub mod output;
pub mod paths;
pub mod registry;
pub mod store;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

pub use error::{RegistryError, Result};
pub use model::{Profile, SettingsDocument};
pub use registry::ProfileRegistry;
pub use store::SettingsStore;
