//! Persisted data model: profiles and the settings document that holds them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One saved API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub custom_params: BTreeMap<String, String>,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        auth_token: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            auth_token: auth_token.into(),
            base_url: base_url.into(),
            model: model.into(),
            custom_params: BTreeMap::new(),
        }
    }

    /// Token suitable for display: keeps a short prefix and suffix of long tokens
    pub fn masked_token(&self) -> String {
        mask_token(&self.auth_token)
    }
}

/// Mask a credential for display
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Root object of settings.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    #[serde(default)]
    pub configs: Vec<Profile>,
    #[serde(default)]
    pub active_config_name: Option<String>,
}

impl SettingsDocument {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.configs.iter().position(|p| p.name == name)
    }

    pub fn find(&self, name: &str) -> Option<&Profile> {
        self.configs.iter().find(|p| p.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Profile> {
        self.configs.iter_mut().find(|p| p.name == name)
    }

    /// The active profile, if the pointer is set and resolves
    pub fn active(&self) -> Option<&Profile> {
        self.active_config_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| self.find(name))
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_config_name.as_deref() == Some(name)
    }
}
