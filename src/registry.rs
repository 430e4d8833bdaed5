//! Profile registry: business rules over the settings document.
//!
//! - Profile names are unique, matched exactly and case-sensitively.
//! - Adding an existing name replaces it in place (same position).
//! - Removing the active profile clears the active pointer.
//!
//! Every operation loads a fresh document from the store; mutating operations
//! save it back in full.

use log::debug;

use crate::error::{RegistryError, Result};
use crate::model::Profile;
use crate::output::Output;
use crate::store::SettingsStore;

pub struct ProfileRegistry<'a, O: Output + ?Sized> {
    store: SettingsStore,
    out: &'a O,
}

impl<'a, O: Output + ?Sized> ProfileRegistry<'a, O> {
    pub fn new(store: SettingsStore, out: &'a O) -> Self {
        Self { store, out }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Add a profile, or replace an existing one with the same name.
    ///
    /// Replacing requires `force_overwrite` or a positive confirmation. Returns
    /// whether the settings file was written.
    pub fn add_or_update(&self, profile: Profile, force_overwrite: bool) -> Result<bool> {
        let mut doc = self.store.load()?;
        let name = profile.name.clone();

        match doc.position(&name) {
            Some(index) => {
                if !force_overwrite
                    && !self
                        .out
                        .confirm(&format!("Profile '{name}' already exists. Overwrite?"), false)
                {
                    self.out.write_line("Operation cancelled.");
                    return Ok(false);
                }
                debug!("replacing profile '{name}' at index {index}");
                doc.configs[index] = profile;
                self.store.save(&doc)?;
                self.out.write_line(&format!("Updated profile '{name}'."));
            }
            None => {
                debug!("appending profile '{name}'");
                doc.configs.push(profile);
                self.store.save(&doc)?;
                self.out.write_line(&format!("Added profile '{name}'."));
            }
        }

        Ok(true)
    }

    /// Remove a profile by name. Returns `false` if no such profile exists.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut doc = self.store.load()?;

        let Some(index) = doc.position(name) else {
            self.out.error(&format!("Profile '{name}' not found."));
            return Ok(false);
        };

        doc.configs.remove(index);
        let was_active = doc.is_active(name);
        if was_active {
            doc.active_config_name = None;
        }
        self.store.save(&doc)?;

        if was_active {
            self.out
                .write_line(&format!("Removed active profile '{name}'. No profile is active now."));
        } else {
            self.out.write_line(&format!("Removed profile '{name}'."));
        }
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Result<Option<Profile>> {
        let doc = self.store.load()?;
        Ok(doc.find(name).cloned())
    }

    /// The active profile; `None` if unset or pointing at a missing profile
    pub fn get_active(&self) -> Result<Option<Profile>> {
        let doc = self.store.load()?;
        Ok(doc.active().cloned())
    }

    /// The raw active pointer, which may be dangling
    pub fn active_name(&self) -> Result<Option<String>> {
        Ok(self.store.load()?.active_config_name)
    }

    pub fn set_active(&self, name: &str) -> Result<()> {
        let mut doc = self.store.load()?;
        if doc.find(name).is_none() {
            return Err(RegistryError::ProfileNotFound(name.to_string()));
        }
        doc.active_config_name = Some(name.to_string());
        self.store.save(&doc)
    }

    pub fn list(&self) -> Result<Vec<Profile>> {
        Ok(self.store.load()?.configs)
    }

    /// Replace the auth token of an existing profile. Returns `false` if not found.
    pub fn set_token(&self, name: &str, token: &str) -> Result<bool> {
        let mut doc = self.store.load()?;

        let Some(profile) = doc.find_mut(name) else {
            self.out.error(&format!("Profile '{name}' not found."));
            return Ok(false);
        };
        profile.auth_token = token.to_string();

        self.store.save(&doc)?;
        self.out.write_line(&format!("Updated token for profile '{name}'."));
        Ok(true)
    }
}
