//! Diagnostics for ccm.
//!
//! `ccm doctor` checks the settings file and the profiles in it:
//! - the file is readable and parses
//! - the active pointer resolves to a profile
//! - names are unique
//! - every profile has a token, an http(s) base URL and a model
//! - custom parameter keys are usable as variable names

use anstyle::AnsiColor;
use std::collections::HashSet;

use crate::args::is_http_url;
use crate::env::is_valid_env_key;
use crate::model::{Profile, SettingsDocument};
use crate::paths::Paths;
use crate::ui::Ui;

/// Run the doctor diagnostics. Returns `true` if no check failed.
pub fn run_doctor(paths: &Paths, ui: &Ui) -> bool {
    ui.section("ccm Doctor");
    ui.newline();

    let mut healthy = true;
    let mut loaded = None;

    healthy &= check_step(ui, "Settings File", || {
        if !paths.settings_file.exists() {
            ui.println(format!(
                "  {} Settings file missing (no profiles added yet?): {}",
                ui.icon_warn(),
                paths.settings_file.display()
            ));
            return true;
        }

        match paths.store().load() {
            Ok(doc) => {
                ui.println(format!(
                    "  {} Settings file readable: {}",
                    ui.icon_ok(),
                    paths.settings_file.display()
                ));
                loaded = Some(doc);
                true
            }
            Err(e) => {
                ui.println(format!("  {} {}", ui.icon_err(), e));
                false
            }
        }
    });

    let Some(doc) = loaded else {
        return healthy;
    };

    healthy &= check_step(ui, "Active Profile", || match &doc.active_config_name {
        None => {
            ui.println(format!("  {} No active profile set", ui.icon_warn()));
            true
        }
        Some(name) if doc.find(name).is_some() => {
            ui.println(format!("  {} Active profile: {}", ui.icon_ok(), name));
            true
        }
        Some(name) => {
            ui.println(format!(
                "  {} Active profile '{}' does not exist",
                ui.icon_err(),
                name
            ));
            false
        }
    });

    healthy &= check_step(ui, "Profiles", || {
        if doc.configs.is_empty() {
            ui.println(format!("  {} No profiles found", ui.icon_warn()));
            return true;
        }

        ui.println(format!("  Found {} profile(s):", doc.configs.len()));
        let mut all_valid = true;

        for name in duplicate_names(&doc) {
            ui.println(format!("    {} Duplicate profile name '{}'", ui.icon_err(), name));
            all_valid = false;
        }

        for profile in &doc.configs {
            let problems = profile_problems(profile);
            if problems.is_empty() {
                ui.println(format!("    {} {}", ui.icon_ok(), profile.name));
            } else {
                ui.println(format!(
                    "    {} {} ({})",
                    ui.icon_err(),
                    profile.name,
                    problems.join(", ")
                ));
                all_valid = false;
            }
        }
        all_valid
    });

    healthy
}

/// Names that appear more than once, in first-seen order
pub fn duplicate_names(doc: &SettingsDocument) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    doc.configs
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| !seen.insert(*name) && reported.insert(*name))
        .collect()
}

/// Problems that would stop a profile from working
pub fn profile_problems(profile: &Profile) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if profile.name.trim().is_empty() {
        problems.push("empty name");
    }
    if profile.auth_token.is_empty() {
        problems.push("missing token");
    }
    if !is_http_url(&profile.base_url) {
        problems.push("base URL is not http(s)");
    }
    if profile.model.is_empty() {
        problems.push("missing model");
    }
    if profile.custom_params.keys().any(|k| !is_valid_env_key(k)) {
        problems.push("invalid custom parameter key");
    }
    problems
}

fn check_step<F>(ui: &Ui, name: &str, check_fn: F) -> bool
where
    F: FnOnce() -> bool,
{
    ui.println(ui.bold(format!("Checking {}...", name)));
    let success = check_fn();
    if !success {
        ui.println(ui.colored("  Issues detected!", AnsiColor::Red));
    }
    ui.newline();
    success
}
