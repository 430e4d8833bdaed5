//! High-level command orchestration for the CLI.
//!
//! Each function here corresponds to a subcommand in `main.rs`. Handlers
//! build a [`ProfileRegistry`] over the settings file from [`Paths`] and use
//! the [`Ui`] both for rendering and as the registry's output sink.
//!
//! Handlers whose "not found" outcome is already reported by the registry
//! return `Ok(false)` instead of an error so the message isn't printed twice.

use anstyle::AnsiColor;
use anyhow::{Result, bail};
use log::debug;

use crate::args::{ExplicitFields, build_profile};
use crate::doctor::run_doctor;
use crate::env::{Shell, env_vars, render};
use crate::error::RegistryError;
use crate::model::Profile;
use crate::paths::Paths;
use crate::registry::ProfileRegistry;
use crate::ui::Ui;

fn registry<'a>(paths: &Paths, ui: &'a Ui) -> ProfileRegistry<'a, Ui> {
    ProfileRegistry::new(paths.store(), ui)
}

/// List all saved profiles, marking the active one
pub fn list(paths: &Paths, ui: &Ui) -> Result<()> {
    let registry = registry(paths, ui);
    let profiles = registry.list()?;
    let active_name = registry.active_name()?;

    if profiles.is_empty() {
        ui.warn("No profiles found.");
        ui.newline();
        ui.println("Create one with:");
        ui.println(format!(
            "  {} add <name> <TOKEN> <BASE_URL> <MODEL> [KEY=VALUE...]",
            ui.bold("ccm")
        ));
        return Ok(());
    }

    let mut table = ui.simple_table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("Profile"),
        ui.header_cell("Model"),
        ui.header_cell("Base URL"),
        ui.header_cell("Status"),
    ]);

    for profile in &profiles {
        let is_active = active_name.as_deref() == Some(profile.name.as_str());
        let icon = if is_active { ui.icon_active() } else { " " };
        let status_cell = if is_active {
            ui.colored_cell("active", AnsiColor::Green)
        } else {
            ui.cell("-")
        };

        table.add_row(vec![
            ui.cell(icon),
            ui.cell(&profile.name),
            ui.cell(&profile.model),
            ui.cell(&profile.base_url),
            status_cell,
        ]);
    }

    ui.section("Profiles");
    ui.println(table.to_string());

    Ok(())
}

/// Show the active profile
pub fn current(paths: &Paths, ui: &Ui) -> Result<()> {
    let registry = registry(paths, ui);

    if registry.list()?.is_empty() {
        ui.warn("No profiles found.");
        return Ok(());
    }

    let Some(active_name) = registry.active_name()? else {
        ui.warn("No active profile. Switch to one with 'ccm use <name>'.");
        return Ok(());
    };

    let Some(profile) = registry.get_active()? else {
        ui.warn(format!(
            "Active profile '{}' no longer exists. Switch with 'ccm use <name>'.",
            active_name
        ));
        return Ok(());
    };

    ui.section("Current Profile");
    ui.newline();
    ui.println(describe(&profile, ui).to_string());
    Ok(())
}

fn describe(profile: &Profile, ui: &Ui) -> comfy_table::Table {
    let mut table = ui.simple_table();
    table.add_row(vec![ui.cell("Name:"), ui.header_cell(&profile.name)]);
    table.add_row(vec![ui.cell("Model:"), ui.cell(&profile.model)]);
    table.add_row(vec![ui.cell("Base URL:"), ui.cell(&profile.base_url)]);
    table.add_row(vec![ui.cell("Token:"), ui.cell(ui.dim(profile.masked_token()))]);

    if !profile.custom_params.is_empty() {
        table.add_row(vec![ui.cell("Custom params:"), ui.cell("")]);
        for (key, value) in &profile.custom_params {
            table.add_row(vec![ui.cell(""), ui.cell(format!("{}={}", key, value))]);
        }
    }
    table
}

/// Add a profile, or overwrite one with the same name
pub fn add(
    paths: &Paths,
    ui: &Ui,
    name: &str,
    positionals: &[String],
    flags: ExplicitFields,
    force: bool,
) -> Result<()> {
    let profile = build_profile(name, positionals, flags)?;
    debug!(
        "classified profile '{}': url={} model={} params={}",
        profile.name,
        profile.base_url,
        profile.model,
        profile.custom_params.len()
    );

    let name = profile.name.clone();
    if registry(paths, ui).add_or_update(profile, force)? {
        ui.newline();
        ui.println("To activate it:");
        ui.println(format!("  ccm use {}", name));
    }
    Ok(())
}

/// Make a profile the active one
pub fn use_profile(paths: &Paths, ui: &Ui, name: &str) -> Result<()> {
    registry(paths, ui).set_active(name)?;

    ui.ok(format!("Active profile: {}", name));
    ui.newline();
    ui.println("Apply it to the current shell with:");
    let shell = Shell::detect(std::env::var("SHELL").ok().as_deref());
    ui.println(format!("  {}", shell.eval_hint()));
    Ok(())
}

/// Remove a profile. Returns `false` if it didn't exist.
pub fn remove(paths: &Paths, ui: &Ui, name: &str) -> Result<bool> {
    Ok(registry(paths, ui).remove(name)?)
}

/// Replace a profile's token. Returns `false` if it didn't exist.
pub fn set_token(paths: &Paths, ui: &Ui, name: &str, token: &str) -> Result<bool> {
    if token.trim().is_empty() {
        bail!("Token cannot be empty");
    }
    Ok(registry(paths, ui).set_token(name, token)?)
}

/// Print the shell script exporting a profile's variables
pub fn env(paths: &Paths, ui: &Ui, name: Option<&str>, shell: Option<Shell>) -> Result<()> {
    let registry = registry(paths, ui);
    let profile = match name {
        Some(name) => registry
            .get(name)?
            .ok_or_else(|| RegistryError::ProfileNotFound(name.to_string()))?,
        None => match registry.get_active()? {
            Some(profile) => profile,
            None => bail!("No active profile.\nHint: Use 'ccm use <name>' or pass a profile name."),
        },
    };

    let shell = shell.unwrap_or_else(|| Shell::detect(std::env::var("SHELL").ok().as_deref()));
    // Plain stdout: the output is meant for eval
    print!("{}", render(&env_vars(&profile), shell));
    Ok(())
}

/// Run diagnostics
pub fn doctor(paths: &Paths, ui: &Ui) -> Result<()> {
    if !run_doctor(paths, ui) {
        bail!("Doctor found problems with the settings file");
    }
    ui.ok("No problems found");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_paths;
    use crate::ui::ColorMode;
    use tempfile::TempDir;

    fn test_ui() -> Ui {
        Ui::new(ColorMode::Never, false)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn add_sample(paths: &Paths, ui: &Ui, name: &str) {
        add(
            paths,
            ui,
            name,
            &strings(&["sk-ant-0123456789", "https://api.example.com", "m1"]),
            ExplicitFields::default(),
            false,
        )
        .unwrap();
    }

    #[test]
    fn test_list_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        assert!(list(&paths, &test_ui()).is_ok());
    }

    #[test]
    fn test_add_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let ui = test_ui();

        add_sample(&paths, &ui, "work");
        assert!(list(&paths, &ui).is_ok());

        let doc = paths.store().load().unwrap();
        assert_eq!(doc.configs.len(), 1);
        assert_eq!(doc.configs[0].auth_token, "sk-ant-0123456789");
        assert_eq!(doc.configs[0].model, "m1");
    }

    #[test]
    fn test_add_rejects_incomplete_profile() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let result = add(
            &paths,
            &test_ui(),
            "work",
            &strings(&["sk-ant-0123456789", "m1"]),
            ExplicitFields::default(),
            false,
        );
        assert!(result.is_err());
        assert!(!paths.settings_file.exists());
    }

    #[test]
    fn test_use_and_current() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let ui = test_ui();

        add_sample(&paths, &ui, "work");
        use_profile(&paths, &ui, "work").unwrap();
        assert_eq!(
            paths.store().load().unwrap().active_config_name.as_deref(),
            Some("work")
        );
        assert!(current(&paths, &ui).is_ok());
    }

    #[test]
    fn test_use_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let err = use_profile(&paths, &test_ui(), "nonexistent").unwrap_err();
        assert!(err.to_string().contains("'nonexistent' not found"));
    }

    #[test]
    fn test_remove_reports_missing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let ui = test_ui();

        add_sample(&paths, &ui, "work");
        assert!(!remove(&paths, &ui, "home").unwrap());
        assert!(remove(&paths, &ui, "work").unwrap());
        assert!(paths.store().load().unwrap().configs.is_empty());
    }

    #[test]
    fn test_set_token_rejects_blank() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let ui = test_ui();

        add_sample(&paths, &ui, "work");
        assert!(set_token(&paths, &ui, "work", "  ").is_err());
        assert!(set_token(&paths, &ui, "work", "sk-rotated-987654321").unwrap());
    }

    #[test]
    fn test_env_requires_active_profile() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let ui = test_ui();

        add_sample(&paths, &ui, "work");
        assert!(env(&paths, &ui, None, Some(Shell::Bash)).is_err());
        assert!(env(&paths, &ui, Some("work"), Some(Shell::Bash)).is_ok());
        assert!(env(&paths, &ui, Some("missing"), Some(Shell::Bash)).is_err());
    }

    #[test]
    fn test_list_and_current_with_dangling_active() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        let ui = test_ui();

        add_sample(&paths, &ui, "work");
        let mut doc = paths.store().load().unwrap();
        doc.active_config_name = Some("ghost".to_string());
        paths.store().save(&doc).unwrap();

        assert!(list(&paths, &ui).is_ok());
        assert!(current(&paths, &ui).is_ok());
        assert_eq!(paths.store().load().unwrap(), doc);
    }

    #[test]
    fn test_current_without_profiles() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        assert!(current(&paths, &test_ui()).is_ok());
    }
}
