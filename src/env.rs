//! Environment variables derived from a profile, rendered as shell script.
//!
//! `ccm env` prints the script so it can be applied with
//! `eval "$(ccm env)"`; nothing is written to shell startup files.

use log::warn;
use std::str::FromStr;

use crate::model::Profile;

pub const AUTH_TOKEN_VAR: &str = "ANTHROPIC_AUTH_TOKEN";
pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const MODEL_VAR: &str = "ANTHROPIC_MODEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" => Ok(Self::PowerShell),
            _ => Err(format!("unsupported shell: {}", s)),
        }
    }
}

impl Shell {
    /// Guess the shell from a `$SHELL` value, defaulting to bash
    pub fn detect(shell_env: Option<&str>) -> Self {
        match shell_env {
            Some(s) if s.contains("fish") => Self::Fish,
            Some(s) if s.contains("zsh") => Self::Zsh,
            Some(s) if s.contains("pwsh") || s.contains("powershell") => Self::PowerShell,
            _ => Self::Bash,
        }
    }

    /// Command the user runs to apply `ccm env` output
    pub fn eval_hint(&self) -> &'static str {
        match self {
            Self::Bash | Self::Zsh => "eval \"$(ccm env)\"",
            Self::Fish => "ccm env --shell fish | source",
            Self::PowerShell => "ccm env --shell powershell | Invoke-Expression",
        }
    }
}

/// Whether a key can be used as an environment variable name: `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_env_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Variables for a profile: the three built-ins, then custom params.
///
/// A custom param named like a built-in replaces the built-in's value.
/// Params whose key is not a valid variable name are skipped.
pub fn env_vars(profile: &Profile) -> Vec<(String, String)> {
    let mut vars = vec![
        (AUTH_TOKEN_VAR.to_string(), profile.auth_token.clone()),
        (BASE_URL_VAR.to_string(), profile.base_url.clone()),
        (MODEL_VAR.to_string(), profile.model.clone()),
    ];

    for (key, value) in &profile.custom_params {
        if !is_valid_env_key(key) {
            warn!(
                "skipping custom param '{}' of profile '{}': not a valid variable name",
                key, profile.name
            );
            continue;
        }
        match vars.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.clone(),
            None => vars.push((key.clone(), value.clone())),
        }
    }

    vars
}

/// Render variables as a script for the given shell, one assignment per line.
///
/// Keys that are not valid variable names are never written.
pub fn render(vars: &[(String, String)], shell: Shell) -> String {
    let mut script = String::new();
    for (key, value) in vars.iter().filter(|(k, _)| is_valid_env_key(k)) {
        let line = match shell {
            Shell::Bash | Shell::Zsh => format!("export {}='{}'", key, value.replace('\'', "'\\''")),
            Shell::Fish => format!(
                "set -gx {} '{}'",
                key,
                value.replace('\\', "\\\\").replace('\'', "\\'")
            ),
            Shell::PowerShell => format!("$env:{} = '{}'", key, value.replace('\'', "''")),
        };
        script.push_str(&line);
        script.push('\n');
    }
    script
}
