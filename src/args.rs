//! Turning `ccm add` arguments into a profile.
//!
//! Positional values are classified heuristically:
//! - the first `http://` or `https://` value is the base URL
//! - `KEY=VALUE` values are custom parameters
//! - of the remaining plain values, the one starting with `sk-` (or the longer
//!   one) is the token and the other is the model
//!
//! The guess can be wrong for unusual tokens or model names, so explicit
//! `--token`, `--url`, `--model` and `--param` flags always win.

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::env::is_valid_env_key;
use crate::model::Profile;

/// Prefix that marks a value as an API token
pub const TOKEN_PREFIX: &str = "sk-";

/// Whether a value looks like an http(s) URL (scheme compared case-insensitively)
pub fn is_http_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fields recovered from positional arguments
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classified {
    pub auth_token: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub custom_params: BTreeMap<String, String>,
}

/// Classify positional `add` arguments
pub fn classify(args: &[String]) -> Classified {
    let mut classified = Classified {
        base_url: args.iter().find(|a| is_http_url(a)).cloned(),
        ..Classified::default()
    };

    let mut plain = Vec::new();
    for arg in args.iter().filter(|a| !is_http_url(a)) {
        match arg.split_once('=') {
            Some((key, value)) => {
                classified
                    .custom_params
                    .insert(key.to_string(), value.to_string());
            }
            None => plain.push(arg.as_str()),
        }
    }

    match plain.as_slice() {
        [] => {}
        [only] => {
            if only.starts_with(TOKEN_PREFIX) {
                classified.auth_token = Some(only.to_string());
            } else {
                classified.model = Some(only.to_string());
            }
        }
        [first, second, ..] => {
            let first_is_token =
                first.starts_with(TOKEN_PREFIX) || first.chars().count() > second.chars().count();
            let second_is_token =
                second.starts_with(TOKEN_PREFIX) || second.chars().count() > first.chars().count();

            let (token, model) = if second_is_token && !first_is_token {
                (second, first)
            } else {
                // Ties fall back to positional order
                (first, second)
            };
            classified.auth_token = Some(token.to_string());
            classified.model = Some(model.to_string());
        }
    }

    classified
}

/// Explicit `add` flags
#[derive(Debug, Default, Clone)]
pub struct ExplicitFields {
    pub token: Option<String>,
    pub url: Option<String>,
    pub model: Option<String>,
    pub params: Vec<String>,
}

/// Build a profile from positionals and flags; flags override the heuristic
pub fn build_profile(name: &str, positionals: &[String], flags: ExplicitFields) -> Result<Profile> {
    let mut classified = classify(positionals);

    for param in &flags.params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("Invalid parameter '{}'.\nHint: Use KEY=VALUE.", param);
        };
        classified
            .custom_params
            .insert(key.to_string(), value.to_string());
    }

    let profile = Profile {
        name: name.to_string(),
        auth_token: flags.token.or(classified.auth_token).unwrap_or_default(),
        base_url: flags.url.or(classified.base_url).unwrap_or_default(),
        model: flags.model.or(classified.model).unwrap_or_default(),
        custom_params: classified.custom_params,
    };

    validate_profile(&profile)?;
    Ok(profile)
}

/// Check that a profile has everything needed to talk to an API
pub fn validate_profile(profile: &Profile) -> Result<()> {
    if profile.name.trim().is_empty() {
        bail!("Profile name cannot be empty");
    }

    if profile.name != profile.name.trim() {
        bail!(
            "Profile name '{}' cannot start or end with whitespace",
            profile.name
        );
    }

    if profile.auth_token.is_empty() {
        bail!(
            "No API token found.\nUsage: ccm add <name> <TOKEN> <BASE_URL> <MODEL> [KEY=VALUE...]\nHint: pass it explicitly with --token."
        );
    }

    if profile.base_url.is_empty() {
        bail!("No base URL found (it must start with http:// or https://).");
    }

    if !is_http_url(&profile.base_url) {
        bail!(
            "Invalid base URL '{}'. It must start with http:// or https://.",
            profile.base_url
        );
    }

    if profile.model.is_empty() {
        bail!("No model specified.\nHint: pass it explicitly with --model.");
    }

    if let Some(key) = profile.custom_params.keys().find(|k| !is_valid_env_key(k)) {
        bail!(
            "Invalid custom parameter key '{}'.\nHint: keys must be environment variable names (letters, digits and _, not starting with a digit).",
            key
        );
    }

    Ok(())
}
