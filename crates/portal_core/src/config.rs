use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "portal.toml";
const ENV_PREFIX: &str = "PORTAL__";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidOverride { key: String, value: String },
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error("institution domain '{domain}' cannot form an email pattern: {source}")]
    EmailPattern {
        domain: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalSettings {
    pub institution_domain: String,
    pub brand_name: String,
    pub min_password_len: usize,
    pub max_visible_notifications: usize,
    pub timings: Timings,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            institution_domain: "parsu.edu.ph".into(),
            brand_name: "EduVault".into(),
            min_password_len: 6,
            max_visible_notifications: 4,
            timings: Timings::default(),
        }
    }
}

/// Every delay the portal schedules, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timings {
    pub pages_reveal_delay_ms: u64,
    pub focus_delay_ms: u64,
    pub debounce_ms: u64,
    pub shake_duration_ms: u64,
    pub auth_latency_ms: u64,
    pub dashboard_delay_ms: u64,
    pub notification_display_ms: u64,
    pub notification_exit_ms: u64,
    pub alt_auth_latency_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            pages_reveal_delay_ms: 400,
            focus_delay_ms: 500,
            debounce_ms: 300,
            shake_duration_ms: 600,
            auth_latency_ms: 2000,
            dashboard_delay_ms: 2500,
            notification_display_ms: 4000,
            notification_exit_ms: 500,
            alt_auth_latency_ms: 2000,
        }
    }
}

impl PortalSettings {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Applies `PORTAL__<FIELD>` and `PORTAL__TIMINGS__<FIELD>` overrides
    /// from `lookup`, which is usually `std::env::var`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = get("INSTITUTION_DOMAIN") {
            self.institution_domain = v;
        }
        if let Some(v) = get("BRAND_NAME") {
            self.brand_name = v;
        }
        override_number(&get, "MIN_PASSWORD_LEN", &mut self.min_password_len)?;
        override_number(
            &get,
            "MAX_VISIBLE_NOTIFICATIONS",
            &mut self.max_visible_notifications,
        )?;

        let t = &mut self.timings;
        override_number(&get, "TIMINGS__PAGES_REVEAL_DELAY_MS", &mut t.pages_reveal_delay_ms)?;
        override_number(&get, "TIMINGS__FOCUS_DELAY_MS", &mut t.focus_delay_ms)?;
        override_number(&get, "TIMINGS__DEBOUNCE_MS", &mut t.debounce_ms)?;
        override_number(&get, "TIMINGS__SHAKE_DURATION_MS", &mut t.shake_duration_ms)?;
        override_number(&get, "TIMINGS__AUTH_LATENCY_MS", &mut t.auth_latency_ms)?;
        override_number(&get, "TIMINGS__DASHBOARD_DELAY_MS", &mut t.dashboard_delay_ms)?;
        override_number(
            &get,
            "TIMINGS__NOTIFICATION_DISPLAY_MS",
            &mut t.notification_display_ms,
        )?;
        override_number(&get, "TIMINGS__NOTIFICATION_EXIT_MS", &mut t.notification_exit_ms)?;
        override_number(&get, "TIMINGS__ALT_AUTH_LATENCY_MS", &mut t.alt_auth_latency_ms)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let domain = self.institution_domain.trim();
        if domain.is_empty() {
            return Err(SettingsError::Invalid(
                "institution_domain must not be empty".into(),
            ));
        }
        if domain.contains('@') || domain.chars().any(char::is_whitespace) {
            return Err(SettingsError::Invalid(format!(
                "institution_domain '{domain}' must be a bare domain such as 'parsu.edu.ph'"
            )));
        }
        if self.min_password_len == 0 {
            return Err(SettingsError::Invalid(
                "min_password_len must be at least 1".into(),
            ));
        }
        if self.max_visible_notifications == 0 {
            return Err(SettingsError::Invalid(
                "max_visible_notifications must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn override_number<G, N>(get: &G, key: &str, slot: &mut N) -> Result<(), SettingsError>
where
    G: Fn(&str) -> Option<String>,
    N: std::str::FromStr,
{
    let Some(raw) = get(key) else {
        return Ok(());
    };
    *slot = raw
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidOverride {
            key: format!("{ENV_PREFIX}{key}"),
            value: raw.clone(),
        })?;
    Ok(())
}

/// Loads settings from `path` (or `portal.toml` in the working directory when
/// `None`), then environment overrides, then validates.
///
/// An explicit path must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> Result<PortalSettings, SettingsError> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => match read_settings_file(Path::new(DEFAULT_SETTINGS_FILE)) {
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                PortalSettings::default()
            }
            other => other?,
        },
    };

    settings.apply_overrides(|name| std::env::var(name).ok())?;
    settings.validate()?;

    tracing::debug!(
        domain = %settings.institution_domain,
        brand = %settings.brand_name,
        "portal settings loaded"
    );
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<PortalSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    PortalSettings::from_toml_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
