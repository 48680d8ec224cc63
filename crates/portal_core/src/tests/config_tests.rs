use super::{load_settings, PortalSettings, SettingsError, Timings};

use std::{collections::HashMap, fs};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_match_portal_behaviour() {
    let settings = PortalSettings::default();
    assert_eq!(settings.institution_domain, "parsu.edu.ph");
    assert_eq!(settings.brand_name, "EduVault");
    assert_eq!(settings.min_password_len, 6);
    assert_eq!(settings.timings.debounce_ms, 300);
    assert_eq!(settings.timings.auth_latency_ms, 2000);
    assert_eq!(settings.timings.dashboard_delay_ms, 2500);
    assert_eq!(settings.timings.notification_display_ms, 4000);
    settings.validate().expect("defaults are valid");
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let settings = PortalSettings::from_toml_str(
        r#"
brand_name = "Campus Hub"

[timings]
auth_latency_ms = 50
"#,
    )
    .expect("parse");

    assert_eq!(settings.brand_name, "Campus Hub");
    assert_eq!(settings.institution_domain, "parsu.edu.ph");
    assert_eq!(settings.timings.auth_latency_ms, 50);
    assert_eq!(
        settings.timings.debounce_ms,
        Timings::default().debounce_ms
    );
}

#[test]
fn rejects_unknown_keys() {
    assert!(PortalSettings::from_toml_str("colour = \"navy\"").is_err());
}

#[test]
fn overrides_replace_file_values() {
    let mut settings = PortalSettings::default();
    settings
        .apply_overrides(lookup_from(&[
            ("PORTAL__INSTITUTION_DOMAIN", "example.edu"),
            ("PORTAL__MAX_VISIBLE_NOTIFICATIONS", "2"),
            ("PORTAL__TIMINGS__DEBOUNCE_MS", " 120 "),
        ]))
        .expect("overrides");

    assert_eq!(settings.institution_domain, "example.edu");
    assert_eq!(settings.max_visible_notifications, 2);
    assert_eq!(settings.timings.debounce_ms, 120);
}

#[test]
fn non_numeric_override_is_reported_with_its_key() {
    let mut settings = PortalSettings::default();
    let err = settings
        .apply_overrides(lookup_from(&[("PORTAL__TIMINGS__AUTH_LATENCY_MS", "soon")]))
        .expect_err("should fail");

    match err {
        SettingsError::InvalidOverride { key, value } => {
            assert_eq!(key, "PORTAL__TIMINGS__AUTH_LATENCY_MS");
            assert_eq!(value, "soon");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn validation_rejects_unusable_values() {
    let mut settings = PortalSettings::default();
    settings.institution_domain = "  ".into();
    assert!(settings.validate().is_err());

    let mut settings = PortalSettings::default();
    settings.institution_domain = "user@parsu.edu.ph".into();
    assert!(settings.validate().is_err());

    let mut settings = PortalSettings::default();
    settings.max_visible_notifications = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn loads_explicit_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("portal.toml");
    fs::write(&path, "min_password_len = 8\n").expect("write settings");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.min_password_len, 8);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let err = load_settings(Some(&path)).expect_err("should fail");
    assert!(matches!(err, SettingsError::Read { .. }));
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("portal.toml");
    fs::write(&path, "min_password_len = \"six\"\n").expect("write settings");

    let err = load_settings(Some(&path)).expect_err("should fail");
    assert!(matches!(err, SettingsError::Parse { .. }));
}
