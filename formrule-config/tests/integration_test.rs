//! Integration tests for formrule-config

use formrule_config::*;
use std::io::Write;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_settings_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "formrule.toml",
        r#"
        locale = "en-US"
        malformed_rules = "strict"
        date_check = "calendar"
        "#,
    );

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.locale, "en-US");
    assert_eq!(settings.malformed_rules, MalformedRules::Strict);
    assert_eq!(settings.date_check, DateCheck::Calendar);
}

#[test]
fn test_settings_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "formrule.json", r#"{"locale": "zh"}"#);

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.locale, "zh");
    assert_eq!(settings.malformed_rules, MalformedRules::Lenient);
}

#[test]
fn test_settings_from_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "formrule.env",
        "FORMRULE_MALFORMED_RULES=strict\nFORMRULE_DATE_CHECK=range\n",
    );

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.malformed_rules, MalformedRules::Strict);
    assert_eq!(settings.date_check, DateCheck::Range);
}

#[test]
fn test_env_file_with_comments_and_mixed_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "formrule.env",
        "# factory settings\n\
         FORMRULE_LOCALE=en-US # english\n\
         export FORMRULE_DATE_CHECK=Calendar\n",
    );

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.locale, "en-US");
    assert_eq!(settings.date_check, DateCheck::Calendar);
}

#[test]
fn test_invalid_locale_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "formrule.json", r#"{"locale": "not a locale"}"#);

    assert!(matches!(
        Settings::from_file(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        Settings::from_file(&path),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "formrule.yaml", "locale: en");
    assert!(Settings::from_file(&path).is_err());
}
