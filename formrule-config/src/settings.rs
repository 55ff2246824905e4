// Rule factory settings

use crate::{ConfigError, ConfigLoader, EnvLoader, Result, Validate, validation::ConfigValidator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// What a parameterised builder does with a `rules` string it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MalformedRules {
    /// Leave the bound absent and log a warning.
    #[default]
    Lenient,
    /// Fail the builder with a parse error.
    Strict,
}

impl FromStr for MalformedRules {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::ValidationError {
                key: "malformed_rules".to_string(),
                reason: format!("expected `lenient` or `strict`, got `{}`", other),
            }),
        }
    }
}

impl TryFrom<String> for MalformedRules {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// How far the `date` rule checks month and day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DateCheck {
    /// Month 01-12 and day 01-31, independently.
    #[default]
    Range,
    /// The date must exist on the proleptic Gregorian calendar.
    Calendar,
}

impl FromStr for DateCheck {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "range" => Ok(Self::Range),
            "calendar" => Ok(Self::Calendar),
            other => Err(ConfigError::ValidationError {
                key: "date_check".to_string(),
                reason: format!("expected `range` or `calendar`, got `{}`", other),
            }),
        }
    }
}

impl TryFrom<String> for DateCheck {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Settings consumed by the rule factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Message locale tag, e.g. `zh-CN` or `en-US`.
    pub locale: String,
    pub malformed_rules: MalformedRules,
    pub date_check: DateCheck,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "zh-CN".to_string(),
            malformed_rules: MalformedRules::Lenient,
            date_check: DateCheck::Range,
        }
    }
}

impl Settings {
    /// Deserialize from a JSON object, then validate.
    pub fn from_value(value: Value) -> Result<Self> {
        let settings: Settings = serde_json::from_value(value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load a JSON, TOML or `.env` file, picking the format by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        formrule_log::debug!("loaded settings file {}", path.display());
        Self::from_value(value)
    }

    /// Read `FORMRULE_*` variables (after loading `.env`).
    pub fn from_env() -> Result<Self> {
        let vars = EnvLoader::default().load_with_dotenv()?;
        Self::default().overlay(&vars)
    }

    /// Apply string overrides on top of `self`. Unknown keys are ignored.
    pub fn overlay(mut self, vars: &HashMap<String, String>) -> Result<Self> {
        if let Some(locale) = vars.get("locale") {
            self.locale = locale.clone();
        }
        if let Some(policy) = vars.get("malformed_rules") {
            self.malformed_rules = policy.parse()?;
        }
        if let Some(check) = vars.get("date_check") {
            self.date_check = check.parse()?;
        }
        self.validate()?;
        Ok(self)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.locale, "locale")?;
        ConfigValidator::locale_tag(&self.locale, "locale")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.locale, "zh-CN");
        assert_eq!(settings.malformed_rules, MalformedRules::Lenient);
        assert_eq!(settings.date_check, DateCheck::Range);
    }

    #[test]
    fn test_from_value_fills_missing_fields() {
        let settings = Settings::from_value(serde_json::json!({"malformed_rules": "strict"})).unwrap();
        assert_eq!(settings.malformed_rules, MalformedRules::Strict);
        assert_eq!(settings.locale, "zh-CN");
    }

    #[test]
    fn test_from_value_rejects_unknown_policy() {
        let result = Settings::from_value(serde_json::json!({"malformed_rules": "loose"}));
        assert!(matches!(result, Err(ConfigError::DeserializationError(_))));
    }

    #[test]
    fn test_file_and_env_accept_the_same_spellings() {
        let from_file = Settings::from_value(serde_json::json!({
            "malformed_rules": "Strict",
            "date_check": "CALENDAR",
        }))
        .unwrap();

        let vars = HashMap::from([
            ("malformed_rules".to_string(), "Strict".to_string()),
            ("date_check".to_string(), "CALENDAR".to_string()),
        ]);
        let from_env = Settings::default().overlay(&vars).unwrap();

        assert_eq!(from_file, from_env);
        assert_eq!(from_file.date_check, DateCheck::Calendar);
        assert_eq!(from_file.malformed_rules, MalformedRules::Strict);
    }

    #[test]
    fn test_policies_serialize_lowercase() {
        let json = serde_json::to_value(Settings {
            malformed_rules: MalformedRules::Strict,
            date_check: DateCheck::Calendar,
            ..Settings::default()
        })
        .unwrap();
        assert_eq!(json["malformed_rules"], "strict");
        assert_eq!(json["date_check"], "calendar");
    }

    #[test]
    fn test_overlay() {
        let vars = HashMap::from([
            ("locale".to_string(), "en-US".to_string()),
            ("date_check".to_string(), "Calendar".to_string()),
        ]);
        let settings = Settings::default().overlay(&vars).unwrap();
        assert_eq!(settings.locale, "en-US");
        assert_eq!(settings.date_check, DateCheck::Calendar);
    }

    #[test]
    fn test_overlay_rejects_bad_values() {
        let vars = HashMap::from([("malformed_rules".to_string(), "maybe".to_string())]);
        assert!(matches!(
            Settings::default().overlay(&vars),
            Err(ConfigError::ValidationError { .. })
        ));

        let vars = HashMap::from([("locale".to_string(), "en US!".to_string())]);
        assert!(Settings::default().overlay(&vars).is_err());
    }
}
