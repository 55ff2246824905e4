// Settings validation

use crate::{ConfigError, Result};

/// Implemented by settings types that can check themselves after loading.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field-level checks shared by settings types.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, key: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                key: key.to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// `xx`, `xxx`, or a language followed by `-`/`_` separated subtags.
    pub fn locale_tag(value: &str, key: &str) -> Result<()> {
        let mut parts = value.split(['-', '_']);
        let language_ok = parts
            .next()
            .is_some_and(|lang| (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_alphabetic()));
        let rest_ok = parts.all(|part| {
            (2..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if language_ok && rest_ok {
            Ok(())
        } else {
            Err(ConfigError::ValidationError {
                key: key.to_string(),
                reason: format!("`{}` is not a locale tag", value),
            })
        }
    }
}
