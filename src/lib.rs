// formrule - declarative validation rules for form fields
//
// Compiles named rule kinds into validator descriptors for a form engine,
// with localized messages, display-width ranges and identity-number checks.

use std::path::Path;
use thiserror::Error;

pub use formrule_validation::*;

pub use formrule_config;
pub use formrule_log;
pub use formrule_validation;

/// Anything that can go wrong while setting up a factory.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] formrule_config::ConfigError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Factory configured from `FORMRULE_*` variables (and `.env`).
///
/// Also initializes logging from the same environment.
pub fn factory_from_env() -> Result<RuleFactory> {
    formrule_log::init();
    let settings = Settings::from_env()?;
    formrule_log::debug!(target: "formrule", "settings from environment: {:?}", settings);
    Ok(RuleFactory::from_settings(&settings)?)
}

/// Factory configured from a JSON, TOML or `.env` file.
pub fn factory_from_file(path: impl AsRef<Path>) -> Result<RuleFactory> {
    let settings = Settings::from_file(path)?;
    Ok(RuleFactory::from_settings(&settings)?)
}

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Catalog, FieldRules, Locale, RuleConfig, RuleFactory, RuleKind, Validate,
        ValidationBuilder, ValidationContext, ValidationError, ValidatorDescriptor,
        factory_from_env, factory_from_file,
    };
}
