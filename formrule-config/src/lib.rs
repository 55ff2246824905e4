//! Settings for the formrule rule factory.
//!
//! Settings come from `FORMRULE_*` environment variables (with `.env`
//! support), or from JSON, TOML, or `.env` files.
//!
//! ```
//! use formrule_config::{MalformedRules, Settings};
//!
//! let settings = Settings::from_value(serde_json::json!({
//!     "locale": "en-US",
//!     "malformed_rules": "strict",
//! }))
//! .unwrap();
//! assert_eq!(settings.malformed_rules, MalformedRules::Strict);
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{DateCheck, MalformedRules, Settings};
pub use validation::{ConfigValidator, Validate};
