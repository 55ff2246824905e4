// Environment variable loading

use crate::Result;
use std::collections::HashMap;
use std::env;

/// Prefix applied when none is given.
pub const DEFAULT_PREFIX: &str = "FORMRULE";

/// Collects prefixed environment variables into lower-case keys.
///
/// With prefix `FORMRULE`, `FORMRULE_MALFORMED_RULES=strict` becomes
/// `malformed_rules = "strict"`.
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load `.env` from the working directory (if present), then read the
    /// process environment.
    pub fn load_with_dotenv(&self) -> Result<HashMap<String, String>> {
        dotenvy::dotenv().ok();
        self.load()
    }

    /// Read the process environment.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.load_from(env::vars()))
    }

    /// Filter and normalise an arbitrary set of variables.
    pub fn load_from<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let marker = format!("{}_", self.prefix);
        vars.into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&marker)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_lowercase(), value))
            })
            .collect()
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
