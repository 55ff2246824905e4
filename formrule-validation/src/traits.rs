// Validation traits

use crate::{ValidationError, ValidatorDescriptor};
use serde_json::{Map, Value};

/// Synchronous body of a dynamic descriptor.
///
/// Implementations call `callback` exactly once before returning, with an
/// empty list when the value is valid.
pub trait RuleProcedure: Send + Sync {
    fn call(
        &self,
        rule: &ValidatorDescriptor,
        value: &str,
        callback: &mut dyn FnMut(Vec<String>),
        context: &ValidationContext,
    );
}

impl<F> RuleProcedure for F
where
    F: Fn(&ValidatorDescriptor, &str, &mut dyn FnMut(Vec<String>), &ValidationContext)
        + Send
        + Sync,
{
    fn call(
        &self,
        rule: &ValidatorDescriptor,
        value: &str,
        callback: &mut dyn FnMut(Vec<String>),
        context: &ValidationContext,
    ) {
        self(rule, value, callback, context)
    }
}

/// What the calling engine passes alongside the value: the whole form
/// (`source`) and its own options. Built-in procedures ignore both.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub source: Map<String, Value>,
    pub options: Map<String, Value>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.source.insert(key.into(), value.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Types that validate themselves, typically form structs.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}
