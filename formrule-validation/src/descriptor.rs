//! Validator descriptors
//!
//! A descriptor is one rule for one field, in the shape a form-validation
//! engine consumes. It is either static (pattern or length bounds plus a
//! message) or dynamic (a [`Procedure`] that reports through a callback).
//! [`Check`] makes holding both at once unrepresentable.

use crate::messages::{Message, RuleKind};
use crate::patterns::PatternName;
use crate::predicates::Range;
use crate::traits::{RuleProcedure, ValidationContext};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Semantic type tag handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Email,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Email => "email",
        }
    }
}

/// Shared handle to a dynamic rule body.
#[derive(Clone)]
pub struct Procedure(Arc<dyn RuleProcedure>);

impl Procedure {
    pub fn new<F>(procedure: F) -> Self
    where
        F: Fn(&ValidatorDescriptor, &str, &mut dyn FnMut(Vec<String>), &ValidationContext)
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(procedure))
    }

    pub fn call(
        &self,
        rule: &ValidatorDescriptor,
        value: &str,
        callback: &mut dyn FnMut(Vec<String>),
        context: &ValidationContext,
    ) {
        self.0.call(rule, value, callback, context);
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Procedure(..)")
    }
}

/// What a descriptor checks beyond `required`.
#[derive(Debug, Clone)]
pub enum Check {
    /// Nothing beyond the value type.
    None,
    Pattern(Regex),
    /// Inclusive bounds on the character count.
    Bounds(Range),
    Procedure(Procedure),
}

#[derive(Debug, Clone)]
pub struct ValidatorDescriptor {
    kind: RuleKind,
    value_type: ValueType,
    required: bool,
    check: Check,
    message: Option<Message>,
}

impl ValidatorDescriptor {
    /// A declarative descriptor. Passing `Check::Procedure` here is allowed
    /// but [`ValidatorDescriptor::dynamic`] is the usual route.
    pub fn fixed(
        kind: RuleKind,
        value_type: ValueType,
        required: bool,
        check: Check,
        message: Message,
    ) -> Self {
        Self {
            kind,
            value_type,
            required,
            check,
            message: Some(message),
        }
    }

    /// A string-typed descriptor whose procedure renders its own messages.
    pub fn dynamic(kind: RuleKind, required: bool, procedure: Procedure) -> Self {
        Self {
            kind,
            value_type: ValueType::String,
            required,
            check: Check::Procedure(procedure),
            message: None,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn pattern(&self) -> Option<&Regex> {
        match &self.check {
            Check::Pattern(regex) => Some(regex),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Option<Range> {
        match &self.check {
            Check::Bounds(range) => Some(*range),
            _ => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.check, Check::Procedure(_))
    }

    /// Evaluate `value` with an empty context.
    pub fn run(&self, value: &str) -> Vec<String> {
        self.run_with(value, &ValidationContext::default())
    }

    /// Evaluate `value` the way a form engine would: dynamic descriptors
    /// hand off to their procedure; static ones check required, type,
    /// pattern and length.
    pub fn run_with(&self, value: &str, context: &ValidationContext) -> Vec<String> {
        match &self.check {
            Check::Procedure(procedure) => self.run_procedure(procedure, value, context),
            _ => self.run_static(value),
        }
    }

    fn run_procedure(
        &self,
        procedure: &Procedure,
        value: &str,
        context: &ValidationContext,
    ) -> Vec<String> {
        let mut reported: Option<Vec<String>> = None;
        let mut extra_calls = 0usize;
        {
            let mut callback = |errors: Vec<String>| {
                if reported.is_none() {
                    reported = Some(errors);
                } else {
                    extra_calls += 1;
                }
            };
            procedure.call(self, value, &mut callback, context);
        }

        if extra_calls > 0 {
            formrule_log::warn!(
                "`{}` procedure invoked its callback {} extra time(s); later reports ignored",
                self.kind,
                extra_calls
            );
        }
        reported.unwrap_or_else(|| {
            formrule_log::warn!("`{}` procedure returned without invoking its callback", self.kind);
            Vec::new()
        })
    }

    fn run_static(&self, value: &str) -> Vec<String> {
        let fail = || vec![self.message.as_ref().map(Message::render).unwrap_or_default()];

        if value.is_empty() {
            return if self.required { fail() } else { Vec::new() };
        }

        let valid = match &self.check {
            Check::None => self.value_type != ValueType::Email || PatternName::Email.is_match(value),
            Check::Pattern(regex) => regex.is_match(value),
            Check::Bounds(range) => range.contains(value.chars().count() as u64),
            Check::Procedure(_) => true,
        };

        if valid { Vec::new() } else { fail() }
    }

    /// The engine-facing shape: `type`, `required`, then `pattern`,
    /// `min`/`max` or `validator`, and `message` when one is held.
    /// Absent bounds are omitted. `required` descriptors carry no `type`
    /// so the engine does not type-check the value.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if self.kind != RuleKind::Required {
            map.insert("type".into(), Value::from(self.value_type.as_str()));
        }
        map.insert("required".into(), Value::from(self.required));

        match &self.check {
            Check::None => {}
            Check::Pattern(regex) => {
                map.insert("pattern".into(), Value::from(regex.as_str()));
            }
            Check::Bounds(range) => {
                if let Some(min) = range.min {
                    map.insert("min".into(), Value::from(min));
                }
                if let Some(max) = range.max {
                    map.insert("max".into(), Value::from(max));
                }
            }
            Check::Procedure(_) => {
                map.insert("validator".into(), Value::from(true));
            }
        }

        if let Some(message) = &self.message {
            map.insert("message".into(), Value::from(message.render()));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;

    fn text(s: &str) -> Message {
        Message::Text(s.to_string())
    }

    #[test]
    fn test_static_pattern_descriptor() {
        let descriptor = ValidatorDescriptor::fixed(
            RuleKind::Integer,
            ValueType::String,
            false,
            Check::Pattern(PatternName::Integer.regex().clone()),
            text("int"),
        );
        assert!(descriptor.run("42").is_empty());
        assert_eq!(descriptor.run("4.2"), vec!["int".to_string()]);
        assert!(descriptor.run("").is_empty());
        assert!(!descriptor.is_dynamic());
    }

    #[test]
    fn test_required_empty_value() {
        let descriptor = ValidatorDescriptor::fixed(
            RuleKind::Required,
            ValueType::String,
            true,
            Check::None,
            Message::Template {
                kind: RuleKind::Required,
                locale: Locale::ZhCn,
            },
        );
        assert_eq!(descriptor.run(""), vec!["不允许为空".to_string()]);
        assert!(descriptor.run(" ").is_empty());
    }

    #[test]
    fn test_bounds_count_chars() {
        let descriptor = ValidatorDescriptor::fixed(
            RuleKind::MaxLength,
            ValueType::String,
            false,
            Check::Bounds(Range::at_most(2)),
            text("too long"),
        );
        assert!(descriptor.run("你好").is_empty());
        assert_eq!(descriptor.run("abc").len(), 1);
    }

    #[test]
    fn test_email_type_without_pattern() {
        let descriptor = ValidatorDescriptor::fixed(
            RuleKind::Email,
            ValueType::Email,
            false,
            Check::None,
            text("email"),
        );
        assert!(descriptor.run("a@example.com").is_empty());
        assert_eq!(descriptor.run("nope").len(), 1);
    }

    #[test]
    fn test_procedure_receives_value_and_context() {
        let descriptor = ValidatorDescriptor::dynamic(
            RuleKind::English,
            false,
            Procedure::new(|rule, value, callback, context| {
                let expected = context.source.get("expected").and_then(Value::as_str);
                if Some(value) == expected {
                    callback(Vec::new());
                } else {
                    callback(vec![format!("{} mismatch", rule.kind())]);
                }
            }),
        );

        let context = ValidationContext::new().with_source("expected", "abc");
        assert!(descriptor.run_with("abc", &context).is_empty());
        assert_eq!(
            descriptor.run_with("abd", &context),
            vec!["english mismatch".to_string()]
        );
    }

    #[test]
    fn test_first_callback_wins() {
        let descriptor = ValidatorDescriptor::dynamic(
            RuleKind::Chinese,
            false,
            Procedure::new(|_, _, callback, _| {
                callback(vec!["first".into()]);
                callback(Vec::new());
            }),
        );
        assert_eq!(descriptor.run("x"), vec!["first".to_string()]);
    }

    #[test]
    fn test_missing_callback_reports_nothing() {
        let descriptor =
            ValidatorDescriptor::dynamic(RuleKind::Date, false, Procedure::new(|_, _, _, _| {}));
        assert!(descriptor.run("x").is_empty());
    }

    #[test]
    fn test_to_json_shapes() {
        let pattern = ValidatorDescriptor::fixed(
            RuleKind::Integer,
            ValueType::String,
            true,
            Check::Pattern(PatternName::Integer.regex().clone()),
            text("m"),
        );
        assert_eq!(
            pattern.to_json(),
            serde_json::json!({"type": "string", "required": true, "pattern": "^-?[0-9]+$", "message": "m"})
        );

        let required = ValidatorDescriptor::fixed(
            RuleKind::Required,
            ValueType::String,
            true,
            Check::None,
            text("m"),
        );
        assert_eq!(
            required.to_json(),
            serde_json::json!({"required": true, "message": "m"})
        );

        let bounds = ValidatorDescriptor::fixed(
            RuleKind::MinLength,
            ValueType::String,
            false,
            Check::Bounds(Range::unbounded()),
            text("m"),
        );
        assert_eq!(
            bounds.to_json(),
            serde_json::json!({"type": "string", "required": false, "message": "m"})
        );

        let dynamic = ValidatorDescriptor::dynamic(
            RuleKind::Date,
            false,
            Procedure::new(|_, _, callback, _| callback(Vec::new())),
        );
        assert_eq!(
            dynamic.to_json(),
            serde_json::json!({"type": "string", "required": false, "validator": true})
        );
    }
}
