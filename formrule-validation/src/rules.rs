// Field rule sets built from descriptors

use crate::traits::ValidationContext;
use crate::{ValidationError, ValidatorDescriptor};
use std::collections::HashMap;

/// Descriptors attached to one field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    field: String,
    descriptors: Vec<ValidatorDescriptor>,
}

impl FieldRules {
    /// Create empty rules for a field
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descriptors: Vec::new(),
        }
    }

    /// Append everything one factory call produced
    pub fn with(mut self, descriptors: Vec<ValidatorDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, descriptor: ValidatorDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn descriptors(&self) -> &[ValidatorDescriptor] {
        &self.descriptors
    }

    /// Validate a value against all descriptors
    pub fn validate(&self, value: &str) -> Result<(), Vec<ValidationError>> {
        self.validate_with(value, &ValidationContext::default())
    }

    /// Every descriptor runs; errors keep descriptor order.
    pub fn validate_with(
        &self,
        value: &str,
        context: &ValidationContext,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = self
            .descriptors
            .iter()
            .flat_map(|descriptor| {
                descriptor
                    .run_with(value, context)
                    .into_iter()
                    .map(move |message| {
                        ValidationError::new(&self.field, message)
                            .with_constraint(descriptor.kind().as_str())
                            .with_value(value)
                    })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Engine-facing descriptor list for this field.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.descriptors.iter().map(|d| d.to_json()).collect())
    }
}

/// Rule sets for a whole form.
#[derive(Debug, Clone, Default)]
pub struct ValidationBuilder {
    rules: Vec<FieldRules>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.rules.push(rules);
        self
    }

    /// Validate all fields. A field missing from `data` is validated as the
    /// empty string, so `required` still fires.
    pub fn validate(&self, data: &HashMap<String, String>) -> Result<(), Vec<ValidationError>> {
        let source = data
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::from(value.as_str())))
            .collect();
        let context = ValidationContext {
            source,
            ..ValidationContext::default()
        };

        let mut all_errors = Vec::new();
        for rule in &self.rules {
            let value = data.get(rule.field()).map(String::as_str).unwrap_or("");
            if let Err(mut errors) = rule.validate_with(value, &context) {
                all_errors.append(&mut errors);
            }
        }

        if all_errors.is_empty() {
            formrule_log::trace!("validated {} field(s)", self.rules.len());
            Ok(())
        } else {
            formrule_log::debug!(
                "{} error(s) across {} field(s)",
                all_errors.len(),
                self.rules.len()
            );
            Err(all_errors)
        }
    }

    /// `{field: [descriptor, ...]}` for handing to a form engine.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .rules
            .iter()
            .map(|rule| (rule.field.clone(), rule.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RuleConfig, RuleFactory};

    fn factory() -> RuleFactory {
        RuleFactory::default()
    }

    #[test]
    fn test_field_rules_collect_errors_in_order() {
        let rules = FieldRules::for_field("name")
            .with(factory().required())
            .with(factory().english(&RuleConfig::new()));

        assert!(rules.validate("John").is_ok());

        let errors = rules.validate("").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].constraint, "required");

        let errors = rules.validate("J0hn").unwrap_err();
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].constraint, "english");
        assert_eq!(errors[0].value.as_deref(), Some("J0hn"));
    }

    #[test]
    fn test_builder_treats_missing_field_as_empty() {
        let builder = ValidationBuilder::new()
            .field(FieldRules::for_field("email").with(factory().email(&RuleConfig::required())))
            .field(
                FieldRules::for_field("nickname")
                    .with(factory().max_length(&RuleConfig::new().with_rules("maxLength:4")).unwrap()),
            );

        let data = HashMap::new();
        let errors = builder.validate(&data).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "必须是邮箱地址");
    }

    #[test]
    fn test_builder_passes_form_as_source() {
        let confirm = ValidatorDescriptor::dynamic(
            crate::RuleKind::English,
            false,
            crate::Procedure::new(|_, value, callback, context| {
                let password = context.source.get("password").and_then(|v| v.as_str());
                if Some(value) == password {
                    callback(Vec::new())
                } else {
                    callback(vec!["mismatch".to_string()])
                }
            }),
        );
        let builder = ValidationBuilder::new().field(FieldRules::for_field("confirm").add(confirm));

        let mut data = HashMap::new();
        data.insert("password".to_string(), "secret".to_string());
        data.insert("confirm".to_string(), "secret".to_string());
        assert!(builder.validate(&data).is_ok());

        data.insert("confirm".to_string(), "other".to_string());
        assert_eq!(builder.validate(&data).unwrap_err()[0].message, "mismatch");
    }

    #[test]
    fn test_builder_to_json() {
        let builder = ValidationBuilder::new()
            .field(FieldRules::for_field("age").with(factory().integer(&RuleConfig::new())));
        let json = builder.to_json();
        assert_eq!(json["age"][0]["pattern"], "^-?[0-9]+$");
        assert_eq!(json["age"][0]["required"], false);
    }
}
