//! Declarative validation rules for form fields
//!
//! Compiles a small set of named rule kinds into validator descriptors a
//! form-validation engine can consume: a pattern, length bounds, or a
//! callback procedure, each with a localized message.
//!
//! # Examples
//!
//! ## Building descriptors
//!
//! ```
//! use formrule_validation::{RuleConfig, RuleFactory};
//!
//! let factory = RuleFactory::default();
//!
//! let age = factory.build("integer", &RuleConfig::required()).unwrap();
//! assert_eq!(age[0].pattern().unwrap().as_str(), "^-?[0-9]+$");
//! assert_eq!(age[0].message().unwrap().render(), "不能为空 必须是整数(int)");
//!
//! let nickname = factory
//!     .build("rangeChar", &RuleConfig::new().with_rules("rangeChar:2,8"))
//!     .unwrap();
//! assert!(nickname[0].run("你好").is_empty());
//! assert_eq!(nickname[0].run("你好你好你"), vec!["字符长度(2-8)".to_string()]);
//! ```
//!
//! ## Validating a form
//!
//! ```
//! use formrule_validation::{FieldRules, RuleConfig, RuleFactory, ValidationBuilder};
//! use std::collections::HashMap;
//!
//! let factory = RuleFactory::default();
//! let form = ValidationBuilder::new()
//!     .field(FieldRules::for_field("email").with(factory.email(&RuleConfig::required())))
//!     .field(FieldRules::for_field("id").with(factory.id_cards(&RuleConfig::required())));
//!
//! let mut data = HashMap::new();
//! data.insert("email".to_string(), "user@example.com".to_string());
//! data.insert("id".to_string(), "11010519491231002X".to_string());
//! assert!(form.validate(&data).is_ok());
//!
//! data.insert("id".to_string(), "110101199003070771".to_string());
//! let errors = form.validate(&data).unwrap_err();
//! assert_eq!(errors[0].constraint, "idCards");
//! ```
//!
//! ## Identity numbers
//!
//! ```
//! use formrule_validation::predicates::validate_id_card;
//!
//! assert!(validate_id_card("110101199003070775").is_valid());
//! assert_eq!(validate_id_card("110101199003070771").message, "身份证号码格式错误");
//! ```

mod descriptor;
mod errors;
mod factory;
mod messages;
pub mod patterns;
pub mod predicates;
mod rule_args;
mod rules;
mod traits;

pub use descriptor::*;
pub use errors::*;
pub use factory::*;
pub use messages::*;
pub use patterns::{DateParts, PatternName};
pub use predicates::{IdCardCheck, IdCardCode, Range};
pub use rule_args::*;
pub use rules::*;
pub use traits::*;

pub use formrule_config::{DateCheck, MalformedRules, Settings};
