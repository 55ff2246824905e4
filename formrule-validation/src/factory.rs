//! Rule factory
//!
//! One builder per rule kind. Each takes a [`RuleConfig`] and returns the
//! descriptors for a field, freshly built on every call.

use crate::descriptor::{Check, Procedure, ValidatorDescriptor, ValueType};
use crate::messages::{Catalog, Locale, Message, MessageArg, RuleKind};
use crate::patterns::{PatternName, match_date};
use crate::predicates::{self, Range};
use crate::rule_args::{RuleArgs, parse_rules, parse_rules_saturating};
use crate::RuleError;
use formrule_config::{DateCheck, MalformedRules, Settings};
use serde::{Deserialize, Serialize};

const TARGET: &str = "formrule::factory";

/// Caller-supplied options for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub required: bool,
    /// Arguments for parameterised kinds, e.g. `rangeLength:3,10`.
    pub rules: String,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }
}

/// Builds validator descriptors.
///
/// ```
/// use formrule_validation::{RuleConfig, RuleFactory};
///
/// let factory = RuleFactory::default();
/// let rules = factory
///     .build("rangeLength", &RuleConfig::new().with_rules("rangeLength:10,3"))
///     .unwrap();
/// assert!(rules[0].run("abcd").is_empty());
/// assert_eq!(rules[0].run("ab"), vec!["字符串长度(3-10)".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleFactory {
    catalog: Catalog,
    malformed: MalformedRules,
    dates: DateCheck,
}

impl RuleFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, RuleError> {
        let locale: Locale = settings.locale.parse()?;
        Ok(Self {
            catalog: Catalog::new(locale),
            malformed: settings.malformed_rules,
            dates: settings.date_check,
        })
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.catalog = Catalog::new(locale);
        self
    }

    pub fn with_malformed_rules(mut self, policy: MalformedRules) -> Self {
        self.malformed = policy;
        self
    }

    pub fn with_date_check(mut self, check: DateCheck) -> Self {
        self.dates = check;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build by symbolic kind name (`"email"`, `"rangeChar"`, ...).
    pub fn build(&self, kind: &str, config: &RuleConfig) -> Result<Vec<ValidatorDescriptor>, RuleError> {
        self.build_kind(kind.parse()?, config)
    }

    pub fn build_kind(
        &self,
        kind: RuleKind,
        config: &RuleConfig,
    ) -> Result<Vec<ValidatorDescriptor>, RuleError> {
        let descriptors = match kind {
            RuleKind::Required => self.required(),
            RuleKind::Email => self.email(config),
            RuleKind::Float => self.float(config),
            RuleKind::Url => self.url(config),
            RuleKind::Integer => self.integer(config),
            RuleKind::RangeLength => self.range_length(config)?,
            RuleKind::MaxLength => self.max_length(config)?,
            RuleKind::MinLength => self.min_length(config)?,
            RuleKind::RangeChar => self.range_char(config)?,
            RuleKind::Date => self.date(config),
            RuleKind::English => self.english(config),
            RuleKind::EnglishAndNumber => self.english_and_number(config),
            RuleKind::Chinese => self.chinese(config),
            RuleKind::IdCards => self.id_cards(config),
        };
        formrule_log::debug!(
            target: TARGET,
            "built {} descriptor(s) for `{}` (required: {})",
            descriptors.len(),
            kind,
            config.required
        );
        Ok(descriptors)
    }

    /// Parse the rules string, applying the malformed-rules policy.
    ///
    /// Lenient mode saturates oversized arguments to `u64::MAX` and leaves
    /// the bound absent for anything else it cannot parse.
    fn args(&self, kind: RuleKind, rules: &str) -> Result<Option<RuleArgs>, RuleError> {
        match parse_rules(kind, rules) {
            Ok(args) => Ok(Some(args)),
            Err(err) => match self.malformed {
                MalformedRules::Strict => Err(err.into()),
                MalformedRules::Lenient => match parse_rules_saturating(kind, rules) {
                    Ok(args) => {
                        formrule_log::warn!(target: TARGET, "{}; saturating to {}", err, u64::MAX);
                        Ok(Some(args))
                    }
                    Err(_) => {
                        formrule_log::warn!(target: TARGET, "{}; `{}` will carry no bound", err, kind);
                        Ok(None)
                    }
                },
            },
        }
    }

    fn template(&self, kind: RuleKind) -> Message {
        Message::Template {
            kind,
            locale: self.catalog.locale(),
        }
    }

    fn pattern_rule(&self, kind: RuleKind, pattern: PatternName, required: bool) -> Vec<ValidatorDescriptor> {
        vec![ValidatorDescriptor::fixed(
            kind,
            ValueType::String,
            required,
            Check::Pattern(pattern.regex().clone()),
            Message::Text(self.catalog.compose(kind, required, MessageArg::None)),
        )]
    }

    fn bounds_rule(&self, kind: RuleKind, required: bool, range: Range, arg: MessageArg) -> Vec<ValidatorDescriptor> {
        vec![ValidatorDescriptor::fixed(
            kind,
            ValueType::String,
            required,
            Check::Bounds(range),
            Message::Text(self.catalog.compose(kind, required, arg)),
        )]
    }

    /// Reports `message` when `predicate` rejects the value.
    fn predicate_rule<P>(&self, kind: RuleKind, required: bool, message: String, predicate: P) -> Vec<ValidatorDescriptor>
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let procedure = Procedure::new(move |_rule, value, callback, _context| {
            let errors = if predicate(value) { Vec::new() } else { vec![message.clone()] };
            callback(errors)
        });
        vec![ValidatorDescriptor::dynamic(kind, required, procedure)]
    }

    pub fn required(&self) -> Vec<ValidatorDescriptor> {
        vec![ValidatorDescriptor::fixed(
            RuleKind::Required,
            ValueType::String,
            true,
            Check::None,
            self.template(RuleKind::Required),
        )]
    }

    pub fn email(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        vec![ValidatorDescriptor::fixed(
            RuleKind::Email,
            ValueType::Email,
            config.required,
            Check::None,
            self.template(RuleKind::Email),
        )]
    }

    pub fn float(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        self.pattern_rule(RuleKind::Float, PatternName::Float, config.required)
    }

    pub fn url(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        self.pattern_rule(RuleKind::Url, PatternName::Url, config.required)
    }

    pub fn integer(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        self.pattern_rule(RuleKind::Integer, PatternName::Integer, config.required)
    }

    /// `rangeLength:<a>,<b>`; the two numbers are sorted into min and max.
    pub fn range_length(&self, config: &RuleConfig) -> Result<Vec<ValidatorDescriptor>, RuleError> {
        let range = self
            .args(RuleKind::RangeLength, &config.rules)?
            .map(|args| args.range())
            .unwrap_or_default();
        Ok(self.bounds_rule(
            RuleKind::RangeLength,
            config.required,
            range,
            MessageArg::Range(range.min, range.max),
        ))
    }

    /// `maxLength:<n>`
    pub fn max_length(&self, config: &RuleConfig) -> Result<Vec<ValidatorDescriptor>, RuleError> {
        let max = self.args(RuleKind::MaxLength, &config.rules)?.map(|args| args.first());
        Ok(self.bounds_rule(
            RuleKind::MaxLength,
            config.required,
            Range::new(None, max),
            MessageArg::Bound(max),
        ))
    }

    /// `minLength:<n>`
    pub fn min_length(&self, config: &RuleConfig) -> Result<Vec<ValidatorDescriptor>, RuleError> {
        let min = self.args(RuleKind::MinLength, &config.rules)?.map(|args| args.first());
        Ok(self.bounds_rule(
            RuleKind::MinLength,
            config.required,
            Range::new(min, None),
            MessageArg::Bound(min),
        ))
    }

    /// `rangeChar:<a>,<b>`, measured in display width.
    ///
    /// An unparseable rules string in lenient mode leaves the width unbounded.
    pub fn range_char(&self, config: &RuleConfig) -> Result<Vec<ValidatorDescriptor>, RuleError> {
        let range = self
            .args(RuleKind::RangeChar, &config.rules)?
            .map(|args| args.range())
            .unwrap_or_default();
        let message = self
            .catalog
            .compose(RuleKind::RangeChar, config.required, MessageArg::Range(range.min, range.max));
        Ok(self.predicate_rule(RuleKind::RangeChar, config.required, message, move |value| {
            predicates::range_char(value, range)
        }))
    }

    /// `yyyy-mm-dd` or `mm/dd/yyyy` with month 01-12 and day 01-31; with
    /// [`DateCheck::Calendar`] the date must also exist.
    pub fn date(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        let message = self.catalog.compose(RuleKind::Date, config.required, MessageArg::None);
        let dates = self.dates;
        self.predicate_rule(RuleKind::Date, config.required, message, move |value| {
            match_date(value).is_some_and(|parts| {
                parts.in_range() && (dates == DateCheck::Range || parts.exists())
            })
        })
    }

    pub fn english(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        let message = self.catalog.compose(RuleKind::English, config.required, MessageArg::None);
        self.predicate_rule(RuleKind::English, config.required, message, predicates::is_english)
    }

    pub fn english_and_number(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        let message = self
            .catalog
            .compose(RuleKind::EnglishAndNumber, config.required, MessageArg::None);
        self.predicate_rule(
            RuleKind::EnglishAndNumber,
            config.required,
            message,
            predicates::is_english_and_number,
        )
    }

    pub fn chinese(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        let message = self.catalog.compose(RuleKind::Chinese, config.required, MessageArg::None);
        self.predicate_rule(RuleKind::Chinese, config.required, message, predicates::is_chinese)
    }

    /// Empty and required: the unprefixed `idCards` message. Empty and
    /// optional: valid. Otherwise the identity-number verifier decides.
    pub fn id_cards(&self, config: &RuleConfig) -> Vec<ValidatorDescriptor> {
        let catalog = self.catalog;
        let required = config.required;
        let procedure = Procedure::new(move |_rule, value, callback, _context| {
            let errors = if value.is_empty() {
                if required {
                    vec![catalog.template(RuleKind::IdCards, MessageArg::None)]
                } else {
                    Vec::new()
                }
            } else {
                let check = predicates::validate_id_card_in(value, &catalog);
                if check.is_valid() { Vec::new() } else { vec![check.message] }
            };
            callback(errors)
        });
        vec![ValidatorDescriptor::dynamic(RuleKind::IdCards, required, procedure)]
    }
}
