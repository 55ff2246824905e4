//! Message catalog
//!
//! Each rule kind has a fixed sentence per locale. Sentences that mention a
//! bound take it through [`MessageArg`]; a bound that was never configured
//! renders as `undefined`.

use crate::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fourteen rule kinds the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    Email,
    Float,
    Url,
    Integer,
    RangeLength,
    MaxLength,
    MinLength,
    RangeChar,
    Date,
    English,
    EnglishAndNumber,
    Chinese,
    IdCards,
}

impl RuleKind {
    pub const ALL: [RuleKind; 14] = [
        RuleKind::Required,
        RuleKind::Email,
        RuleKind::Float,
        RuleKind::Url,
        RuleKind::Integer,
        RuleKind::RangeLength,
        RuleKind::MaxLength,
        RuleKind::MinLength,
        RuleKind::RangeChar,
        RuleKind::Date,
        RuleKind::English,
        RuleKind::EnglishAndNumber,
        RuleKind::Chinese,
        RuleKind::IdCards,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Email => "email",
            RuleKind::Float => "float",
            RuleKind::Url => "url",
            RuleKind::Integer => "integer",
            RuleKind::RangeLength => "rangeLength",
            RuleKind::MaxLength => "maxLength",
            RuleKind::MinLength => "minLength",
            RuleKind::RangeChar => "rangeChar",
            RuleKind::Date => "date",
            RuleKind::English => "english",
            RuleKind::EnglishAndNumber => "englishAndNumber",
            RuleKind::Chinese => "chinese",
            RuleKind::IdCards => "idCards",
        }
    }

    /// Number of numeric arguments the `rules` string carries.
    pub fn arity(&self) -> usize {
        match self {
            RuleKind::RangeLength | RuleKind::RangeChar => 2,
            RuleKind::MaxLength | RuleKind::MinLength => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RuleError::UnknownKind(s.to_string()))
    }
}

/// Argument interpolated into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageArg {
    #[default]
    None,
    Bound(Option<u64>),
    Range(Option<u64>, Option<u64>),
}

impl MessageArg {
    fn bound(&self) -> String {
        match self {
            MessageArg::Bound(bound) => render_bound(*bound),
            _ => render_bound(None),
        }
    }

    fn range(&self) -> (String, String) {
        match self {
            MessageArg::Range(min, max) => (render_bound(*min), render_bound(*max)),
            _ => (render_bound(None), render_bound(None)),
        }
    }
}

fn render_bound(bound: Option<u64>) -> String {
    bound.map_or_else(|| "undefined".to_string(), |b| b.to_string())
}

/// Supported message locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
        }
    }
}

impl FromStr for Locale {
    type Err = RuleError;

    /// Accepts `zh`, `zh-CN`, `zh_cn`, `en`, `en-US` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_lowercase();
        match normalized.as_str() {
            "zh" | "zh-cn" | "zh-hans" | "zh-hans-cn" => Ok(Locale::ZhCn),
            "en" | "en-us" => Ok(Locale::EnUs),
            _ => Err(RuleError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Why an identity number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdCardFailure {
    /// Input was not text.
    NotAString,
    /// Shape did not match.
    Format,
    /// Check character did not match.
    Checksum,
}

/// Locale-bound message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The kind-specific sentence, without any prefix.
    pub fn template(&self, kind: RuleKind, arg: MessageArg) -> String {
        match self.locale {
            Locale::ZhCn => zh_cn(kind, arg),
            Locale::EnUs => en_us(kind, arg),
        }
    }

    /// Phrase put in front of the template when the field is required.
    pub fn required_prefix(&self) -> &'static str {
        match self.locale {
            Locale::ZhCn => "不能为空 ",
            Locale::EnUs => "cannot be empty ",
        }
    }

    /// Prefix (when `required`) followed by the template.
    pub fn compose(&self, kind: RuleKind, required: bool, arg: MessageArg) -> String {
        let prefix = if required { self.required_prefix() } else { "" };
        format!("{}{}", prefix, self.template(kind, arg))
    }

    pub fn id_card_failure(&self, failure: IdCardFailure) -> String {
        let text = match (self.locale, failure) {
            (Locale::ZhCn, IdCardFailure::NotAString) => "身份证号码必须是字符串",
            (Locale::ZhCn, IdCardFailure::Format | IdCardFailure::Checksum) => "身份证号码格式错误",
            (Locale::EnUs, IdCardFailure::NotAString) => "identity number must be a string",
            (Locale::EnUs, IdCardFailure::Format | IdCardFailure::Checksum) => {
                "identity number format is invalid"
            }
        };
        text.to_string()
    }
}

fn zh_cn(kind: RuleKind, arg: MessageArg) -> String {
    match kind {
        RuleKind::Required => "不允许为空".to_string(),
        RuleKind::Email => "必须是邮箱地址".to_string(),
        RuleKind::Float => "必须是数字(float)".to_string(),
        RuleKind::Url => "必须是URL".to_string(),
        RuleKind::Integer => "必须是整数(int)".to_string(),
        RuleKind::MaxLength => format!("字符串长度(<={})", arg.bound()),
        RuleKind::MinLength => format!("字符串长度(>={})", arg.bound()),
        RuleKind::RangeLength => {
            let (min, max) = arg.range();
            format!("字符串长度({}-{})", min, max)
        }
        RuleKind::RangeChar => {
            let (min, max) = arg.range();
            format!("字符长度({}-{})", min, max)
        }
        RuleKind::Date => "必须是日期类型(yyyy-MM-dd|MM/dd/yyyy)".to_string(),
        RuleKind::English => "必须输入英文".to_string(),
        RuleKind::EnglishAndNumber => "必须输入英文+数字".to_string(),
        RuleKind::Chinese => "必须输入中文".to_string(),
        RuleKind::IdCards => "身份证验证15~18位".to_string(),
    }
}

fn en_us(kind: RuleKind, arg: MessageArg) -> String {
    match kind {
        RuleKind::Required => "must not be empty".to_string(),
        RuleKind::Email => "must be an email address".to_string(),
        RuleKind::Float => "must be a number (float)".to_string(),
        RuleKind::Url => "must be a URL".to_string(),
        RuleKind::Integer => "must be an integer (int)".to_string(),
        RuleKind::MaxLength => format!("string length (<={})", arg.bound()),
        RuleKind::MinLength => format!("string length (>={})", arg.bound()),
        RuleKind::RangeLength => {
            let (min, max) = arg.range();
            format!("string length ({}-{})", min, max)
        }
        RuleKind::RangeChar => {
            let (min, max) = arg.range();
            format!("character width ({}-{})", min, max)
        }
        RuleKind::Date => "must be a date (yyyy-MM-dd|MM/dd/yyyy)".to_string(),
        RuleKind::English => "must contain English letters only".to_string(),
        RuleKind::EnglishAndNumber => "must contain English letters and digits".to_string(),
        RuleKind::Chinese => "must contain Chinese characters only".to_string(),
        RuleKind::IdCards => "identity number (15~18 characters)".to_string(),
    }
}

/// Message carried by a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Rendered when the descriptor was built.
    Text(String),
    /// Rendered on demand with no argument.
    Template { kind: RuleKind, locale: Locale },
}

impl Message {
    pub fn render(&self) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Template { kind, locale } => {
                Catalog::new(*locale).template(*kind, MessageArg::None)
            }
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
