// Pattern library

use crate::RuleError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

// Digit classes are spelled `[0-9]`: `\d` would also accept non-ASCII digits.

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static POSITIVE_INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

static NEGATIVE_INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-[0-9]+$").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

static POSITIVE_FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").unwrap());

static MINUS_FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-[0-9]+\.[0-9]+$").unwrap());

static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").unwrap());

static REAL_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+\.?[0-9]*$").unwrap());

/// yyyy-mm-dd
static DATE_1_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap());

/// mm/dd/yyyy
static DATE_2_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").unwrap());

/// Symbolic names of the fixed patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternName {
    PositiveInteger,
    NegativeInteger,
    Integer,
    PositiveFloat,
    MinusFloat,
    Float,
    RealNumber,
    Date1,
    Date2,
    Email,
    Url,
}

impl PatternName {
    pub const ALL: [PatternName; 11] = [
        PatternName::PositiveInteger,
        PatternName::NegativeInteger,
        PatternName::Integer,
        PatternName::PositiveFloat,
        PatternName::MinusFloat,
        PatternName::Float,
        PatternName::RealNumber,
        PatternName::Date1,
        PatternName::Date2,
        PatternName::Email,
        PatternName::Url,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternName::PositiveInteger => "positiveInteger",
            PatternName::NegativeInteger => "negativeInteger",
            PatternName::Integer => "integer",
            PatternName::PositiveFloat => "positiveFloat",
            PatternName::MinusFloat => "minusFloat",
            PatternName::Float => "float",
            PatternName::RealNumber => "realNumber",
            PatternName::Date1 => "date_1",
            PatternName::Date2 => "date_2",
            PatternName::Email => "email",
            PatternName::Url => "url",
        }
    }

    /// The compiled, anchored matcher.
    pub fn regex(&self) -> &'static Regex {
        match self {
            PatternName::PositiveInteger => &POSITIVE_INTEGER_REGEX,
            PatternName::NegativeInteger => &NEGATIVE_INTEGER_REGEX,
            PatternName::Integer => &INTEGER_REGEX,
            PatternName::PositiveFloat => &POSITIVE_FLOAT_REGEX,
            PatternName::MinusFloat => &MINUS_FLOAT_REGEX,
            PatternName::Float => &FLOAT_REGEX,
            PatternName::RealNumber => &REAL_NUMBER_REGEX,
            PatternName::Date1 => &DATE_1_REGEX,
            PatternName::Date2 => &DATE_2_REGEX,
            PatternName::Email => &EMAIL_REGEX,
            PatternName::Url => &URL_REGEX,
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RuleError::UnknownPattern(s.to_string()))
    }
}

/// Look up a fixed pattern by symbolic name.
pub fn lookup(name: &str) -> Option<&'static Regex> {
    name.parse::<PatternName>().ok().map(|name| name.regex())
}

/// Matcher for numbers with at most `places` fractional digits.
///
/// Every call compiles a new `Regex`; nothing is cached or shared.
pub fn retain(places: usize) -> Result<Regex, RuleError> {
    Ok(Regex::new(&format!(r"^-?[0-9]+\.?[0-9]{{0,{}}}$", places))?)
}

/// Captured components of a date in either accepted shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
}

impl DateParts<'_> {
    /// Month in 1..=12 and day in 1..=31, checked independently.
    ///
    /// The `<=` tests compare numerically; the zero tests compare the
    /// captured text against `"00"`.
    pub fn in_range(&self) -> bool {
        let (Ok(month), Ok(day)) = (self.month.parse::<u32>(), self.day.parse::<u32>()) else {
            return false;
        };
        month <= 12 && day <= 31 && self.month != "00" && self.day != "00"
    }

    /// The date exists on the proleptic Gregorian calendar.
    pub fn exists(&self) -> bool {
        match (
            self.year.parse::<i32>(),
            self.month.parse::<u32>(),
            self.day.parse::<u32>(),
        ) {
            (Ok(year), Ok(month), Ok(day)) => {
                chrono::NaiveDate::from_ymd_opt(year, month, day).is_some()
            }
            _ => false,
        }
    }
}

/// Match `yyyy-mm-dd`, then `mm/dd/yyyy`, returning the captured groups.
pub fn match_date(value: &str) -> Option<DateParts<'_>> {
    if let Some(caps) = DATE_1_REGEX.captures(value) {
        return Some(DateParts {
            year: caps.get(1)?.as_str(),
            month: caps.get(2)?.as_str(),
            day: caps.get(3)?.as_str(),
        });
    }
    let caps = DATE_2_REGEX.captures(value)?;
    Some(DateParts {
        month: caps.get(1)?.as_str(),
        day: caps.get(2)?.as_str(),
        year: caps.get(3)?.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_patterns() {
        assert!(PatternName::Integer.is_match("-42"));
        assert!(PatternName::Integer.is_match("0"));
        assert!(!PatternName::Integer.is_match("4.2"));
        assert!(!PatternName::Integer.is_match("+1"));
        assert!(PatternName::PositiveInteger.is_match("42"));
        assert!(!PatternName::PositiveInteger.is_match("-42"));
        assert!(PatternName::NegativeInteger.is_match("-42"));
        assert!(!PatternName::NegativeInteger.is_match("42"));
    }

    #[test]
    fn test_patterns_are_anchored() {
        assert!(!PatternName::Integer.is_match("12a"));
        assert!(!PatternName::Integer.is_match("a12"));
        assert!(!PatternName::Float.is_match("x1.5"));
        assert!(!PatternName::Date1.is_match("2024-01-01T00"));
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        assert!(!PatternName::Integer.is_match("١٢٣"));
        assert!(!PatternName::PositiveInteger.is_match("１２"));
    }

    #[test]
    fn test_float_family() {
        assert!(PatternName::Float.is_match("1.5"));
        assert!(PatternName::Float.is_match("-1.5"));
        assert!(!PatternName::Float.is_match("15"));
        assert!(!PatternName::Float.is_match("1."));
        assert!(PatternName::PositiveFloat.is_match("0.25"));
        assert!(!PatternName::PositiveFloat.is_match("-0.25"));
        assert!(PatternName::MinusFloat.is_match("-0.25"));
    }

    #[test]
    fn test_real_number() {
        for value in ["1", "-1", "1.", "1.25", "-0.5"] {
            assert!(PatternName::RealNumber.is_match(value), "{}", value);
        }
        for value in [".5", "-", "1.2.3", ""] {
            assert!(!PatternName::RealNumber.is_match(value), "{}", value);
        }
    }

    #[test]
    fn test_retain() {
        let two = retain(2).unwrap();
        assert!(two.is_match("3"));
        assert!(two.is_match("3.1"));
        assert!(two.is_match("-3.14"));
        assert!(!two.is_match("3.141"));

        let zero = retain(0).unwrap();
        assert!(zero.is_match("3"));
        assert!(zero.is_match("3."));
        assert!(!zero.is_match("3.1"));
    }

    #[test]
    fn test_retain_builds_independent_matchers() {
        let a = retain(1).unwrap();
        let b = retain(3).unwrap();
        assert!(!a.is_match("1.23"));
        assert!(b.is_match("1.23"));
    }

    #[test]
    fn test_lookup_by_name() {
        assert!(lookup("integer").unwrap().is_match("7"));
        assert!(lookup("date_2").unwrap().is_match("01/15/2024"));
        assert!(lookup("decimal").is_none());
        for name in PatternName::ALL {
            assert_eq!(name.as_str().parse::<PatternName>().unwrap(), name);
        }
    }

    #[test]
    fn test_match_date_formats() {
        let parts = match_date("2024-02-29").unwrap();
        assert_eq!((parts.year, parts.month, parts.day), ("2024", "02", "29"));

        let parts = match_date("01/15/2024").unwrap();
        assert_eq!((parts.year, parts.month, parts.day), ("2024", "01", "15"));

        assert!(match_date("2024/01/15").is_none());
        assert!(match_date("15-01-2024").is_none());
    }

    #[test]
    fn test_date_parts_range() {
        assert!(match_date("2024-12-31").unwrap().in_range());
        assert!(match_date("2024-02-30").unwrap().in_range());
        assert!(!match_date("2024-13-01").unwrap().in_range());
        assert!(!match_date("2024-00-10").unwrap().in_range());
        assert!(!match_date("2024-10-00").unwrap().in_range());
        assert!(!match_date("2024-01-32").unwrap().in_range());
    }

    #[test]
    fn test_date_parts_calendar() {
        assert!(match_date("2024-02-29").unwrap().exists());
        assert!(!match_date("2023-02-29").unwrap().exists());
        assert!(!match_date("2024-02-30").unwrap().exists());
        assert!(match_date("12/31/1999").unwrap().exists());
    }

    #[test]
    fn test_email_and_url() {
        assert!(PatternName::Email.is_match("user+tag@example.com"));
        assert!(!PatternName::Email.is_match("@example.com"));
        assert!(PatternName::Url.is_match("https://example.com/path?q=1"));
        assert!(!PatternName::Url.is_match("example.com"));
    }
}
