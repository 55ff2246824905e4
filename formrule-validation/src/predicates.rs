//! Semantic predicates
//!
//! Checks that a regular expression alone cannot express: display-width
//! ranges and the identity-number check character.

use crate::messages::{Catalog, IdCardFailure};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

/// Inclusive code-point ranges counted as two display units.
///
/// A single block from GREEK CAPITAL LETTER ALPHA to FULLWIDTH YEN SIGN.
/// It covers CJK ideographs, kana, hangul and fullwidth forms, and also
/// Greek, Cyrillic and other scripts in that span.
///
/// Widths are per `char`. Characters outside the Basic Multilingual Plane
/// (CJK Extension B, emoji) fall outside the table and count 1, not one
/// unit per UTF-16 surrogate half.
pub const WIDE_CHAR_RANGES: &[(u32, u32)] = &[(0x0391, 0xFFE5)];

/// Display units of one character.
pub fn char_width(c: char) -> u64 {
    let cp = c as u32;
    if WIDE_CHAR_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
    {
        2
    } else {
        1
    }
}

/// Sum of [`char_width`] over the string.
pub fn display_width(value: &str) -> u64 {
    value.chars().map(char_width).sum()
}

/// Inclusive range with optional ends; a missing end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Range {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl Range {
    /// Builds a range; two given bounds are ordered so that `min <= max`.
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        match (min, max) {
            (Some(a), Some(b)) if a > b => Self {
                min: Some(b),
                max: Some(a),
            },
            _ => Self { min, max },
        }
    }

    /// Both bounds, in either order.
    pub fn sorted(a: u64, b: u64) -> Self {
        Self::new(Some(a), Some(b))
    }

    pub fn at_most(max: u64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn at_least(min: u64) -> Self {
        Self::new(Some(min), None)
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, n: u64) -> bool {
        self.min.is_none_or(|min| n >= min) && self.max.is_none_or(|max| n <= max)
    }
}

/// `true` iff the display width of `value` lies within `range`.
pub fn range_char(value: &str, range: Range) -> bool {
    let width = display_width(value);
    formrule_log::trace!("display width {} against {:?}", width, range);
    range.contains(width)
}

static NON_ENGLISH: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z\s]").unwrap());

static NON_ENGLISH_OR_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]").unwrap());

static NON_CHINESE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x{4e00}-\x{9fa5}]").unwrap());

static ASCII_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").unwrap());

static ASCII_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

/// Only ASCII letters and whitespace.
pub fn is_english(value: &str) -> bool {
    !NON_ENGLISH.is_match(value)
}

/// At least one ASCII letter, at least one digit, and nothing but
/// letters, digits and whitespace.
pub fn is_english_and_number(value: &str) -> bool {
    ASCII_LETTER.is_match(value) && ASCII_DIGIT.is_match(value) && !NON_ENGLISH_OR_DIGIT.is_match(value)
}

/// Only CJK unified ideographs U+4E00..=U+9FA5.
pub fn is_chinese(value: &str) -> bool {
    !NON_CHINESE.is_match(value)
}

// ============================================================================
// Identity numbers (ISO 7064 MOD 11-2)
// ============================================================================

/// Region, birth year 1900-2099, month, day, sequence, check character.
static ID_CARD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9][0-9]{5}(19[0-9]{2}|20[0-9]{2})(0[1-9]|1[012])(0[1-9]|[12][0-9]|3[01])[0-9]{3}[0-9X]$")
        .unwrap()
});

/// Weight applied to each of the first seventeen digits.
pub const WEIGHT_FACTORS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Expected check character, indexed by `sum % 11`.
pub const CHECK_CODES: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];

/// Check character for seventeen ASCII digits, or `None` for any other input.
pub fn check_character(first17: &str) -> Option<char> {
    if first17.len() != WEIGHT_FACTORS.len() {
        return None;
    }
    let mut sum = 0u32;
    for (c, weight) in first17.chars().zip(WEIGHT_FACTORS) {
        sum += c.to_digit(10)? * weight;
    }
    Some(CHECK_CODES[(sum % 11) as usize])
}

/// Outcome code of an identity-number check; serialises as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdCardCode {
    Valid,
    Invalid,
}

impl IdCardCode {
    pub fn as_i8(&self) -> i8 {
        match self {
            IdCardCode::Valid => 1,
            IdCardCode::Invalid => -1,
        }
    }
}

impl Serialize for IdCardCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

/// Result of [`validate_id_card`]: `{"code": 1|-1, "msg": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdCardCheck {
    pub code: IdCardCode,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(skip)]
    pub failure: Option<IdCardFailure>,
}

impl IdCardCheck {
    fn valid() -> Self {
        Self {
            code: IdCardCode::Valid,
            message: String::new(),
            failure: None,
        }
    }

    fn invalid(failure: IdCardFailure, catalog: &Catalog) -> Self {
        Self {
            code: IdCardCode::Invalid,
            message: catalog.id_card_failure(failure),
            failure: Some(failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.code == IdCardCode::Valid
    }
}

/// Verify an 18-character identity number with the default catalog.
pub fn validate_id_card(code: &str) -> IdCardCheck {
    validate_id_card_in(code, &Catalog::default())
}

/// Verify an identity number; failure messages come from `catalog`.
///
/// The shape must match and the check character must agree with the
/// weighted sum of the first seventeen digits.
pub fn validate_id_card_in(code: &str, catalog: &Catalog) -> IdCardCheck {
    if !ID_CARD_REGEX.is_match(code) {
        return IdCardCheck::invalid(IdCardFailure::Format, catalog);
    }

    // The shape guarantees 18 ASCII characters.
    let (first17, last) = code.split_at(17);
    match check_character(first17) {
        Some(expected) if last.starts_with(expected) => IdCardCheck::valid(),
        _ => IdCardCheck::invalid(IdCardFailure::Checksum, catalog),
    }
}

/// Verify untyped input; anything other than a JSON string is rejected
/// before any digit is read, since numbers lose leading zeros and precision.
pub fn validate_id_card_value(value: &serde_json::Value, catalog: &Catalog) -> IdCardCheck {
    match value.as_str() {
        Some(code) => validate_id_card_in(code, catalog),
        None => IdCardCheck::invalid(IdCardFailure::NotAString, catalog),
    }
}
