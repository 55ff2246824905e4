// Parser for `rules` strings such as `rangeLength:3,10` or `maxLength:20`

use crate::messages::RuleKind;
use crate::predicates::Range;
use thiserror::Error;

/// Numeric arguments of a parameterised rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleArgs {
    One(u64),
    Two(u64, u64),
}

impl RuleArgs {
    /// Two arguments become a sorted range; one argument is returned as
    /// `min == max`.
    pub fn range(&self) -> Range {
        match *self {
            RuleArgs::One(n) => Range::sorted(n, n),
            RuleArgs::Two(a, b) => Range::sorted(a, b),
        }
    }

    pub fn first(&self) -> u64 {
        match *self {
            RuleArgs::One(n) | RuleArgs::Two(n, _) => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("`{kind}` takes no rules string arguments")]
    NotParameterised { kind: RuleKind },

    #[error("rules string {rules:?} does not match `{kind}:{shape}`")]
    Malformed {
        kind: RuleKind,
        rules: String,
        shape: &'static str,
    },

    #[error("rules string {rules:?} has an argument too large for `{kind}`")]
    Overflow { kind: RuleKind, rules: String },
}

/// Parse `<kind>:<n>` or `<kind>:<a>,<b>` for `kind`.
///
/// The whole string must match: the kind name, a colon, then exactly as
/// many comma-separated ASCII digit runs as the kind takes. No whitespace
/// or signs are accepted.
pub fn parse_rules(kind: RuleKind, rules: &str) -> Result<RuleArgs, RuleParseError> {
    parse(kind, rules, false)
}

/// Like [`parse_rules`], but an argument too large for `u64` becomes
/// `u64::MAX` instead of [`RuleParseError::Overflow`].
pub fn parse_rules_saturating(kind: RuleKind, rules: &str) -> Result<RuleArgs, RuleParseError> {
    parse(kind, rules, true)
}

fn parse(kind: RuleKind, rules: &str, saturate: bool) -> Result<RuleArgs, RuleParseError> {
    let shape = match kind.arity() {
        1 => "<n>",
        2 => "<a>,<b>",
        _ => return Err(RuleParseError::NotParameterised { kind }),
    };
    let malformed = || RuleParseError::Malformed {
        kind,
        rules: rules.to_string(),
        shape,
    };

    let body = rules
        .strip_prefix(kind.as_str())
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(malformed)?;

    let mut numbers = Vec::with_capacity(2);
    for part in body.split(',') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let n = match part.parse::<u64>() {
            Ok(n) => n,
            Err(_) if saturate => u64::MAX,
            Err(_) => {
                return Err(RuleParseError::Overflow {
                    kind,
                    rules: rules.to_string(),
                });
            }
        };
        numbers.push(n);
    }

    match (kind.arity(), numbers.as_slice()) {
        (1, [n]) => Ok(RuleArgs::One(*n)),
        (2, [a, b]) => Ok(RuleArgs::Two(*a, *b)),
        _ => Err(malformed()),
    }
}
