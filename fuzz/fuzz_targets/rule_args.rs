//! Fuzz target for rules-string parsing.
//!
//! Any string must either parse into arguments of the right arity or
//! produce a parse error; it must never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use formrule_validation::{MalformedRules, RuleArgs, RuleConfig, RuleFactory, RuleKind, parse_rules};

#[derive(Debug, Arbitrary)]
struct FuzzRules {
    kind: u8,
    rules: String,
    strict: bool,
}

fuzz_target!(|data: FuzzRules| {
    let kind = RuleKind::ALL[data.kind as usize % RuleKind::ALL.len()];

    match parse_rules(kind, &data.rules) {
        Ok(RuleArgs::One(_)) => assert_eq!(kind.arity(), 1),
        Ok(args @ RuleArgs::Two(..)) => {
            assert_eq!(kind.arity(), 2);
            let range = args.range();
            assert!(range.min <= range.max);
        }
        Err(_) => {}
    }

    let policy = if data.strict {
        MalformedRules::Strict
    } else {
        MalformedRules::Lenient
    };
    let factory = RuleFactory::default().with_malformed_rules(policy);
    let built = factory.build_kind(kind, &RuleConfig::new().with_rules(data.rules.clone()));
    if !data.strict {
        assert!(built.is_ok());
    }
});
