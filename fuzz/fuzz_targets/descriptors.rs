//! Fuzz target for descriptor evaluation.
//!
//! Every built-in descriptor must evaluate arbitrary input without
//! panicking and report at most one message.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use formrule_validation::{RuleConfig, RuleFactory, RuleKind};

#[derive(Debug, Arbitrary)]
struct FuzzValue {
    kind: u8,
    required: bool,
    value: String,
}

fuzz_target!(|data: FuzzValue| {
    let kind = RuleKind::ALL[data.kind as usize % RuleKind::ALL.len()];
    let rules = match kind.arity() {
        2 => format!("{}:2,12", kind),
        1 => format!("{}:8", kind),
        _ => String::new(),
    };
    let config = RuleConfig {
        required: data.required,
        rules,
    };

    let Ok(descriptors) = RuleFactory::default().build_kind(kind, &config) else {
        return;
    };
    for descriptor in &descriptors {
        assert!(descriptor.run(&data.value).len() <= 1);
        let _ = descriptor.to_json();
    }
});
