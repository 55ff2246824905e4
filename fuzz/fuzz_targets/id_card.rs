//! Fuzz target for identity-number verification.

#![no_main]

use libfuzzer_sys::fuzz_target;

use formrule_validation::predicates::{check_character, validate_id_card};

fuzz_target!(|code: &str| {
    let check = validate_id_card(code);

    if check.is_valid() {
        // A valid number is 18 ASCII characters whose last one is the check character
        assert_eq!(code.len(), 18);
        let (first17, last) = code.split_at(17);
        assert_eq!(check_character(first17).map(String::from), Some(last.to_string()));
        assert!(check.message.is_empty());
    } else {
        assert!(!check.message.is_empty());
    }

    let json = serde_json::to_value(&check).unwrap();
    assert!(json["code"] == 1 || json["code"] == -1);
});
