//! Integration tests for formrule-validation

use formrule_validation::patterns::{lookup, retain};
use formrule_validation::predicates::{display_width, validate_id_card, validate_id_card_value};
use formrule_validation::*;
use std::collections::HashMap;

#[test]
fn test_pattern_lookup_by_name() {
    for name in PatternName::ALL {
        assert!(lookup(name.as_str()).is_some(), "{}", name);
    }
    assert!(lookup("phone").is_none());
    assert!(lookup("realNumber").unwrap().is_match("-3."));
    assert!("date_2".parse::<PatternName>().unwrap().is_match("12/31/2024"));
}

#[test]
fn test_retain_limits_fraction_digits() {
    let two = retain(2).unwrap();
    assert!(two.is_match("3.14"));
    assert!(two.is_match("-3"));
    assert!(!two.is_match("3.141"));
    assert!(!retain(0).unwrap().is_match("3.1"));
}

#[test]
fn test_every_kind_builds_by_name() {
    let factory = RuleFactory::default();
    for kind in RuleKind::ALL {
        let config = match kind.arity() {
            2 => RuleConfig::new().with_rules(format!("{}:1,5", kind)),
            1 => RuleConfig::new().with_rules(format!("{}:5", kind)),
            _ => RuleConfig::new(),
        };
        let descriptors = factory.build(kind.as_str(), &config).unwrap();
        assert_eq!(descriptors[0].kind(), kind);
    }
}

#[test]
fn test_static_descriptor_json() {
    let factory = RuleFactory::default();
    let descriptors = factory
        .build("rangeLength", &RuleConfig::required().with_rules("rangeLength:10,3"))
        .unwrap();
    assert_eq!(
        descriptors[0].to_json(),
        serde_json::json!({
            "type": "string",
            "required": true,
            "min": 3,
            "max": 10,
            "message": "不能为空 字符串长度(3-10)",
        })
    );

    let email = factory.build("email", &RuleConfig::new()).unwrap();
    assert_eq!(email[0].to_json()["type"], "email");
    assert_eq!(email[0].to_json()["message"], "必须是邮箱地址");
}

#[test]
fn test_dynamic_descriptors_always_report() {
    let factory = RuleFactory::default();
    let config = RuleConfig::new().with_rules("rangeChar:1,4");
    for kind in ["rangeChar", "date", "english", "englishAndNumber", "chinese", "idCards"] {
        let descriptors = factory.build(kind, &config).unwrap();
        assert!(descriptors[0].is_dynamic(), "{}", kind);

        let mut calls = 0;
        let procedure = match descriptors[0].check() {
            Check::Procedure(procedure) => procedure.clone(),
            other => panic!("{}: {:?}", kind, other),
        };
        procedure.call(
            &descriptors[0],
            "some value",
            &mut |_errors| calls += 1,
            &ValidationContext::default(),
        );
        assert_eq!(calls, 1, "{}", kind);
    }
}

#[test]
fn test_range_char_widths() {
    assert_eq!(display_width("你好ab"), 6);

    let factory = RuleFactory::default();
    let wide = factory
        .build("rangeChar", &RuleConfig::new().with_rules("rangeChar:1,10"))
        .unwrap();
    assert!(wide[0].run("你好ab").is_empty());

    let narrow = factory
        .build("rangeChar", &RuleConfig::new().with_rules("rangeChar:1,5"))
        .unwrap();
    assert_eq!(narrow[0].run("你好ab"), vec!["字符长度(1-5)".to_string()]);
}

#[test]
fn test_id_card_golden_values() {
    for code in [
        "110101199003070775",
        "11010519491231002X",
        "440304200001011239",
        "510108209912314568",
        "110101201001010015",
    ] {
        assert!(validate_id_card(code).is_valid(), "{}", code);
    }
    assert!(!validate_id_card("110101199003070771").is_valid());

    let check = validate_id_card_value(&serde_json::json!(null), &Catalog::default());
    assert_eq!(check.message, "身份证号码必须是字符串");
}

#[test]
fn test_strict_settings_reject_malformed_rules() {
    let settings = Settings {
        malformed_rules: MalformedRules::Strict,
        ..Settings::default()
    };
    let factory = RuleFactory::from_settings(&settings).unwrap();
    let error = factory
        .build("rangeLength", &RuleConfig::new().with_rules("rangeLength:3"))
        .unwrap_err();
    assert!(matches!(error, RuleError::Parse(RuleParseError::Malformed { .. })));
    assert!(error.to_string().contains("rangeLength:<a>,<b>"));
}

#[test]
fn test_english_locale_form() {
    let factory = RuleFactory::default().with_locale(Locale::EnUs);
    let form = ValidationBuilder::new()
        .field(FieldRules::for_field("name").with(factory.english(&RuleConfig::required())))
        .field(FieldRules::for_field("born").with(factory.date(&RuleConfig::new())));

    let mut data = HashMap::new();
    data.insert("name".to_string(), "Ada".to_string());
    data.insert("born".to_string(), "12/10/1815".to_string());
    assert!(form.validate(&data).is_ok());

    data.insert("name".to_string(), "Ada1".to_string());
    data.insert("born".to_string(), "1815-13-10".to_string());
    let errors = ValidationErrors::from(form.validate(&data).unwrap_err());
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.get_field_errors("name")[0].message,
        "cannot be empty must contain English letters only"
    );
    assert_eq!(
        errors.get_field_errors("born")[0].message,
        "must be a date (yyyy-MM-dd|MM/dd/yyyy)"
    );
}

struct SignupForm {
    username: String,
    id_number: String,
}

impl Validate for SignupForm {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let factory = RuleFactory::default();
        let mut errors = Vec::new();
        for (rules, value) in [
            (
                FieldRules::for_field("username")
                    .with(factory.required())
                    .with(factory.english_and_number(&RuleConfig::new())),
                &self.username,
            ),
            (
                FieldRules::for_field("id_number").with(factory.id_cards(&RuleConfig::new())),
                &self.id_number,
            ),
        ] {
            if let Err(mut e) = rules.validate(value) {
                errors.append(&mut e);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[test]
fn test_validate_trait_on_form_struct() {
    let form = SignupForm {
        username: "ada1815".to_string(),
        id_number: String::new(),
    };
    assert!(form.validate().is_ok());

    let form = SignupForm {
        username: "ada".to_string(),
        id_number: "12345".to_string(),
    };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].constraint, "englishAndNumber");
    assert_eq!(errors[1].constraint, "idCards");
}
