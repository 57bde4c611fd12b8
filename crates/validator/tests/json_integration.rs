//! Integration tests for JSON-described rule trees and JSON output.

use pretty_assertions::assert_eq;
use ruleshape_validator::prelude::*;
use serde_json::json;

// ============================================================================
// DECLARATIVE SCHEMAS
// ============================================================================

#[test]
fn schema_document_from_string() {
    let document: serde_json::Value = serde_json::from_str(
        r#"{
            "email": ["required", "email"],
            "password": ["required", {"rule": "min_length", "min": 8}],
            "confirm": [{"rule": "equals_field", "field": "password", "message": "Passwords differ."}],
            "profile": {
                "age": ["is_number", {"rule": "in_range", "min": 13, "max": 130}]
            }
        }"#,
    )
    .unwrap();
    let rules = RuleRegistry::with_builtins().compile(&document).unwrap();

    let form = json!({
        "email": "ada@example.com",
        "password": "correct horse",
        "confirm": "correct hose",
        "profile": {"age": 9}
    });
    let result = validate(&form, &rules).unwrap();

    assert_eq!(
        serde_json::to_value(result.errors.unwrap()).unwrap(),
        json!({
            "confirm": [{
                "ruleName": "equals_field",
                "attemptedValue": "correct hose",
                "errorMessage": "Passwords differ."
            }],
            "profile": {
                "age": [{
                    "ruleName": "in_range",
                    "attemptedValue": 9,
                    "errorMessage": "Must be between 13 and 130."
                }]
            }
        })
    );
}

#[test]
fn schema_rules_combine_with_code_factories() {
    let mut rules = RuleRegistry::with_builtins()
        .compile(&json!({"items": {"arrayElementRule": {"sku": ["required"]}}}))
        .unwrap();
    rules.insert(
        "coupon",
        FieldRule::factory(|_, order| {
            // BULK is reserved for orders of three or more items.
            if order["items"].as_array().is_some_and(|items| items.len() > 2) {
                rules![one_of(["WELCOME", "BULK"])]
            } else {
                rules![one_of(["WELCOME"])]
            }
        }),
    );

    let small = json!({"items": [{"sku": "A"}], "coupon": "BULK"});
    assert!(!validate(&small, &rules).unwrap().is_valid);

    let bulk = json!({"items": [{"sku": "A"}, {"sku": "B"}, {"sku": "C"}], "coupon": "BULK"});
    assert!(validate(&bulk, &rules).unwrap().is_valid);
}

#[test]
fn malformed_schema_is_a_setup_error() {
    let registry = RuleRegistry::with_builtins();

    assert_eq!(
        registry.compile(&json!(null)).unwrap_err().to_string(),
        "validation rule is null or undefined"
    );
    assert_eq!(
        registry.compile(&json!({"a": ["required", 7]})).unwrap_err().to_string(),
        "7 is not a valid rule"
    );
}

// ============================================================================
// MESSAGE CONFIGURATION
// ============================================================================

#[test]
fn message_config_from_json() {
    let messages: MessageConfig =
        serde_json::from_value(json!({"okMessage": "Looks good!"})).unwrap();
    let validator = Validator::builder()
        .rules(RuleTree::new().field("name", rules![required()]))
        .messages(messages)
        .build()
        .unwrap();

    assert_eq!(validator.validate(&json!({"name": "x"})).unwrap().message, "Looks good!");
    assert_eq!(validator.validate(&json!({})).unwrap().message, "Validation failed.");
}

// ============================================================================
// OUTPUT SHAPE
// ============================================================================

#[test]
fn nested_array_output_shape() {
    let rules = rule_tree! {
        "orders" => ArrayRule::new()
            .with_array_rules([array_max_len(1).into()])
            .with_element_rule(rule_tree! {
                "lines" => ArrayRule::new().with_element_rule(rules![min(1.0)]),
            }),
    };
    let object = json!({"orders": [{"lines": [1, 0]}, {"lines": [2]}]});

    let result = validate(&object, &rules).unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "isValid": false,
            "message": "Validation failed.",
            "errors": {
                "orders": {
                    "arrayErrors": [{
                        "ruleName": "array_max_len",
                        "attemptedValue": [{"lines": [1, 0]}, {"lines": [2]}],
                        "errorMessage": "Must contain at most 1 item."
                    }],
                    "arrayElementErrors": [{
                        "index": 0,
                        "errors": {
                            "lines": {
                                "arrayElementErrors": [{
                                    "index": 1,
                                    "errors": [{
                                        "ruleName": "min",
                                        "attemptedValue": 0,
                                        "errorMessage": "Must be at least 1."
                                    }],
                                    "attemptedValue": 0
                                }]
                            }
                        },
                        "attemptedValue": {"lines": [1, 0]}
                    }]
                }
            }
        })
    );
}

#[test]
fn field_result_serializes_camel_case() {
    let rules = RuleTree::new().field("name", rules![required()]);

    let result = validate_field("name", &json!({}), &rules).unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "isValid": false,
            "fieldName": "name",
            "errors": {"name": [{"ruleName": "required", "errorMessage": "This field is required."}]}
        })
    );
}
