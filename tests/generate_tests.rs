use rand::rngs::StdRng;
use rand::SeedableRng;
use schemagen::adf::{DefaultPolicy, FixturePolicy};
use schemagen::{generate, Generator, Visitor};
use serde_json::{json, Value};

fn assert_all_valid(schema: &Value, docs: &[Value]) {
    let validator = jsonschema::validator_for(schema).expect("valid schema");
    for doc in docs {
        let errors: Vec<String> = validator.iter_errors(doc).map(|e| e.to_string()).collect();
        assert!(
            errors.is_empty(),
            "generated document {} is invalid: {:?}",
            doc,
            errors
        );
    }
}

fn generate_valid(schema: &Value) -> Vec<Value> {
    let docs = generate(schema).expect("generation succeeds");
    assert_all_valid(schema, &docs);
    docs
}

fn generate_valid_with<V: Visitor>(schema: &Value, visitor: V) -> Vec<Value> {
    let docs = Generator::new()
        .with_visitor(visitor)
        .generate(schema)
        .expect("generation succeeds");
    assert_all_valid(schema, &docs);
    docs
}

fn adf_definitions() -> Value {
    json!({
        "doc_node": {
            "type": "object",
            "properties": {
                "version": { "enum": [1] },
                "type": { "enum": ["doc"] },
                "content": {
                    "type": "array",
                    "items": {
                        "anyOf": [{ "$ref": "#/definitions/paragraph_node" }]
                    }
                }
            },
            "required": ["version", "type", "content"],
            "additionalProperties": false
        },
        "paragraph_node": {
            "type": "object",
            "properties": {
                "type": { "enum": ["paragraph"] },
                "content": {
                    "type": "array",
                    "items": { "$ref": "#/definitions/inline_node" }
                },
                "marks": { "type": "array" }
            },
            "required": ["type"],
            "additionalProperties": false
        },
        "inline_node": {
            "anyOf": [{ "$ref": "#/definitions/formatted_text_inline_node" }]
        },
        "formatted_text_inline_node": {
            "allOf": [
                { "$ref": "#/definitions/text_node" },
                {
                    "type": "object",
                    "properties": {
                        "marks": {
                            "type": "array",
                            "items": {
                                "anyOf": [
                                    { "$ref": "#/definitions/em_mark" },
                                    { "$ref": "#/definitions/strike_mark" }
                                ]
                            }
                        }
                    },
                    "additionalProperties": true
                }
            ]
        },
        "text_node": {
            "type": "object",
            "properties": {
                "type": { "enum": ["text"] },
                "text": { "type": "string", "minLength": 1 },
                "marks": { "type": "array" }
            },
            "required": ["type", "text"],
            "additionalProperties": false
        },
        "em_mark": {
            "type": "object",
            "properties": { "type": { "enum": ["em"] } },
            "required": ["type"],
            "additionalProperties": false
        },
        "strike_mark": {
            "type": "object",
            "properties": { "type": { "enum": ["strike"] } },
            "required": ["type"],
            "additionalProperties": false
        }
    })
}

#[test]
fn simple_array() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "items": { "type": "number" }
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0], json!([]));
}

#[test]
fn simple_array_with_min_items() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "minItems": 10,
        "items": { "type": "number" }
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 1);
    assert!(docs[0].as_array().unwrap().len() >= 10);
}

#[test]
fn array_one_of() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "items": {
            "oneOf": [{ "type": "number" }, { "type": "string" }, { "type": "boolean" }]
        }
    });
    assert_eq!(generate_valid(&schema).len(), 4);
}

#[test]
fn array_one_of_with_nested_one_of() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "items": {
            "oneOf": [
                { "type": "number" },
                { "type": "string" },
                { "type": "boolean" },
                { "oneOf": [{ "type": "null" }] }
            ]
        }
    });
    assert_eq!(generate_valid(&schema).len(), 5);
}

#[test]
fn array_one_of_with_min_max() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "minItems": 2,
        "maxItems": 3,
        "items": {
            "oneOf": [{ "type": "number" }, { "type": "string" }, { "type": "boolean" }]
        }
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[1], json!(["string", "string"]));
}

#[test]
fn array_any_of() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "items": {
            "anyOf": [{ "type": "number" }, { "type": "string" }, { "type": "boolean" }]
        }
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0], json!([]));
    assert_eq!(docs[1].as_array().unwrap().len(), 3);
}

#[test]
fn array_any_of_with_min_max() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "minItems": 2,
        "maxItems": 2,
        "items": {
            "anyOf": [{ "type": "number" }, { "type": "string" }, { "type": "boolean" }]
        }
    });
    assert_eq!(generate_valid(&schema).len(), 2);
}

#[test]
fn array_any_of_with_max_one() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "maxItems": 1,
        "items": {
            "anyOf": [{ "type": "number" }, { "type": "string" }, { "type": "boolean" }]
        }
    });
    assert_eq!(generate_valid(&schema).len(), 4);
}

#[test]
fn array_any_of_with_nested_any_of() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "maxItems": 2,
        "items": {
            "anyOf": [
                { "type": "number" },
                { "type": "string" },
                { "anyOf": [{ "type": "boolean" }, { "type": "string" }, { "type": "null" }] }
            ]
        }
    });
    assert_eq!(generate_valid(&schema).len(), 5);
}

#[test]
fn simple_object() {
    let schema = json!({
        "$defs": {},
        "type": "object",
        "properties": {
            "z": { "type": "number" },
            "y": { "type": "number" }
        },
        "additionalProperties": false,
        "required": ["z"]
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 2);
    assert!(docs.iter().all(|doc| doc.get("z").is_some()));
    assert!(docs[0].get("y").is_none());
    assert!(docs[1].get("y").is_some());
}

#[test]
fn object_with_one_of_attribute() {
    let schema = json!({
        "$defs": {},
        "type": "object",
        "properties": {
            "a": { "oneOf": [{ "type": "number" }, { "type": "string" }] }
        },
        "required": ["a"]
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 2);
    assert!(docs[0]["a"].is_number());
    assert_eq!(docs[1], json!({ "a": "string" }));
}

#[test]
fn object_with_referenced_any_of_attribute() {
    let schema = json!({
        "$defs": {
            "u": { "anyOf": [{ "type": "number" }, { "type": "string" }] }
        },
        "type": "object",
        "properties": { "a": { "$ref": "#/$defs/u" } },
        "required": ["a"]
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 2);
    assert!(docs[0]["a"].is_number());
    assert_eq!(docs[1], json!({ "a": "string" }));
}

#[test]
fn array_of_arrays() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "items": { "type": "array", "items": { "type": "number" } }
    });
    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0], json!([]));
    assert_eq!(docs[1].as_array().unwrap().len(), 2);
}

#[test]
fn array_of_one_of_with_array_branch() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "items": {
            "oneOf": [
                { "type": "array", "items": { "type": "string" } },
                { "type": "null" }
            ]
        }
    });
    assert_eq!(
        generate_valid(&schema),
        vec![json!([]), json!([[], ["string"]]), json!([null])]
    );
}

#[test]
fn fractional_number_range() {
    let schema = json!({ "type": "number", "minimum": 0.2, "maximum": 0.4 });
    assert_eq!(generate_valid(&schema).len(), 1);
}

fn mention_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "enum": ["mention"] },
            "attrs": {
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "text": { "type": "string" },
                    "userType": { "enum": ["DEFAULT", "SPECIAL", "APP"] },
                    "accessLevel": { "type": "string" }
                },
                "required": ["id"],
                "additionalProperties": false
            }
        },
        "required": ["type", "attrs"],
        "additionalProperties": false
    })
}

#[test]
fn object_with_multiple_required_values() {
    let docs = generate_valid(&mention_schema());
    assert_eq!(docs.len(), 16);
}

#[test]
fn object_with_multiple_required_values_under_default_policy() {
    let docs = generate_valid_with(&mention_schema(), DefaultPolicy);
    assert_eq!(
        docs,
        vec![json!({ "type": "mention", "attrs": { "id": "string" } })]
    );
}

#[test]
fn object_with_any_of_attribute() {
    let schema = json!({
        "$defs": {},
        "type": "object",
        "properties": {
            "z": {
                "anyOf": [
                    { "type": "object", "properties": { "y": { "type": "number" } } },
                    { "type": "object", "properties": { "z": { "type": "string" } } }
                ]
            },
            "x": {
                "type": "array",
                "items": { "type": "number" }
            }
        },
        "additionalProperties": false,
        "required": ["z"]
    });
    assert_eq!(generate_valid(&schema).len(), 12);
}

#[test]
fn array_with_all_of() {
    let schema = json!({
        "$defs": {},
        "type": "array",
        "maxItems": 2,
        "items": {
            "allOf": [
                {
                    "type": "object",
                    "properties": {
                        "z": { "type": "string" },
                        "y": { "type": "number" }
                    },
                    "required": ["z"]
                },
                {
                    "type": "object",
                    "properties": { "c": { "type": "boolean" } }
                },
                {
                    "anyOf": [
                        {
                            "type": "object",
                            "properties": { "x": { "type": "string" } },
                            "required": ["x"]
                        },
                        {
                            "type": "object",
                            "properties": {
                                "a": { "type": "number" },
                                "b": { "type": "string" }
                            },
                            "required": ["a"]
                        }
                    ]
                }
            ]
        }
    });
    assert_eq!(generate_valid(&schema).len(), 7);
}

#[test]
fn all_of_without_object_base_is_empty() {
    let schema = json!({
        "$defs": {
            "base": { "type": "object", "properties": { "a": { "type": "string" } } }
        },
        "allOf": [
            { "anyOf": [{ "$ref": "#/$defs/base" }] }
        ]
    });
    assert!(generate(&schema).unwrap().is_empty());
}

#[test]
fn adf_simple() {
    let mut definitions = adf_definitions();
    definitions["paragraph_node"]["properties"]["content"]["items"] =
        json!({ "$ref": "#/definitions/text_node" });
    let schema = json!({
        "definitions": definitions,
        "$ref": "#/definitions/doc_node"
    });
    assert_eq!(generate_valid_with(&schema, DefaultPolicy).len(), 2);
    assert_eq!(generate_valid(&schema).len(), 2);
}

#[test]
fn adf_complex() {
    let schema = json!({
        "description": "Schema for Atlassian Document Format.",
        "definitions": adf_definitions(),
        "$ref": "#/definitions/doc_node"
    });
    assert_eq!(generate_valid_with(&schema, DefaultPolicy).len(), 2);

    let docs = generate_valid(&schema);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["content"], json!([]));
    assert_eq!(docs[1]["content"].as_array().unwrap().len(), 3);
}

#[test]
fn adf_fixture_policy_splits_and_prunes() {
    let schema = json!({
        "definitions": {
            "doc_node": {
                "type": "object",
                "properties": {
                    "version": { "enum": [1] },
                    "type": { "enum": ["doc"] },
                    "content": {
                        "type": "array",
                        "items": {
                            "anyOf": [
                                { "$ref": "#/definitions/paragraph_node" },
                                { "$ref": "#/definitions/rule_node" },
                                { "$ref": "#/definitions/task_list_node" }
                            ]
                        }
                    }
                },
                "required": ["version", "type", "content"],
                "additionalProperties": false
            },
            "paragraph_node": {
                "type": "object",
                "properties": { "type": { "enum": ["paragraph"] } },
                "required": ["type"]
            },
            "rule_node": {
                "type": "object",
                "properties": { "type": { "enum": ["rule"] } },
                "required": ["type"]
            },
            "task_list_node": {
                "type": "object",
                "properties": { "type": { "enum": ["taskList"] } },
                "required": ["type"]
            }
        },
        "$ref": "#/definitions/doc_node"
    });

    let docs = generate_valid_with(&schema, FixturePolicy::with_seed(9));
    assert_eq!(
        docs,
        vec![
            json!({ "version": 1, "type": "doc", "content": [] }),
            json!({ "version": 1, "type": "doc", "content": [{ "type": "paragraph" }] }),
            json!({ "version": 1, "type": "doc", "content": [{ "type": "rule" }] }),
        ]
    );
}

#[test]
fn seeded_runs_are_identical() {
    let schema = json!({
        "definitions": adf_definitions(),
        "type": "object",
        "properties": {
            "count": { "type": "integer", "minimum": 1, "maximum": 1000 },
            "flags": { "type": "array", "minItems": 3, "items": { "type": "boolean" } },
            "doc": { "$ref": "#/definitions/doc_node" }
        },
        "required": ["count"]
    });

    let run = |seed| {
        Generator::new()
            .with_rng(StdRng::seed_from_u64(seed))
            .generate(&schema)
            .unwrap()
    };
    let first = run(11);
    assert_all_valid(&schema, &first);
    assert_eq!(first, run(11));
}
