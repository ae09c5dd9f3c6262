use crate::schema::{ArrayItems, ArraySchema, NumberRange, ObjectSchema, SchemaKind};
use crate::GenerateError;
use serde_json::{Map, Value};

/// Decides the [`SchemaKind`] of a single, already resolved, schema node.
///
/// `$ref` nodes must be resolved by the caller first; a bare `{"$ref": ..}` node is not an
/// empty object and is rejected here.
pub fn classify(node: &Value) -> Result<SchemaKind<'_>, GenerateError> {
    let unclassifiable = || GenerateError::Unclassifiable { node: node.clone() };

    let schema_obj = node.as_object().ok_or_else(unclassifiable)?;

    if let Some(type_field) = schema_obj.get("type") {
        let type_str = type_field.as_str().ok_or_else(unclassifiable)?;

        return match type_str {
            "number" => parse_number_type(schema_obj).map(SchemaKind::Number),
            "integer" => parse_number_type(schema_obj).map(SchemaKind::Integer),
            "string" => {
                warn_about_unsupported_string_features(schema_obj);
                Ok(SchemaKind::String)
            }
            "boolean" => Ok(SchemaKind::Boolean),
            "null" => Ok(SchemaKind::Null),
            "array" => parse_array_type(schema_obj),
            "object" => parse_object_type(schema_obj),
            _ => Err(unclassifiable()),
        };
    }

    if let Some(one_of) = schema_obj.get("oneOf") {
        return parse_subschemas("oneOf", one_of).map(SchemaKind::OneOf);
    }
    if let Some(any_of) = schema_obj.get("anyOf") {
        return parse_subschemas("anyOf", any_of).map(SchemaKind::AnyOf);
    }
    if let Some(all_of) = schema_obj.get("allOf") {
        return parse_subschemas("allOf", all_of).map(SchemaKind::AllOf);
    }

    if let Some(enum_value) = schema_obj.get("enum") {
        let values = enum_value.as_array().ok_or_else(|| {
            GenerateError::InvalidSchema("Enum field must be an array".to_string())
        })?;
        return Ok(SchemaKind::Enum(values));
    }

    if schema_obj.is_empty() {
        return Ok(SchemaKind::EmptyObject);
    }

    Err(unclassifiable())
}

fn parse_subschemas<'a>(keyword: &str, value: &'a Value) -> Result<&'a [Value], GenerateError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| GenerateError::InvalidSchema(format!("{} must be an array", keyword)))
}

fn parse_number_type(schema_obj: &Map<String, Value>) -> Result<NumberRange, GenerateError> {
    let minimum = parse_numeric_field(schema_obj, "minimum")?;
    let maximum = parse_numeric_field(schema_obj, "maximum")?;
    warn_about_unsupported_number_features(schema_obj);

    Ok(NumberRange { minimum, maximum })
}

fn parse_array_type(schema_obj: &Map<String, Value>) -> Result<SchemaKind<'_>, GenerateError> {
    let items = match schema_obj.get("items") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => ArrayItems::Absent,
        Some(Value::Array(tuple)) => ArrayItems::Tuple(tuple),
        Some(items) => ArrayItems::Schema(items),
    };
    let min_items = parse_optional_usize_field(schema_obj, "minItems")?;
    let max_items = parse_optional_usize_field(schema_obj, "maxItems")?;

    if let (Some(min), Some(max)) = (min_items, max_items) {
        if min > max {
            return Err(GenerateError::InvalidSchema(format!(
                "minItems ({}) is greater than maxItems ({})",
                min, max
            )));
        }
    }

    Ok(SchemaKind::Array(ArraySchema {
        items,
        min_items,
        max_items,
    }))
}

fn parse_object_type(schema_obj: &Map<String, Value>) -> Result<SchemaKind<'_>, GenerateError> {
    let properties = match schema_obj.get("properties") {
        None => None,
        Some(properties) => Some(properties.as_object().ok_or_else(|| {
            GenerateError::InvalidSchema("Properties field must be an object".to_string())
        })?),
    };
    let required = parse_required_field_names(schema_obj)?;

    for name in &required {
        if !properties.is_some_and(|properties| properties.contains_key(*name)) {
            return Err(GenerateError::InvalidSchema(format!(
                "Required property '{}' is not declared in properties",
                name
            )));
        }
    }

    warn_about_unsupported_object_features(schema_obj);

    Ok(SchemaKind::Object(ObjectSchema {
        properties,
        required,
    }))
}

fn parse_required_field_names(
    schema_obj: &Map<String, Value>,
) -> Result<Vec<&str>, GenerateError> {
    let Some(required) = schema_obj.get("required") else {
        return Ok(Vec::new());
    };

    let required = required.as_array().ok_or_else(|| {
        GenerateError::InvalidSchema("Required field must be an array".to_string())
    })?;

    required
        .iter()
        .map(|name| {
            name.as_str().ok_or_else(|| {
                GenerateError::InvalidSchema("All required entries must be strings".to_string())
            })
        })
        .collect()
}

fn parse_numeric_field(
    schema_obj: &Map<String, Value>,
    field_name: &str,
) -> Result<Option<f64>, GenerateError> {
    if let Some(value) = schema_obj.get(field_name) {
        let number = value.as_f64().ok_or_else(|| {
            GenerateError::InvalidSchema(format!("{} must be a number", field_name))
        })?;
        Ok(Some(number))
    } else {
        Ok(None)
    }
}

fn parse_optional_usize_field(
    schema_obj: &Map<String, Value>,
    field_name: &str,
) -> Result<Option<usize>, GenerateError> {
    if let Some(value) = schema_obj.get(field_name) {
        let number = value.as_u64().ok_or_else(|| {
            GenerateError::InvalidSchema(format!(
                "{} must be a non-negative integer",
                field_name
            ))
        })?;
        Ok(Some(number as usize))
    } else {
        Ok(None)
    }
}

fn warn_about_unsupported_string_features(schema_obj: &Map<String, Value>) {
    for keyword in ["pattern", "format"] {
        if schema_obj.contains_key(keyword) {
            tracing::warn!(keyword, "string constraint not supported, ignoring");
        }
    }
}

fn warn_about_unsupported_number_features(schema_obj: &Map<String, Value>) {
    if schema_obj.contains_key("exclusiveMinimum") {
        tracing::warn!("exclusiveMinimum not supported, ignoring");
    }

    if schema_obj.contains_key("exclusiveMaximum") {
        tracing::warn!("exclusiveMaximum not supported, ignoring");
    }

    if schema_obj.contains_key("multipleOf") {
        tracing::warn!("multipleOf constraint not supported, ignoring");
    }
}

fn warn_about_unsupported_object_features(schema_obj: &Map<String, Value>) {
    for keyword in ["patternProperties", "not"] {
        if schema_obj.contains_key(keyword) {
            tracing::warn!(keyword, "object constraint not supported, ignoring");
        }
    }
}
