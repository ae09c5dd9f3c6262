use serde_json::{Map, Value};
use std::fmt::Display;

/// The kind of a single schema node, as decided by [`crate::classify`].
///
/// Every node the generator can expand maps to exactly one variant. The variants borrow
/// from the caller's schema; classification never copies or mutates the schema itself.
///
/// # Classification order
///
/// 1. An explicit string `type` (`number`, `integer`, `string`, `boolean`, `null`, `array`,
///    `object`).
/// 2. A composition keyword, checked as `oneOf`, then `anyOf`, then `allOf`.
/// 3. `enum`.
/// 4. An object with no keys at all.
///
/// Anything else is rejected with [`crate::GenerateError::Unclassifiable`].
///
/// # Examples
///
/// ```
/// use schemagen::{classify, SchemaKind};
/// use serde_json::json;
///
/// let schema = json!({ "enum": ["a", "b"] });
/// assert!(matches!(classify(&schema).unwrap(), SchemaKind::Enum(values) if values.len() == 2));
///
/// let schema = json!({ "oneOf": [{ "type": "string" }], "enum": ["a"] });
/// assert_eq!(classify(&schema).unwrap().to_string(), "oneOf");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind<'a> {
    /// `number`. Produces an integer when the range holds one, else the midpoint of the range.
    Number(NumberRange),
    Integer(NumberRange),
    String,
    Boolean,
    Null,
    /// Every member of the `enum` list becomes one variant.
    Enum(&'a [Value]),
    /// `{}`, which accepts anything; expands to a single empty object.
    EmptyObject,
    Array(ArraySchema<'a>),
    Object(ObjectSchema<'a>),
    OneOf(&'a [Value]),
    AnyOf(&'a [Value]),
    AllOf(&'a [Value]),
}

impl SchemaKind<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Number(_) => "number",
            SchemaKind::Integer(_) => "integer",
            SchemaKind::String => "string",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Enum(_) => "enum",
            SchemaKind::EmptyObject => "emptyObject",
            SchemaKind::Array(_) => "array",
            SchemaKind::Object(_) => "object",
            SchemaKind::OneOf(_) => "oneOf",
            SchemaKind::AnyOf(_) => "anyOf",
            SchemaKind::AllOf(_) => "allOf",
        }
    }
}

impl Display for SchemaKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inclusive `minimum`/`maximum` bounds of a numeric node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberRange {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// 2^63, the first `f64` past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl NumberRange {
    /// Bounds used for generation.
    ///
    /// Unset bounds default to `0..=100`. When only one bound is set and it lies outside that
    /// default, the other one is placed 100 away from it instead.
    /// Returns `None` when the range is empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let (low, high) = match (self.minimum, self.maximum) {
            (Some(low), Some(high)) => (low, high),
            (Some(low), None) => (low, if low > 100.0 { low + 100.0 } else { 100.0 }),
            (None, Some(high)) => (if high < 0.0 { high - 100.0 } else { 0.0 }, high),
            (None, None) => (0.0, 100.0),
        };
        (low <= high).then_some((low, high))
    }

    /// [`bounds`](Self::bounds) rounded inwards to integers.
    ///
    /// Returns `None` when no integer lies inside the range, or when the range leaves `i64`.
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        let (low, high) = self.bounds()?;
        let (low, high) = (low.ceil(), high.floor());
        if low > high || low < -I64_LIMIT || high >= I64_LIMIT {
            None
        } else {
            Some((low as i64, high as i64))
        }
    }

    pub fn midpoint(&self) -> Option<f64> {
        let (low, high) = self.bounds()?;
        Some(low + (high - low) / 2.0)
    }
}

impl Display for NumberRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) => write!(f, "[{}, {}]", min, max),
            (Some(min), None) => write!(f, "[{}, ..]", min),
            (None, Some(max)) => write!(f, "[.., {}]", max),
            (None, None) => write!(f, "[.., ..]"),
        }
    }
}

/// The `items` keyword of an array node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrayItems<'a> {
    /// No `items`, or `items: false`. No arrays are generated for this node.
    Absent,
    /// Tuple form (`items: [..]`). Only a single empty array is generated.
    Tuple(&'a [Value]),
    Schema(&'a Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema<'a> {
    pub items: ArrayItems<'a>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

/// An object node split into its declared properties and the `required` list.
///
/// `required` keeps the order it was written in, since that order decides the order of
/// the generated variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema<'a> {
    pub properties: Option<&'a Map<String, Value>>,
    pub required: Vec<&'a str>,
}

impl<'a> ObjectSchema<'a> {
    /// Declared properties that are not listed in `required`, in declaration order.
    pub fn optional(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + '_ {
        self.properties
            .into_iter()
            .flat_map(|properties| properties.iter())
            .filter(|(name, _)| !self.required.iter().any(|required| *required == name.as_str()))
    }

    pub fn property(&self, name: &str) -> Option<&'a Value> {
        self.properties.and_then(|properties| properties.get(name))
    }
}
