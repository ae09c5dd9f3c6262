use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};
use serde_json::{Map, Number, Value};

use crate::combine::{self, Variants};
use crate::{
    classify, ArrayItems, ArraySchema, Definitions, GenerateError, GeneratorOptions,
    IdentityVisitor, NumberRange, ObjectSchema, SchemaKind, Visitor,
};

/// Expands `schema` into its variants using the thread-local RNG, no visitor and default
/// options.
///
/// ```
/// use serde_json::json;
///
/// let schema = json!({
///     "$defs": {},
///     "type": "array",
///     "items": { "oneOf": [{ "type": "number" }, { "type": "string" }] }
/// });
/// let docs = schemagen::generate(&schema).unwrap();
/// assert_eq!(docs.len(), 3);
/// assert_eq!(docs[0], json!([]));
/// assert_eq!(docs[2], json!(["string"]));
/// ```
pub fn generate(schema: &Value) -> Result<Vec<Value>, GenerateError> {
    Generator::new().generate(schema)
}

/// Configurable entry point: random source, object visitor and guards.
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use schemagen::Generator;
/// use serde_json::json;
///
/// let schema = json!({ "type": "object", "properties": { "n": { "type": "number" } } });
/// let mut first = Generator::new().with_rng(StdRng::seed_from_u64(7));
/// let mut second = Generator::new().with_rng(StdRng::seed_from_u64(7));
/// assert_eq!(first.generate(&schema).unwrap(), second.generate(&schema).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Generator<R = ThreadRng, V = IdentityVisitor> {
    rng: R,
    visitor: V,
    options: GeneratorOptions,
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            rng: thread_rng(),
            visitor: IdentityVisitor,
            options: GeneratorOptions::default(),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng, V: Visitor> Generator<R, V> {
    /// Replaces the random source used for `number` and `boolean` leaves.
    pub fn with_rng<S: Rng>(self, rng: S) -> Generator<S, V> {
        Generator {
            rng,
            visitor: self.visitor,
            options: self.options,
        }
    }

    pub fn with_visitor<W: Visitor>(self, visitor: W) -> Generator<R, W> {
        Generator {
            rng: self.rng,
            visitor,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Expands `schema` into an ordered list of instances.
    ///
    /// The definitions table is read from the root once per call. Any error aborts the
    /// whole call.
    pub fn generate(&mut self, schema: &Value) -> Result<Vec<Value>, GenerateError> {
        let definitions = Definitions::from_root(schema);
        tracing::debug!(
            max_depth = self.options.max_depth,
            max_variants = ?self.options.max_variants,
            "generating variants"
        );

        let mut expander = Expander {
            definitions,
            rng: &mut self.rng,
            visitor: &mut self.visitor,
            options: &self.options,
        };
        let variants = expander.expand(schema, 0)?.into_values();

        tracing::debug!(variants = variants.len(), "generated variants");
        Ok(variants)
    }
}

/// State of a single generation call.
struct Expander<'s, 'g, R, V> {
    definitions: Definitions<'s>,
    rng: &'g mut R,
    visitor: &'g mut V,
    options: &'g GeneratorOptions,
}

impl<'s, R: Rng, V: Visitor> Expander<'s, '_, R, V> {
    fn expand(&mut self, node: &'s Value, depth: usize) -> Result<Variants, GenerateError> {
        if depth > self.options.max_depth {
            return Err(GenerateError::DepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        if let Some(reference) = node.get("$ref") {
            let reference = reference.as_str().ok_or_else(|| {
                GenerateError::InvalidSchema("$ref must be a string".to_string())
            })?;
            let resolved = self.definitions.resolve(reference)?;
            tracing::trace!(reference, depth, "resolved reference");
            return self.expand(resolved, depth + 1);
        }

        let kind = classify(node)?;
        tracing::trace!(%kind, depth, "expanding schema node");

        let variants = match kind {
            SchemaKind::Number(range) => {
                Variants::Instances(vec![self.expand_number(range, false)?])
            }
            SchemaKind::Integer(range) => {
                Variants::Instances(vec![self.expand_number(range, true)?])
            }
            SchemaKind::String => Variants::Instances(vec![Value::String("string".to_string())]),
            SchemaKind::Boolean => Variants::Instances(vec![Value::Bool(self.rng.gen_bool(0.5))]),
            SchemaKind::Null => Variants::Instances(vec![Value::Null]),
            SchemaKind::Enum(values) => Variants::Instances(values.to_vec()),
            SchemaKind::EmptyObject => Variants::Instances(vec![Value::Object(Map::new())]),
            SchemaKind::Array(array) => Variants::Instances(self.expand_array(array, depth)?),
            SchemaKind::Object(object) => Variants::Instances(self.expand_object(object, depth)?),
            SchemaKind::OneOf(branches) => {
                Variants::Alternatives(combine::one_of(self.expand_all(branches, depth)?))
            }
            SchemaKind::AnyOf(branches) => {
                Variants::Alternatives(combine::any_of(self.expand_all(branches, depth)?))
            }
            SchemaKind::AllOf(branches) => {
                Variants::Instances(combine::all_of(self.expand_all(branches, depth)?))
            }
        };

        self.check_variant_count(variants.len())?;
        Ok(variants)
    }

    fn expand_all(
        &mut self,
        branches: &'s [Value],
        depth: usize,
    ) -> Result<Vec<Variants>, GenerateError> {
        branches
            .iter()
            .map(|branch| self.expand(branch, depth + 1))
            .collect()
    }

    /// Picks a random integer inside the range. A `number` range holding no integer falls back
    /// to its midpoint.
    fn expand_number(
        &mut self,
        range: NumberRange,
        integer: bool,
    ) -> Result<Value, GenerateError> {
        if let Some((low, high)) = range.integer_bounds() {
            return Ok(Value::Number(Number::from(self.rng.gen_range(low..=high))));
        }

        let midpoint = if integer {
            None
        } else {
            range.midpoint().and_then(Number::from_f64)
        };
        midpoint.map(Value::Number).ok_or_else(|| {
            GenerateError::InvalidSchema(format!(
                "{} range {} cannot be satisfied",
                if integer { "Integer" } else { "Number" },
                range
            ))
        })
    }

    fn expand_array(
        &mut self,
        array: ArraySchema<'s>,
        depth: usize,
    ) -> Result<Vec<Value>, GenerateError> {
        let items = match array.items {
            ArrayItems::Absent => return Ok(Vec::new()),
            ArrayItems::Tuple(_) => {
                tracing::warn!("tuple-form items not supported, generating a single empty array");
                return Ok(vec![Value::Array(Vec::new())]);
            }
            ArrayItems::Schema(items) => items,
        };

        let pools = self.expand(items, depth + 1)?.into_pools();

        let largest_pool = pools.iter().map(Vec::len).max().unwrap_or(0);
        let min = array.min_items.unwrap_or(0);
        let max = array
            .max_items
            .unwrap_or_else(|| largest_pool.max(min).max(1));

        let mut arrays = Vec::new();
        if min == 0 {
            arrays.push(Value::Array(Vec::new()));
        }
        for pool in &pools {
            arrays.extend(combine::cap_by_max(pool, max, min).into_iter().map(Value::Array));
        }

        Ok(arrays)
    }

    fn expand_object(
        &mut self,
        object: ObjectSchema<'s>,
        depth: usize,
    ) -> Result<Vec<Value>, GenerateError> {
        let mut objects = vec![Map::new()];

        for name in &object.required {
            let schema = object.property(name).ok_or_else(|| {
                GenerateError::InvalidSchema(format!(
                    "Required property '{}' is not declared in properties",
                    name
                ))
            })?;
            let pool = self.expand(schema, depth + 1)?.flatten();
            combine::assign_required(&mut objects, name, &pool);
            self.check_variant_count(objects.len())?;
        }

        for (name, schema) in object.optional() {
            let pool = self.expand(schema, depth + 1)?.flatten();
            combine::branch_optional(&mut objects, name, &pool);
            self.check_variant_count(objects.len())?;
        }

        let variants = objects.into_iter().map(Value::Object).collect();
        self.visitor.object(variants).map_err(GenerateError::Visitor)
    }

    fn check_variant_count(&self, count: usize) -> Result<(), GenerateError> {
        match self.options.max_variants {
            Some(limit) if count > limit => Err(GenerateError::TooManyVariants { count, limit }),
            _ => Ok(()),
        }
    }
}
