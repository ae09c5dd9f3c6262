//! Combinatorial rules used to turn child variant lists into the variant list of their parent.
//!
//! None of these rules aim for exhaustive coverage. They are fixed approximation strategies
//! whose output sizes downstream fixtures depend on:
//!
//! - **round-robin bucketing** ([`cap_by_max`]) splits an item pool into arrays of `maxItems`;
//! - **`anyOf` as union of unions**: the empty selection, all instance branches together, and all
//!   instance branches together with each alternative pool, rather than the full power set;
//! - **`allOf` as a shallow merge cross product** seeded by the first instances (object) branch.
use serde_json::{Map, Value};

/// Variant list of one schema node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Variants {
    /// Instances of the node itself.
    Instances(Vec<Value>),
    /// Alternative pools produced by `oneOf` or `anyOf`. Each pool holds instances of one
    /// alternative; the pools are never instances themselves.
    Alternatives(Vec<Vec<Value>>),
}

impl Variants {
    pub(crate) fn len(&self) -> usize {
        match self {
            Variants::Instances(values) => values.len(),
            Variants::Alternatives(pools) => pools.len(),
        }
    }

    /// Values that can stand in place of the node: alternative pools are spliced together.
    pub(crate) fn flatten(self) -> Vec<Value> {
        match self {
            Variants::Instances(values) => values,
            Variants::Alternatives(pools) => pools.into_iter().flatten().collect(),
        }
    }

    /// Item pools for an array node: a single pool of instances, or one pool per alternative.
    pub(crate) fn into_pools(self) -> Vec<Vec<Value>> {
        match self {
            Variants::Instances(values) => vec![values],
            Variants::Alternatives(pools) => pools,
        }
    }

    /// The list handed back to callers; each alternative pool becomes a JSON array.
    pub(crate) fn into_values(self) -> Vec<Value> {
        match self {
            Variants::Instances(values) => values,
            Variants::Alternatives(pools) => pools.into_iter().map(Value::Array).collect(),
        }
    }
}

/// Buckets a pool of item values into arrays holding exactly `max` items.
///
/// - An empty pool, or `max == 0`, gives no arrays.
/// - A pool of at most `max` values gives a single array with the whole pool.
/// - A larger pool is walked round-robin, emitting an array each time `max` values have been
///   collected. The walk stops once `max` values have been spent and the cursor has wrapped
///   around the pool at least once; an incomplete trailing array is dropped.
///
/// Any array shorter than `min` is doubled onto itself until it reaches `min` and then cut to
/// `min + 1` values, so it may end up one longer than `min`.
///
/// ```
/// use schemagen::cap_by_max;
/// use serde_json::json;
///
/// let pool = [json!(1), json!(2), json!(3)];
/// assert_eq!(
///     cap_by_max(&pool, 2, 0),
///     vec![vec![json!(1), json!(2)], vec![json!(3), json!(1)]]
/// );
/// assert_eq!(cap_by_max(&[json!("a")], 3, 10).len(), 1);
/// assert_eq!(cap_by_max(&[json!("a")], 3, 10)[0].len(), 11);
/// ```
pub fn cap_by_max(pool: &[Value], max: usize, min: usize) -> Vec<Vec<Value>> {
    if pool.is_empty() || max == 0 {
        return Vec::new();
    }

    let mut buckets = if pool.len() <= max {
        vec![pool.to_vec()]
    } else {
        round_robin(pool, max)
    };

    for bucket in buckets.iter_mut() {
        if bucket.len() < min {
            fill_to_min(bucket, min);
        }
    }

    buckets
}

fn round_robin(pool: &[Value], max: usize) -> Vec<Vec<Value>> {
    let mut buckets = Vec::new();
    let mut current = Vec::with_capacity(max);
    let mut cursor = 0;
    let mut budget = max as isize;
    let mut wrapped = false;

    while budget >= 0 || !wrapped {
        if cursor > 0 && cursor % pool.len() == 0 {
            wrapped = true;
        }

        if current.len() == max {
            buckets.push(std::mem::replace(&mut current, Vec::with_capacity(max)));
        } else {
            current.push(pool[cursor % pool.len()].clone());
            budget -= 1;
            cursor += 1;
        }
    }

    if current.len() == max {
        buckets.push(current);
    }

    buckets
}

fn fill_to_min(bucket: &mut Vec<Value>, min: usize) {
    if bucket.is_empty() {
        return;
    }
    while bucket.len() < min {
        bucket.extend_from_within(..);
    }
    bucket.truncate(min + 1);
}

/// Sets a required property on every partial object.
///
/// The first value fills an object that lacks the key in place; every further value (or every
/// value, when the key is already present) branches off a clone carrying that value. Clones are
/// appended after all existing objects.
pub(crate) fn assign_required(objects: &mut Vec<Map<String, Value>>, name: &str, pool: &[Value]) {
    let mut extra = Vec::new();
    for object in objects.iter_mut() {
        for value in pool {
            if object.contains_key(name) {
                let mut clone = object.clone();
                clone.insert(name.to_owned(), value.clone());
                extra.push(clone);
            } else {
                object.insert(name.to_owned(), value.clone());
            }
        }
    }
    objects.extend(extra);
}

/// Keeps every partial object as is (property absent) and appends one clone per pool value.
pub(crate) fn branch_optional(objects: &mut Vec<Map<String, Value>>, name: &str, pool: &[Value]) {
    let mut extra = Vec::with_capacity(objects.len() * pool.len());
    for object in objects.iter() {
        for value in pool {
            let mut clone = object.clone();
            clone.insert(name.to_owned(), value.clone());
            extra.push(clone);
        }
    }
    objects.extend(extra);
}

/// Union of `oneOf` branches. An alternatives branch contributes each of its pools; an
/// instances branch contributes itself as a single pool.
pub(crate) fn one_of(branches: Vec<Variants>) -> Vec<Vec<Value>> {
    let mut union = Vec::new();
    for branch in branches {
        match branch {
            Variants::Alternatives(pools) => union.extend(pools),
            Variants::Instances(values) => union.push(values),
        }
    }
    union
}

/// Union of `anyOf` branches: `[]`, every instances branch concatenated, and that concatenation
/// extended by each non-empty pool found in the alternatives branches.
pub(crate) fn any_of(branches: Vec<Variants>) -> Vec<Vec<Value>> {
    let mut simple = Vec::new();
    let mut complex = Vec::new();
    for branch in branches {
        match branch {
            Variants::Alternatives(pools) => complex.extend(pools),
            Variants::Instances(values) => simple.extend(values),
        }
    }

    let mut union = vec![Vec::new(), simple.clone()];
    for pool in complex {
        if !pool.is_empty() {
            let mut combined = simple.clone();
            combined.extend(pool);
            union.push(combined);
        }
    }
    union
}

/// Merge of `allOf` branches. The first instances branch seeds the base objects; the remaining
/// instances branches and then every pool of the alternatives branches are folded in as a cross
/// product of shallow merges, later keys winning. A fold that yields nothing leaves the base
/// unchanged. Without an instances branch there is no base and the result is empty.
pub(crate) fn all_of(branches: Vec<Variants>) -> Vec<Value> {
    let mut simple = Vec::new();
    let mut complex = Vec::new();
    for branch in branches {
        match branch {
            Variants::Alternatives(pools) => complex.extend(pools),
            Variants::Instances(values) => simple.push(values),
        }
    }

    let mut simple = simple.into_iter();
    let Some(mut objects) = simple.next() else {
        return Vec::new();
    };

    for list in simple.chain(complex) {
        let extended: Vec<Value> = objects
            .iter()
            .flat_map(|object| list.iter().map(move |item| shallow_merge(object, item)))
            .collect();
        if !extended.is_empty() {
            objects = extended;
        }
    }

    objects
}

fn shallow_merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = match base {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    if let Value::Object(fields) = overlay {
        for (key, value) in fields {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}
