use serde_json::Value;

use crate::VisitorError;

/// Hooks called while a schema is being expanded.
///
/// The only hook today is [`Visitor::object`]. It is called once per object node, with all
/// the variants generated for that node, before they are combined into the parent. It may
/// filter, reorder or rewrite them; returning an empty list removes the node from every
/// variant that would have contained it.
///
/// Any `FnMut(Vec<Value>) -> Vec<Value>` closure is a visitor:
///
/// ```
/// use schemagen::Generator;
/// use serde_json::{json, Value};
///
/// let schema = json!({
///     "type": "object",
///     "properties": { "a": { "type": "string" }, "b": { "type": "string" } }
/// });
///
/// let keep_first = |mut variants: Vec<Value>| {
///     variants.truncate(1);
///     variants
/// };
/// let docs = Generator::new().with_visitor(keep_first).generate(&schema).unwrap();
/// assert_eq!(docs, vec![json!({})]);
/// ```
pub trait Visitor {
    fn object(&mut self, variants: Vec<Value>) -> Result<Vec<Value>, VisitorError> {
        Ok(variants)
    }
}

/// Leaves every variant list untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityVisitor;

impl Visitor for IdentityVisitor {}

impl<F> Visitor for F
where
    F: FnMut(Vec<Value>) -> Vec<Value>,
{
    fn object(&mut self, variants: Vec<Value>) -> Result<Vec<Value>, VisitorError> {
        Ok(self(variants))
    }
}
