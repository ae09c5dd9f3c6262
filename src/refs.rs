use serde_json::{Map, Value};

use crate::GenerateError;

lazy_static! {
    // `#/<collection>/<name>`; anything after the name is ignored.
    static ref LOCAL_REF_REGEX: regex::Regex = regex::Regex::new(r"^#/[^/]+/([^/]+)").unwrap();
}

/// The definitions table of one root schema, taken from `$defs` or, failing that,
/// `definitions`.
#[derive(Debug, Clone, Copy)]
pub struct Definitions<'a> {
    table: Option<&'a Map<String, Value>>,
}

impl<'a> Definitions<'a> {
    pub fn from_root(root: &'a Value) -> Self {
        let table = root
            .get("$defs")
            .or_else(|| root.get("definitions"))
            .and_then(Value::as_object);
        Definitions { table }
    }

    /// Looks up the definition named by a local `$ref`.
    ///
    /// Only the definition name is used: the collection segment is not checked against
    /// the keyword the table was read from.
    pub fn resolve(&self, reference: &str) -> Result<&'a Value, GenerateError> {
        let unresolved = || GenerateError::UnresolvedReference {
            reference: reference.to_owned(),
        };

        let name = LOCAL_REF_REGEX
            .captures(reference)
            .and_then(|captures| captures.get(1))
            .map(|name| decode_pointer_segment(name.as_str()))
            .ok_or_else(unresolved)?;

        self.table
            .and_then(|table| table.get(&name))
            .ok_or_else(unresolved)
    }
}

fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
