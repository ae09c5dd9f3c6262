use serde_json::Value;

/// Error type returned by a fallible [`crate::Visitor`] hook.
pub type VisitorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can abort a generation call.
///
/// Generation is all-or-nothing: the first error unwinds the whole expansion and no partial
/// variant list is returned.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The node matches none of the recognised kinds.
    #[error("Unable to classify schema node: {node}")]
    Unclassifiable { node: Value },

    /// A `$ref` has no matching entry in the definitions table.
    #[error("Unresolved reference '{reference}'")]
    UnresolvedReference { reference: String },

    /// A recognised keyword carries a value the generator cannot work with.
    #[error("Invalid JSON Schema: {0}")]
    InvalidSchema(String),

    #[error("Schema nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("Expansion produced {count} variants, more than the limit of {limit}")]
    TooManyVariants { count: usize, limit: usize },

    /// The caller-supplied object hook failed.
    #[error("Object visitor failed")]
    Visitor(#[source] VisitorError),
}
