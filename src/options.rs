use serde::{Deserialize, Serialize};

/// Guards that bound a single generation call.
///
/// Cyclic `$ref` graphs and `allOf`/`anyOf` explosions would otherwise run until the stack or
/// memory is exhausted; with these limits they fail with a [`crate::GenerateError`] instead.
///
/// The struct deserializes from camelCase JSON, and missing fields take their defaults:
///
/// ```
/// use schemagen::GeneratorOptions;
///
/// let options: GeneratorOptions = serde_json::from_str(r#"{ "maxDepth": 16 }"#).unwrap();
/// assert_eq!(options.max_depth, 16);
/// assert_eq!(options.max_variants, Some(100_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Maximum number of nested schema nodes (including `$ref` hops) on one expansion path.
    pub max_depth: usize,
    /// Maximum length of any single variant list; `None` disables the check.
    pub max_variants: Option<usize>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            max_depth: 64,
            max_variants: Some(100_000),
        }
    }
}
