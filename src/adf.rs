//! Visitor policies for generating Atlassian Document Format (ADF) fixtures.
//!
//! The ADF schema is deeply nested and its full expansion is far too large to be useful,
//! so fixture generation prunes it with an object visitor. The engine carries no knowledge
//! of node types itself; these two policies hold it instead.
use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::{Visitor, VisitorError};

lazy_static! {
    static ref LEAF_NODE_TYPES: HashSet<&'static str> = [
        "blockCard",
        "bodiedExtension",
        "bulletList",
        "codeBlock",
        "date",
        "decisionItem",
        "emoji",
        "expand",
        "extension",
        "heading",
        "inlineCard",
        "inlineComment",
        "inlineExtension",
        "layoutColumn",
        "layoutSection",
        "link",
        "listItem",
        "media",
        "mediaGroup",
        "mediaSingle",
        "mention",
        "nestedExpand",
        "orderedList",
        "panel",
        "paragraph",
        "status",
        "tableCell",
    ]
    .into_iter()
    .collect();
    static ref EMPTY_CONTENT_NODE_TYPES: HashSet<&'static str> = ["tableHeader"].into_iter().collect();
    static ref UNSUPPORTED_NODE_TYPES: HashSet<&'static str> = [
        "subsup",
        "textColor",
        "bulletList",
        "orderedList",
        "taskItem",
        "taskList",
    ]
    .into_iter()
    .collect();
    static ref SAMPLED_NODE_TYPES: HashSet<&'static str> = [
        "bodiedExtension",
        "expand",
        "layoutSection",
        "link",
        "inlineComment",
        "layoutColumn",
        "tableHeader",
        "mediaSingle",
        "tableCell",
        "table",
        "status",
        "mention",
    ]
    .into_iter()
    .collect();
}

/// The `type` of the first variant, which names the node (or mark) the list was generated for.
fn node_type(variants: &[Value]) -> Option<&str> {
    variants.first()?.get("type")?.as_str()
}

fn node_type_in(variants: &[Value], types: &HashSet<&'static str>) -> bool {
    node_type(variants).is_some_and(|node_type| types.contains(node_type))
}

/// Keeps fixture counts stable on the full ADF schema.
///
/// - Leaf-like nodes (paragraphs, headings, media, ...) keep only their first variant.
/// - `tableHeader` variants always get an empty `content` list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl Visitor for DefaultPolicy {
    fn object(&mut self, mut variants: Vec<Value>) -> Result<Vec<Value>, VisitorError> {
        if node_type_in(&variants, &LEAF_NODE_TYPES) {
            variants.truncate(1);
            return Ok(variants);
        }

        for variant in variants.iter_mut() {
            let empty_content = variant
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|node_type| EMPTY_CONTENT_NODE_TYPES.contains(node_type));
            if empty_content {
                if let Some(fields) = variant.as_object_mut() {
                    fields.insert("content".to_string(), Value::Array(Vec::new()));
                }
            }
        }

        Ok(variants)
    }
}

/// Produces one small document per top-level block.
///
/// - A `doc` variant with several top-level content nodes is split into one document per node.
/// - Node types whose schema relies on unsupported keywords are removed.
/// - Heavy node types keep a single variant picked at random.
#[derive(Debug, Clone)]
pub struct FixturePolicy<R = StdRng> {
    rng: R,
}

impl FixturePolicy {
    pub fn new() -> Self {
        FixturePolicy {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        FixturePolicy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for FixturePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FixturePolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        FixturePolicy { rng }
    }
}

impl<R: Rng> Visitor for FixturePolicy<R> {
    fn object(&mut self, mut variants: Vec<Value>) -> Result<Vec<Value>, VisitorError> {
        if node_type(&variants) == Some("doc") {
            return Ok(split_documents(variants));
        }

        if node_type_in(&variants, &UNSUPPORTED_NODE_TYPES) {
            return Ok(Vec::new());
        }

        if node_type_in(&variants, &SAMPLED_NODE_TYPES) {
            let picked = self.rng.gen_range(0..variants.len());
            return Ok(vec![variants.swap_remove(picked)]);
        }

        Ok(variants)
    }
}

fn split_documents(documents: Vec<Value>) -> Vec<Value> {
    let mut split = Vec::with_capacity(documents.len());
    for document in documents {
        let content = match document.get("content") {
            Some(Value::Array(content)) if !content.is_empty() => content.clone(),
            _ => {
                split.push(document);
                continue;
            }
        };
        for node in content {
            let mut single = document.clone();
            single["content"] = Value::Array(vec![node]);
            split.push(single);
        }
    }
    split
}
