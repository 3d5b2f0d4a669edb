//! Source flattening.
//!
//! Turns one locale's source tree into dotted key → leaf entries:
//! `{greeting: {hello: "Hi"}}` becomes `greeting.hello → "Hi"`.

use crate::core::{FlatEntries, LocaleEntries, SourceNode};

/// Flattens a source tree. Empty trees give an empty set.
pub fn flatten(root: &SourceNode) -> FlatEntries {
    let mut entries = FlatEntries::new();
    flatten_node(root, String::new(), &mut entries);
    entries
}

/// Flattens a source tree into the entries of one locale.
pub fn flatten_locale(locale: &str, file_path: &str, root: &SourceNode) -> LocaleEntries {
    let mut result = LocaleEntries::new(locale, file_path);
    flatten_node(root, String::new(), &mut result.entries);
    result
}

fn flatten_node(node: &SourceNode, prefix: String, result: &mut FlatEntries) {
    match node {
        SourceNode::Mapping(children) => {
            for (key, child) in children {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_node(child, new_prefix, result);
            }
        }
        SourceNode::Scalar(leaf) => {
            result.insert(prefix, leaf.clone());
        }
    }
}
