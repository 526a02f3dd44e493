//! Path-segment hierarchy accumulator
//!
//! Every processed URL's path is inserted into a shared prefix tree; after
//! the crawl the tree is rendered once into the nested name/children/value
//! document consumed by visualization pipelines.

use serde::Serialize;
use std::collections::BTreeMap;

/// A node in the path-segment prefix tree
///
/// The root represents `/`. Children are keyed by path segment; keys are
/// always non-empty. Each insert increments the counter of every node it
/// walks through or creates, so a leaf's count is the number of processed
/// URLs whose path ends exactly there.
#[derive(Debug, Default)]
pub struct HierarchyNode {
    children: BTreeMap<String, HierarchyNode>,
    count: u64,
}

impl HierarchyNode {
    /// Creates an empty tree root
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one URL path, given as its segments in order
    ///
    /// Empty segments are skipped, so pre-split paths with doubled slashes
    /// insert cleanly.
    pub fn insert<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut node = self;
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            node = node.children.entry(segment.to_string()).or_default();
            node.count += 1;
        }
    }

    /// Renders the tree into its external representation
    ///
    /// Interior nodes carry `children` sorted lexicographically by segment;
    /// leaves carry `value` instead. Rendering the same tree state twice
    /// produces byte-identical output.
    pub fn to_tree(&self, name: &str) -> TreeNode {
        if self.children.is_empty() {
            TreeNode {
                name: name.to_string(),
                children: None,
                value: Some(self.count),
            }
        } else {
            TreeNode {
                name: name.to_string(),
                children: Some(
                    self.children
                        .iter()
                        .map(|(segment, child)| child.to_tree(segment))
                        .collect(),
                ),
                value: None,
            }
        }
    }
}

/// Rendered hierarchy node: `{name, children}` or `{name, value}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

impl TreeNode {
    /// Sums the `value` of every leaf in this subtree
    pub fn leaf_value_sum(&self) -> u64 {
        match &self.children {
            None => self.value.unwrap_or(0),
            Some(children) => children.iter().map(TreeNode::leaf_value_sum).sum(),
        }
    }
}
