//! Substring search over a built suffix tree
//!
//! The pattern is walked down from the root, one edge label at a time.
//! Siblings never share a first byte, so at each level at most one edge
//! can match and the walk never backtracks.

use super::builder::SuffixTree;
use super::types::NodeId;

/// Find an occurrence of `pattern` in the tree's text
///
/// Returns the byte offset of an occurrence, or `None` when the pattern
/// does not occur. An empty pattern, or an empty tree, never matches. When
/// the pattern occurs more than once, any one of its offsets may be
/// returned.
pub fn search(tree: &SuffixTree<'_>, pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }

    let text = tree.text;
    let mut rest = pattern;
    // Bytes of the pattern matched on the path so far
    let mut consumed = 0;
    let mut cursor: Option<NodeId> = tree.node(tree.root?).first_child;

    while let Some(walk) = cursor {
        let node = tree.node(walk);
        let label = node.label.bytes(text);

        if rest.len() <= label.len() {
            if label.starts_with(rest) {
                // Each label starts `depth` bytes after an occurrence of
                // the path leading to it
                return Some(node.label.start - consumed);
            }
            cursor = node.next_sibling;
        } else if rest.starts_with(label) {
            rest = &rest[label.len()..];
            consumed += label.len();
            cursor = node.first_child;
        } else {
            cursor = node.next_sibling;
        }
    }

    None
}

impl SuffixTree<'_> {
    /// Find an occurrence of `pattern`, see [`search`]
    pub fn search(&self, pattern: &[u8]) -> Option<usize> {
        search(self, pattern)
    }

    /// Find an occurrence of a string pattern
    pub fn search_str(&self, pattern: &str) -> Option<usize> {
        search(self, pattern.as_bytes())
    }

    /// Check if `pattern` occurs in the text
    pub fn contains(&self, pattern: &[u8]) -> bool {
        search(self, pattern).is_some()
    }
}
