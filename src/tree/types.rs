//! Types for suffix tree indexing
//!
//! Edge labels are never copied out of the indexed text: every node stores a
//! [`TextSpan`] (offset + length) that is resolved against the text buffer
//! the tree borrows.

use serde::{Deserialize, Serialize};

/// Largest text a tree can index.
///
/// A tree over `n` bytes holds at most `2n` nodes plus the root, and node
/// ids are `u32`.
pub const MAX_TEXT_LEN: usize = (u32::MAX / 2 - 1) as usize;

/// Borrowed view into the indexed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSpan {
    /// Offset of the first byte in the text
    pub start: usize,
    /// Number of bytes covered
    pub len: usize,
}

impl TextSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Offset one past the last byte
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve the span against the text it was taken from
    #[inline]
    pub fn bytes<'t>(&self, text: &'t [u8]) -> &'t [u8] {
        &text[self.start..self.end()]
    }

    #[inline]
    pub fn first_byte(&self, text: &[u8]) -> Option<u8> {
        self.bytes(text).first().copied()
    }

    /// Drop the first `n` bytes
    #[inline]
    pub fn advance(self, n: usize) -> Self {
        debug_assert!(n <= self.len);
        Self {
            start: self.start + n,
            len: self.len - n,
        }
    }

    /// Keep only the first `n` bytes
    #[inline]
    pub fn truncate(self, n: usize) -> Self {
        debug_assert!(n <= self.len);
        Self {
            start: self.start,
            len: n,
        }
    }

    /// Byte equality, independent of where either span starts
    pub fn same_bytes(&self, other: &TextSpan, text: &[u8]) -> bool {
        self.bytes(text) == other.bytes(text)
    }
}

/// Length of the longest common prefix of two byte strings
#[inline]
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A tree node
///
/// `label` holds the bytes consumed on the edge from the parent. Children
/// form a singly linked list through `next_sibling`, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub label: TextSpan,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    pub fn leaf(label: TextSpan) -> Self {
        Self {
            label,
            first_child: None,
            next_sibling: None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// How an edge label and the suffix being inserted overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// No common prefix: try the next sibling
    Disjoint,
    /// Label and suffix are the same bytes
    Exact,
    /// The suffix ends inside the label
    SuffixIsPrefix,
    /// The label is consumed and the suffix continues below it
    LabelIsPrefix,
    /// Both continue past the common prefix with different bytes
    Partial,
}

impl Overlap {
    /// Classify a common prefix of `offset` bytes between an edge label of
    /// `label_len` bytes and a suffix of `suffix_len` bytes.
    pub fn classify(offset: usize, label_len: usize, suffix_len: usize) -> Self {
        debug_assert!(offset <= label_len && offset <= suffix_len);

        if offset == 0 {
            Overlap::Disjoint
        } else if offset == label_len && offset == suffix_len {
            Overlap::Exact
        } else if offset == suffix_len {
            Overlap::SuffixIsPrefix
        } else if offset == label_len {
            Overlap::LabelIsPrefix
        } else {
            Overlap::Partial
        }
    }
}

/// What inserting one suffix did to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Appended as a new sibling after the last entry of a child list
    Leaf,
    /// Descended through a leaf edge and attached below it as its only child
    Extended,
    /// The suffix was already spelled out by an existing node
    Duplicate,
    /// An existing edge was split to make room
    Split,
}

/// Statistics about a built tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Bytes in the indexed text
    pub text_len: usize,
    /// Edges in the tree (the virtual root is not counted)
    pub node_count: usize,
    /// Nodes without children
    pub leaf_count: usize,
    /// Most edges on any root-to-node path
    pub max_depth: usize,
    /// Most bytes spelled by any root-to-node path
    pub max_path_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len(b"papua", b"pua"), 1);
        assert_eq!(common_prefix_len(b"xyzzy", b"foo"), 0);
        assert_eq!(common_prefix_len(b"xyzzy", b"yyy"), 0);
        assert_eq!(common_prefix_len(b"xyzzy", b"xxx"), 1);
        assert_eq!(common_prefix_len(b"papua", b"papa"), 3);
        assert_eq!(common_prefix_len(b"pa", b"papa"), 2);
        assert_eq!(common_prefix_len(b"", b"abc"), 0);
    }

    #[test]
    fn test_span_advance_and_truncate() {
        let text = b"papua";
        let span = TextSpan::new(0, 5);

        let tail = span.advance(3);
        assert_eq!(tail, TextSpan::new(3, 2));
        assert_eq!(tail.bytes(text), b"ua");

        let head = span.truncate(3);
        assert_eq!(head.bytes(text), b"pap");
        assert_eq!(head.end(), 3);
        assert_eq!(head.first_byte(text), Some(b'p'));

        assert!(span.advance(5).is_empty());
    }

    #[test]
    fn test_span_equality_is_by_bytes() {
        let text = b"abab";
        let first = TextSpan::new(0, 2);
        let second = TextSpan::new(2, 2);

        assert_ne!(first, second);
        assert!(first.same_bytes(&second, text));
        assert!(!first.same_bytes(&TextSpan::new(1, 2), text));
    }

    #[test]
    fn test_overlap_classification() {
        assert_eq!(Overlap::classify(0, 4, 3), Overlap::Disjoint);
        assert_eq!(Overlap::classify(3, 3, 3), Overlap::Exact);
        assert_eq!(Overlap::classify(2, 4, 2), Overlap::SuffixIsPrefix);
        assert_eq!(Overlap::classify(2, 2, 4), Overlap::LabelIsPrefix);
        assert_eq!(Overlap::classify(3, 5, 4), Overlap::Partial);
    }
}
