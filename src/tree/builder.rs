//! Suffix tree builder
//!
//! Builds a suffix tree by inserting every suffix of the text, longest
//! first, into a growing tree whose edges are labeled with spans of the
//! text. Each insertion walks down from the root comparing the remaining
//! suffix against edge labels and ends in one of four ways:
//!
//! 1. No sibling shares a first byte: append a new leaf
//! 2. The suffix is already spelled out: nothing to do
//! 3. The suffix ends inside an edge: split the edge
//! 4. The suffix leaves an edge part way: split it and hang a new leaf
//!
//! When an edge is fully consumed the walk continues in its child list.
//!
//! Construction cost is proportional to the number of suffixes times the
//! tree depth; this is not a linear-time construction.

use super::types::*;
use anyhow::{Context, Result, bail};

/// Suffix tree over a borrowed text
///
/// The tree never copies the text: node labels are spans resolved against
/// `text`, so the buffer must outlive the tree. Nodes live in a single
/// arena and link to each other by index. There is no way to mutate a
/// tree once built, so a shared reference can be searched from any number
/// of threads.
#[derive(Debug, Clone)]
pub struct SuffixTree<'t> {
    pub(crate) text: &'t [u8],
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Option<NodeId>,
}

impl<'t> SuffixTree<'t> {
    /// The indexed text
    pub fn text(&self) -> &'t [u8] {
        self.text
    }

    /// Length of the indexed text
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when the tree was built over empty text and has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The virtual root, whose child list holds the top-level edges
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of edges (the virtual root is not counted)
    pub fn node_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Label of the edge leading into `id`
    #[inline]
    pub fn label(&self, id: NodeId) -> &'t [u8] {
        self.node(id).label.bytes(self.text)
    }

    /// Iterate over the children of `id` in insertion order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            nodes: &self.nodes,
            next: self.node(id).first_child,
        }
    }
}

/// Iterator over a node's child list
pub struct Children<'a> {
    nodes: &'a [Node],
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.nodes[id.index()].next_sibling;
        Some(id)
    }
}

/// Builder for constructing a suffix tree one suffix at a time
pub struct SuffixTreeBuilder<'t> {
    tree: SuffixTree<'t>,
    /// Start offset of the next suffix to insert
    next_suffix: usize,
}

impl<'t> SuffixTreeBuilder<'t> {
    /// Create a builder over `text`
    ///
    /// Fails if the text is too large for the node arena.
    pub fn new(text: &'t [u8]) -> Result<Self> {
        if text.len() > MAX_TEXT_LEN {
            bail!(
                "text of {} bytes exceeds the suffix tree limit of {} bytes",
                text.len(),
                MAX_TEXT_LEN
            );
        }

        Ok(Self {
            tree: SuffixTree {
                text,
                nodes: Vec::new(),
                root: None,
            },
            next_suffix: 0,
        })
    }

    /// Total number of suffixes this builder will insert
    pub fn len(&self) -> usize {
        self.tree.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.text.is_empty()
    }

    /// Number of suffixes not inserted yet
    pub fn remaining(&self) -> usize {
        self.len() - self.next_suffix
    }

    /// Insert the longest suffix not yet in the tree
    ///
    /// Returns `Ok(None)` once every suffix has been inserted. On error the
    /// tree is left exactly as it was before the call.
    pub fn insert_next(&mut self) -> Result<Option<Insertion>> {
        if self.next_suffix == self.len() {
            return Ok(None);
        }

        let start = self.next_suffix;
        let suffix = TextSpan::new(start, self.len() - start);
        let outcome = self.insert_span(suffix)?;
        self.next_suffix += 1;

        Ok(Some(outcome))
    }

    /// Insert all remaining suffixes
    pub fn insert_all(&mut self) -> Result<()> {
        while self.insert_next()?.is_some() {}
        Ok(())
    }

    /// Finish building and hand out the tree
    ///
    /// The tree is only complete once every suffix is in, i.e. after
    /// [`insert_all`](Self::insert_all) or once [`insert_next`](Self::insert_next)
    /// returns `Ok(None)`. A partial tree misses substrings of the text.
    pub fn finish(self) -> SuffixTree<'t> {
        debug_assert_eq!(
            self.remaining(),
            0,
            "suffix tree finished before every suffix was inserted"
        );
        self.tree
    }

    /// Hand out the tree as built so far, inserted suffixes only
    #[cfg(test)]
    pub(crate) fn finish_partial(self) -> SuffixTree<'t> {
        self.tree
    }

    /// Insert one span of the text, starting at the root
    pub(crate) fn insert_span(&mut self, mut suffix: TextSpan) -> Result<Insertion> {
        debug_assert!(!suffix.is_empty());

        let text = self.tree.text;
        let root = match self.tree.root {
            Some(root) => root,
            None => {
                // Root plus the first leaf
                self.reserve(2)?;
                let root = self.push(Node::leaf(TextSpan::default()));
                self.tree.root = Some(root);
                root
            }
        };

        let mut parent = root;
        let mut prev: Option<NodeId> = None;
        let mut cursor = self.tree.node(root).first_child;

        loop {
            let Some(walk) = cursor else {
                // End of the child list: the suffix becomes a new leaf here
                self.reserve(1)?;
                let leaf = self.push(Node::leaf(suffix));

                return Ok(match prev {
                    Some(prev) => {
                        self.node_mut(prev).next_sibling = Some(leaf);
                        Insertion::Leaf
                    }
                    None => {
                        self.node_mut(parent).first_child = Some(leaf);
                        if parent == root {
                            Insertion::Leaf
                        } else {
                            Insertion::Extended
                        }
                    }
                });
            };

            let label = self.tree.node(walk).label;
            let offset = common_prefix_len(label.bytes(text), suffix.bytes(text));

            match Overlap::classify(offset, label.len, suffix.len) {
                Overlap::Disjoint => {
                    prev = Some(walk);
                    cursor = self.tree.node(walk).next_sibling;
                }
                Overlap::Exact => return Ok(Insertion::Duplicate),
                Overlap::SuffixIsPrefix => {
                    self.reserve(1)?;
                    self.split(walk, offset);
                    return Ok(Insertion::Split);
                }
                Overlap::LabelIsPrefix => {
                    suffix = suffix.advance(offset);
                    parent = walk;
                    prev = None;
                    cursor = self.tree.node(walk).first_child;
                }
                Overlap::Partial => {
                    self.reserve(2)?;
                    let tail = self.split(walk, offset);
                    let leaf = self.push(Node::leaf(suffix.advance(offset)));
                    self.node_mut(tail).next_sibling = Some(leaf);
                    return Ok(Insertion::Split);
                }
            }
        }
    }

    /// Split the edge into `id` after `offset` bytes
    ///
    /// `id` keeps the first `offset` bytes and becomes the parent of a new
    /// node carrying the rest of the label and all of `id`'s old children.
    /// Returns the new node, which is the only child of `id`. The caller
    /// must have reserved room for one node.
    fn split(&mut self, id: NodeId, offset: usize) -> NodeId {
        let node = *self.tree.node(id);
        debug_assert!(offset > 0 && offset < node.label.len);

        let tail = self.push(Node {
            label: node.label.advance(offset),
            first_child: node.first_child,
            next_sibling: None,
        });

        let node = self.node_mut(id);
        node.label = node.label.truncate(offset);
        node.first_child = Some(tail);

        tail
    }

    /// Make room for `additional` nodes so the next pushes cannot fail
    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.tree
            .nodes
            .try_reserve(additional)
            .context("Failed to allocate suffix tree nodes")
    }

    fn push(&mut self, node: Node) -> NodeId {
        debug_assert!(self.tree.nodes.len() < self.tree.nodes.capacity());
        let id = NodeId(self.tree.nodes.len() as u32);
        self.tree.nodes.push(node);
        id
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.tree.nodes[id.index()]
    }
}

/// Build a suffix tree over `text`
///
/// Empty text yields an empty tree, not an error.
pub fn build(text: &[u8]) -> Result<SuffixTree<'_>> {
    let mut builder = SuffixTreeBuilder::new(text)?;
    builder.insert_all()?;
    Ok(builder.finish())
}
