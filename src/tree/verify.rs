//! Structural checks for a built tree

use super::builder::SuffixTree;
use super::types::NodeId;
use anyhow::{Result, bail, ensure};

impl SuffixTree<'_> {
    /// Check the structural invariants of the tree
    ///
    /// - every edge label is non-empty and lies inside the text
    /// - no two siblings start with the same byte
    /// - every node is reached exactly once from the root
    /// - each label, read back to the start of its path, spells that path
    ///   somewhere in the text
    pub fn verify(&self) -> Result<()> {
        let text = self.text;

        let Some(root) = self.root else {
            ensure!(self.nodes.is_empty(), "tree without root holds {} nodes", self.nodes.len());
            ensure!(text.is_empty(), "tree over {} bytes has no root", text.len());
            return Ok(());
        };

        ensure!(self.node(root).label.is_empty(), "root carries a label");
        ensure!(self.node(root).next_sibling.is_none(), "root has a sibling");

        let mut visited = vec![false; self.nodes.len()];
        visited[root.index()] = true;

        // (node, bytes from the root to the node, offset where that path occurs)
        let mut stack: Vec<(NodeId, usize, usize)> = vec![(root, 0, 0)];

        while let Some((parent, depth, occurrence)) = stack.pop() {
            let mut seen = [false; 256];

            for child in self.children(parent) {
                if visited[child.index()] {
                    bail!("node {} is reached more than once", child.index());
                }
                visited[child.index()] = true;

                let label = self.node(child).label;
                ensure!(!label.is_empty(), "node {} has an empty label", child.index());
                ensure!(
                    label.end() <= text.len(),
                    "node {} label {}..{} is outside the text",
                    child.index(),
                    label.start,
                    label.end()
                );

                let first = text[label.start] as usize;
                ensure!(
                    !seen[first],
                    "siblings under node {} share first byte {:#04x}",
                    parent.index(),
                    first
                );
                seen[first] = true;

                ensure!(
                    label.start >= depth,
                    "node {} starts at {} but sits {} bytes deep",
                    child.index(),
                    label.start,
                    depth
                );
                let child_occurrence = label.start - depth;
                ensure!(
                    text[child_occurrence..label.start] == text[occurrence..occurrence + depth],
                    "node {} does not continue the path above it",
                    child.index()
                );

                stack.push((child, depth + label.len, child_occurrence));
            }
        }

        let reached = visited.iter().filter(|&&v| v).count();
        ensure!(
            reached == self.nodes.len(),
            "{} of {} nodes are unreachable",
            self.nodes.len() - reached,
            self.nodes.len()
        );

        Ok(())
    }
}
