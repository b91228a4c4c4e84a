//! Debug dump and statistics
//!
//! Both walk the tree with an explicit stack so that deep, unbalanced trees
//! (e.g. over `"aaaa..."`) cannot overflow the call stack.

use super::builder::SuffixTree;
use super::types::{NodeId, TreeStats};
use std::io::{self, Write};

impl SuffixTree<'_> {
    /// Write the tree as indented text
    ///
    /// One line per edge label, prefixed with one `-` per level of depth,
    /// followed by a `*** N nodes in tree.` trailer. Returns N.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<usize> {
        let mut count = 0;
        let mut stack: Vec<(NodeId, usize)> = Vec::new();

        if let Some(first) = self.root.and_then(|root| self.node(root).first_child) {
            stack.push((first, 0));
        }

        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);

            for _ in 0..depth {
                out.write_all(b"-")?;
            }
            out.write_all(String::from_utf8_lossy(node.label.bytes(self.text)).as_bytes())?;
            out.write_all(b"\n")?;
            count += 1;

            // Siblings go underneath so the subtree is written first
            if let Some(sibling) = node.next_sibling {
                stack.push((sibling, depth));
            }
            if let Some(child) = node.first_child {
                stack.push((child, depth + 1));
            }
        }

        writeln!(out, "*** {} nodes in tree.", count)?;
        Ok(count)
    }

    /// Render [`dump`](Self::dump) into a string
    pub fn dump_to_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.dump(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Get statistics about this tree
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            text_len: self.text.len(),
            ..Default::default()
        };

        let Some(root) = self.root else {
            return stats;
        };

        // (node, edges from root, bytes from root)
        let mut stack: Vec<(NodeId, usize, usize)> = self
            .children(root)
            .map(|id| (id, 1, self.node(id).label.len))
            .collect();

        while let Some((id, depth, path_len)) = stack.pop() {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(depth);
            stats.max_path_len = stats.max_path_len.max(path_len);

            if self.node(id).is_leaf() {
                stats.leaf_count += 1;
            }

            for child in self.children(id) {
                stack.push((child, depth + 1, path_len + self.node(child).label.len));
            }
        }

        stats
    }
}
