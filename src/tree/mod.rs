//! Suffix tree indexing module
//!
//! This module provides substring search over a single in-memory text
//! using a suffix tree whose edges are labeled with spans of the text.
//!
//! ## Architecture
//!
//! - `builder`: Inserts every suffix into the tree, splitting edges as needed
//! - `search`: Walks a pattern down the tree
//! - `dump`: Debug dump and statistics
//! - `verify`: Structural invariant checks
//! - `multi`: Construction from C-style string arrays
//! - `types`: Core type definitions
//!
//! ## Example
//!
//! ```
//! let tree = stree::tree::build(b"mississippi").unwrap();
//! assert_eq!(tree.search(b"ssi"), Some(2));
//! assert_eq!(tree.search(b"xyz"), None);
//! ```

pub mod builder;
pub mod dump;
pub mod multi;
pub mod search;
pub mod types;
pub mod verify;

// Re-exports for convenience
pub use builder::{Children, SuffixTree, SuffixTreeBuilder, build};
pub use multi::{AUTO_LEN, TextInput, build_from_inputs, build_from_strings};
pub use search::search;
pub use types::{Insertion, MAX_TEXT_LEN, Node, NodeId, Overlap, TextSpan, TreeStats};
