//! # stree - In-Memory Suffix Tree Index
//!
//! stree builds a suffix tree over a single text and answers substring
//! presence queries by walking the pattern down the tree, without
//! scanning the text.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Tree construction, search, dump and structural checks
//! - [`output`] - Result formatting (ripgrep-style hits, statistics)
//! - [`utils`] - Configuration, input loading, progress bars
//!
//! ## Quick Start
//!
//! ```
//! use stree::tree::build;
//!
//! let text = b"papua new guinea";
//! let tree = build(text).unwrap();
//!
//! assert_eq!(tree.search(b"pua"), Some(2));
//! assert_eq!(tree.search(b"xyz"), None);
//! ```
//!
//! The tree borrows the text instead of copying it: edge labels are
//! offset/length spans into the original buffer, so the buffer must
//! outlive the tree.
//!
//! ## Performance
//!
//! Construction inserts every suffix one at a time, so its cost grows with
//! the number of suffixes times the depth of the tree. Searches cost
//! O(pattern length + sibling scans) and never touch the text outside the
//! labels they compare against. A built tree is immutable and can be
//! searched from many threads at once.

pub mod output;
pub mod tree;
pub mod utils;
