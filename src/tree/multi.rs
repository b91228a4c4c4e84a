//! Construction from string arrays
//!
//! Mirrors a C-style calling convention: an array of NUL-terminated strings
//! with an explicit count, where [`AUTO_LEN`] asks for the count (or a
//! string's length) to be computed. Only a single text is supported;
//! generalized trees over several texts are not built.

use super::builder::{SuffixTree, build};
use anyhow::{Result, bail};
use memchr::memchr;

/// Sentinel length: compute the count or length automatically
pub const AUTO_LEN: isize = -1;

/// One input text with an explicit length
#[derive(Debug, Clone, Copy)]
pub struct TextInput<'t> {
    pub bytes: &'t [u8],
    /// Byte length to index, or [`AUTO_LEN`] to stop at the first NUL
    pub len: isize,
}

impl<'t> TextInput<'t> {
    pub fn new(bytes: &'t [u8], len: isize) -> Self {
        Self { bytes, len }
    }

    /// Input whose length is found by scanning for a NUL terminator
    pub fn terminated(bytes: &'t [u8]) -> Self {
        Self::new(bytes, AUTO_LEN)
    }

    /// The bytes to index
    ///
    /// # Panics
    ///
    /// If `len` is negative but not [`AUTO_LEN`], or larger than the slice.
    pub fn resolve(&self) -> &'t [u8] {
        match self.len {
            AUTO_LEN => &self.bytes[..nul_terminated_len(self.bytes)],
            len => {
                assert!(len >= 0, "invalid text length {}", len);
                let len = len as usize;
                assert!(
                    len <= self.bytes.len(),
                    "text length {} exceeds the {} bytes provided",
                    len,
                    self.bytes.len()
                );
                &self.bytes[..len]
            }
        }
    }
}

/// Bytes before the first NUL, or the whole slice if there is none
fn nul_terminated_len(bytes: &[u8]) -> usize {
    memchr(0, bytes).unwrap_or(bytes.len())
}

/// Resolve an entry count, counting up to the terminating `None` for
/// [`AUTO_LEN`]
fn resolve_count<T>(entries: &[Option<T>], count: isize) -> usize {
    match count {
        AUTO_LEN => entries.iter().position(Option::is_none).unwrap_or(entries.len()),
        count => {
            assert!(count >= 0, "invalid string count {}", count);
            let count = count as usize;
            assert!(
                count <= entries.len(),
                "string count {} exceeds the {} entries provided",
                count,
                entries.len()
            );
            count
        }
    }
}

/// Build a tree from `count` explicit-length inputs
///
/// `count` may be [`AUTO_LEN`] to use every input. Zero inputs give an empty
/// tree; more than one is rejected.
pub fn build_from_inputs<'t>(inputs: &[TextInput<'t>], count: isize) -> Result<SuffixTree<'t>> {
    let count = match count {
        AUTO_LEN => inputs.len(),
        count => {
            assert!(count >= 0, "invalid input count {}", count);
            let count = count as usize;
            assert!(count <= inputs.len(), "input count {} exceeds the {} inputs provided", count, inputs.len());
            count
        }
    };

    match count {
        0 => build(b""),
        1 => build(inputs[0].resolve()),
        n => bail!("generalized suffix trees are not supported ({} texts given)", n),
    }
}

/// Build a tree from a `None`-terminated array of NUL-terminated strings
///
/// With `count == AUTO_LEN` the entries before the first `None` are used.
/// Each string's length is taken up to its first NUL byte.
pub fn build_from_strings<'t>(strings: &[Option<&'t [u8]>], count: isize) -> Result<SuffixTree<'t>> {
    let count = resolve_count(strings, count);

    let mut inputs = Vec::with_capacity(count);
    for (i, entry) in strings[..count].iter().copied().enumerate() {
        match entry {
            Some(bytes) => inputs.push(TextInput::terminated(bytes)),
            None => panic!("string {} of {} is missing", i, count),
        }
    }

    build_from_inputs(&inputs, inputs.len() as isize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminated_input() {
        let input = TextInput::terminated(b"papua\0trailing");
        assert_eq!(input.resolve(), b"papua");

        let input = TextInput::terminated(b"no terminator");
        assert_eq!(input.resolve(), b"no terminator");
    }

    #[test]
    fn test_explicit_length() {
        let input = TextInput::new(b"papua", 3);
        assert_eq!(input.resolve(), b"pap");

        // An explicit length may include NUL bytes
        let input = TextInput::new(b"a\0b", 3);
        assert_eq!(input.resolve(), b"a\0b");
    }

    #[test]
    #[should_panic(expected = "invalid text length")]
    fn test_negative_length_panics() {
        TextInput::new(b"papua", -2).resolve();
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_length_past_end_panics() {
        TextInput::new(b"papua", 6).resolve();
    }

    #[test]
    fn test_build_single_input() {
        let tree = build_from_inputs(&[TextInput::new(b"mississippi", 4)], 1).unwrap();
        assert_eq!(tree.text(), b"miss");
        assert_eq!(tree.search(b"iss"), Some(1));
        assert_eq!(tree.search(b"issi"), None);
    }

    #[test]
    fn test_build_no_inputs() {
        let tree = build_from_inputs(&[], 0).unwrap();
        assert!(tree.is_empty());

        let tree = build_from_inputs(&[], AUTO_LEN).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_build_several_inputs_rejected() {
        let inputs = [TextInput::terminated(b"abc"), TextInput::terminated(b"bcd")];
        assert!(build_from_inputs(&inputs, AUTO_LEN).is_err());
        assert!(build_from_inputs(&inputs, 2).is_err());

        // Only the first input is used when the count says so
        let tree = build_from_inputs(&inputs, 1).unwrap();
        assert_eq!(tree.search(b"bc"), Some(1));
        assert_eq!(tree.search(b"cd"), None);
    }

    #[test]
    fn test_build_from_strings_auto_count() {
        let strings = [Some(b"papua\0".as_slice()), None, Some(b"ignored".as_slice())];
        let tree = build_from_strings(&strings, AUTO_LEN).unwrap();

        assert_eq!(tree.text(), b"papua");
        assert_eq!(tree.search(b"pua"), Some(2));
    }

    #[test]
    fn test_build_from_strings_empty() {
        let tree = build_from_strings(&[None], AUTO_LEN).unwrap();
        assert!(tree.is_empty());

        let tree = build_from_strings(&[], AUTO_LEN).unwrap();
        assert!(tree.is_empty());

        let tree = build_from_strings(&[Some(b"papua".as_slice())], 0).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_build_from_strings_several_rejected() {
        let strings = [Some(b"abc".as_slice()), Some(b"def".as_slice())];
        let err = build_from_strings(&strings, AUTO_LEN).unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    #[should_panic(expected = "invalid string count")]
    fn test_negative_count_panics() {
        let _ = build_from_strings(&[Some(b"abc".as_slice())], -3);
    }
}
