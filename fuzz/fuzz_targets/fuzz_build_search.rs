#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a [u8],
    pattern: &'a [u8],
    start: usize,
    len: usize,
}

fuzz_target!(|input: Input| {
    // Keep texts small, construction is not linear
    let text = &input.text[..input.text.len().min(512)];
    let Ok(tree) = stree::tree::build(text) else {
        return;
    };

    tree.verify().expect("built tree violates its invariants");

    // Any reported offset must spell the pattern, and a miss must be real
    match tree.search(input.pattern) {
        Some(pos) => assert_eq!(&text[pos..pos + input.pattern.len()], input.pattern),
        None if !input.pattern.is_empty() => {
            assert!(!text.windows(input.pattern.len()).any(|w| w == input.pattern));
        }
        None => {}
    }

    // Substrings of the text are always found
    if !text.is_empty() {
        let start = input.start % text.len();
        let len = 1 + input.len % (text.len() - start);
        let pattern = &text[start..start + len];
        let pos = tree.search(pattern).expect("substring of the text not found");
        assert_eq!(&text[pos..pos + len], pattern);
    }
});
