//! Property tests for the public transliteration API.
//!
//! Inputs are generated from fixed character pools with a deterministic RNG so
//! failures are reproducible.

use asciify::{
    transliterate, transliterate_custom, transliterate_custom_into, transliterate_into,
    TranslitError,
};

/// Simple deterministic RNG for reproducible test inputs
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn below(&mut self, n: usize) -> usize {
        ((self.next_u64() >> 33) % n as u64) as usize
    }
}

/// Generate test strings from character pools
mod patterns {
    use super::SimpleRng;

    pub const LATIN: &[char] = &['a', 'Z', 'é', 'Æ', 'ß', 'ø', 'Ŧ', 'ŉ', 'ﬁ'];
    pub const CYRILLIC_GREEK: &[char] = &['М', 'о', 'с', 'к', 'в', 'Ε', 'λ', 'ν', 'ά'];
    pub const CJK: &[char] = &['世', '界', '北', '京', '祈', '愿', 'こ', 'ん', '東'];
    pub const EMOJI: &[char] = &['🦄', '☣', '🫰', '☕', '½', '™', '…', '«', '®'];
    pub const SPACES: &[char] = &[' ', '\u{A0}', '\u{3000}', '\t', '\n'];
    pub const UNKNOWN: &[char] = &['\u{378}', '\u{E000}', '\u{10FFFF}'];

    /// Random string of `len` characters drawn from `pools`.
    pub fn mixed(rng: &mut SimpleRng, len: usize, pools: &[&[char]]) -> String {
        (0..len)
            .map(|_| {
                let pool = pools[rng.below(pools.len())];
                pool[rng.below(pool.len())]
            })
            .collect()
    }

    /// Every pool at once.
    pub fn all(rng: &mut SimpleRng, len: usize) -> String {
        mixed(rng, len, &[LATIN, CYRILLIC_GREEK, CJK, EMOJI, SPACES, UNKNOWN])
    }

    /// Printable ASCII prefix followed by arbitrary text.
    pub fn ascii_prefixed(rng: &mut SimpleRng, prefix_len: usize, len: usize) -> String {
        let mut s: String = (0..prefix_len)
            .map(|_| (b' ' + rng.below(0x7F - 0x20) as u8) as char)
            .collect();
        s.push_str(&all(rng, len));
        s
    }
}

/// Helper checking the properties every output must have
fn check_output(input: &str, name: &str) -> Vec<u8> {
    let owned = transliterate(input.as_bytes())
        .unwrap_or_else(|e| panic!("Transliteration failed for {}: {:?}", name, e));

    if let Some(pos) = owned.iter().position(|&b| b >= 0x80) {
        panic!(
            "Non-ASCII output for {} at byte {}: {:#04x}",
            name, pos, owned[pos]
        );
    }

    // Exact-size buffer succeeds with identical bytes.
    let mut buf = vec![0u8; owned.len()];
    let written = transliterate_into(&mut buf, input.as_bytes())
        .unwrap_or_else(|e| panic!("Bounded transliteration failed for {}: {:?}", name, e));
    assert_eq!(written, &owned[..], "bounded output differs for {}", name);

    // One byte short fails.
    if !owned.is_empty() {
        let mut buf = vec![0u8; owned.len() - 1];
        match transliterate_into(&mut buf, input.as_bytes()) {
            Err(TranslitError::CapacityExceeded { .. }) => {}
            other => panic!("Expected capacity error for {}, got {:?}", name, other),
        }
    }

    // Output is already ASCII, so a second pass leaves it alone.
    let again = transliterate(&owned).unwrap();
    assert_eq!(again, owned, "second pass changed output for {}", name);

    owned
}

// === Identity on ASCII ===

#[test]
fn test_single_ascii_bytes_are_identity() {
    for b in 0x00u8..=0x7E {
        let out = transliterate(&[b]).unwrap();
        assert_eq!(out, [b], "byte {:#04x}", b);
    }
}

#[test]
fn test_delete_byte_goes_through_table() {
    // 0x7F is not on the fast path; the table maps it to nothing.
    assert_eq!(transliterate(b"\x7f").unwrap(), b"");
    assert_eq!(transliterate(b"ab\x7fcd").unwrap(), b"abcd");
}

#[test]
fn test_ascii_text_is_unchanged() {
    let text = b"The quick brown fox\njumps over the lazy dog.\t{}[]~";
    assert_eq!(transliterate(text).unwrap(), &text[..]);

    let mut rng = SimpleRng::new(7);
    for i in 0..50 {
        let input = patterns::ascii_prefixed(&mut rng, 40, 0);
        let out = check_output(&input, &format!("ascii_{}", i));
        assert_eq!(out, input.as_bytes());
    }
}

// === Fixtures ===

#[test]
fn test_literal_fixtures() {
    let cases: &[(&str, &str)] = &[
        ("Æneid", "AEneid"),
        ("étude", "etude"),
        ("🦄☣", "unicorn biohazard"),
        ("🫰", "hand with index finger and thumb crossed"),
        ("祈愿 peace", "Qi Yuan peace"),
        ("祈 愿 — peace", "Qi Yuan -- peace"),
        ("aaaa世", "aaaaShi"),
        ("中国人", "Zhong Guo Ren"),
        ("こんにちは", "konnitiha"),
        ("«½»", "<<1/2>>"),
    ];
    for &(input, expected) in cases {
        let out = check_output(input, input);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            expected,
            "input {:?}",
            input
        );
    }
}

// === Generated inputs ===

#[test]
fn test_mixed_scripts() {
    let mut rng = SimpleRng::new(42);
    for i in 0..200 {
        let len = rng.below(40);
        let input = patterns::all(&mut rng, len);
        check_output(&input, &format!("mixed_{}", i));
    }
}

#[test]
fn test_ascii_prefix_boundary() {
    let mut rng = SimpleRng::new(1234);
    for i in 0..200 {
        let prefix = rng.below(24);
        let len = 1 + rng.below(16);
        let input = patterns::ascii_prefixed(&mut rng, prefix, len);
        let out = check_output(&input, &format!("prefixed_{}", i));
        assert_eq!(&out[..prefix], &input.as_bytes()[..prefix]);
    }
}

#[test]
fn test_no_doubled_separators_from_cjk() {
    let mut rng = SimpleRng::new(99);
    for i in 0..100 {
        let len = 1 + rng.below(20);
        let input = patterns::mixed(&mut rng, len, &[patterns::CJK]);
        let out = check_output(&input, &format!("cjk_{}", i));
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("  "), "doubled space in {:?} for {:?}", text, input);
        assert!(!text.ends_with(' '), "dangling space in {:?} for {:?}", text, input);
    }
}

#[test]
fn test_placeholder_once_per_unknown() {
    let mut rng = SimpleRng::new(5);
    for i in 0..100 {
        let len = rng.below(30);
        let input = patterns::mixed(&mut rng, len, &[patterns::CJK, patterns::UNKNOWN]);
        let unknown = input
            .chars()
            .filter(|c| patterns::UNKNOWN.contains(c))
            .count();

        let out = transliterate_custom(input.as_bytes(), b"#").unwrap();
        let hashes = out.iter().filter(|&&b| b == b'#').count();
        assert_eq!(hashes, unknown, "case {} input {:?}", i, input);

        let mut buf = vec![0u8; out.len()];
        let written = transliterate_custom_into(&mut buf, input.as_bytes(), b"#").unwrap();
        assert_eq!(written, &out[..], "case {}", i);
    }
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let inputs: &[&[u8]] = &[b"\xff", b"abc\xc3", b"\xe4\xb8\x96\xe4", b"\xed\xa0\x80"];
    for input in inputs {
        match transliterate(input) {
            Err(TranslitError::InvalidEncoding(_)) => {}
            other => panic!("Expected encoding error for {:?}, got {:?}", input, other),
        }
        let mut buf = [0u8; 64];
        assert!(matches!(
            transliterate_into(&mut buf, input),
            Err(TranslitError::InvalidEncoding(_))
        ));
    }
}
