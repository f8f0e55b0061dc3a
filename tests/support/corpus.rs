//! Deterministic text corpora.
//!
//! Every generator takes a seed so failures reproduce exactly.

#![allow(dead_code)]

use rand::{rngs::StdRng, Rng, SeedableRng};

const WORDS: &[&str] = &[
    "the", "of", "and", "to", "in", "is", "was", "that", "for", "huffman", "tree", "code", "bit",
    "symbol", "frequency", "weight", "leaf", "node", "prefix", "stream",
];

/// Printable ASCII with a sprinkling of whitespace.
pub fn ascii(seed: u64, len: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| match rng.gen_range(0..20) {
            0 => '\n',
            1 => '\t',
            2..=4 => ' ',
            _ => rng.gen_range(b'!'..=b'~') as char,
        })
        .collect()
}

/// Uniformly random Unicode scalar values from every plane.
pub fn unicode(seed: u64, len: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<char>()).collect()
}

/// Word salad with English-like letter skew.
pub fn prose(seed: u64, words: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::new();
    for i in 0..words {
        if i > 0 {
            out.push(if rng.gen_ratio(1, 12) { '\n' } else { ' ' });
        }
        out.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
    }
    out
}

/// Text whose symbol counts follow the Fibonacci sequence, giving the
/// deepest possible tree for its size.
pub fn fibonacci(symbols: usize) -> String {
    let (mut a, mut b) = (1usize, 1usize);
    let mut out = String::new();
    for i in 0..symbols {
        let c = char::from_u32('A' as u32 + i as u32).unwrap_or('?');
        out.extend(std::iter::repeat(c).take(a));
        (a, b) = (b, a + b);
    }
    out
}

/// A handful of texts covering the usual edge cases.
pub fn edge_cases() -> Vec<String> {
    vec![
        String::new(),
        "a".to_string(),
        "aaaa".to_string(),
        "ab".to_string(),
        "aab".to_string(),
        " \n\t\r".to_string(),
        "\0\u{1}\u{7f}".to_string(),
        "naïve café ☕ 日本語 🦀".to_string(),
        "\u{10FFFF}\u{FFFF}\u{E000}".to_string(),
    ]
}
