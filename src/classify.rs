//! Decide whether file content is safe to rewrite as text.
//!
//! Only a bounded prefix is inspected, so large binary assets never get
//! read twice just to be sniffed. A NUL byte settles the question before
//! any decoding is attempted.

/// Default number of leading bytes inspected per file.
pub const SAMPLE_SIZE: usize = 4096;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Kind {
    Text,
    Binary,
}

/// Classify a byte sample. Empty samples are text.
pub fn classify(sample: &[u8]) -> Kind {
    if sample.contains(&0) {
        return Kind::Binary;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => Kind::Text,
        Err(_) => Kind::Binary,
    }
}

/// The leading `size` bytes of `bytes`, or all of them if shorter.
pub fn sample(bytes: &[u8], size: usize) -> &[u8] {
    &bytes[..bytes.len().min(size)]
}
