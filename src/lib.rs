// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A limited-feature, byte-oriented regular expression engine.
//!
//! This crate trades the full regex feature set for predictable
//! performance on a narrow job: deciding whether a short pattern occurs
//! somewhere in a short text, many times over, across many patterns. There
//! are no capture groups, no backreferences, no lookaround, no
//! case-insensitivity, and no Unicode-aware matching — see the module docs
//! below for the full list of what's deliberately left out.
//!
//! Every compiled [`Regex`] is built around a Thompson NFA, but most real
//! patterns never actually run the general simulator: five specialized
//! matchers are tried first, each recognizing a common pattern shape
//! (`PREFIX.*SUFFIX`, a URL, a literal alternation, ...) and handling it
//! with something cheaper than epsilon closures.
//!
//! ```
//! use vibrex::Regex;
//!
//! let re = Regex::new(r"cat|dog").unwrap();
//! assert!(re.is_match(b"I have a dog"));
//! assert!(!re.is_match(b"I have a fish"));
//! ```

mod charclass;
mod compiled;
mod error;
mod inst;
mod limits;
mod nfa;
mod optimize;
mod parser;
mod prefilter;

pub use crate::error::{Error, ParseError, ParseErrorKind, ResourceLimitKind};

/// A compiled pattern.
///
/// `Regex` is immutable once built and holds no interior mutability, so it
/// is `Send + Sync` and can be shared across threads (e.g. behind an `Arc`)
/// without synchronization — every [`is_match`](Regex::is_match) call
/// allocates its own scratch NFA-simulation lists rather than reusing any
/// state owned by the `Regex` itself.
pub struct Regex {
    compiled: compiled::Compiled,
}

impl Regex {
    /// Compiles `pattern`.
    ///
    /// Returns an [`Error`] if the pattern is malformed, exceeds the
    /// length limit, nests too deeply, or would need more alternations or
    /// NFA states than this engine allows.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        compiled::compile(pattern.as_bytes()).map(|compiled| Regex { compiled })
    }

    /// Returns `true` if `text` contains a match for this pattern anywhere
    /// in it (this engine does not support full-string-only matching; wrap
    /// a pattern in `^...$` for that).
    pub fn is_match(&self, text: &[u8]) -> bool {
        self.compiled.is_match(text)
    }
}

impl std::fmt::Debug for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regex").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn regex_is_send_and_sync() {
        assert_send_sync::<Regex>();
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert!(Regex::new("(").is_err());
        assert!(Regex::new("a**").is_err());
        assert!(Regex::new("[z-a]").is_err());
    }

    #[test]
    fn basic_literal_and_concatenation() {
        let re = Regex::new("c.t").unwrap();
        assert!(re.is_match(b"the cat sat"));
        assert!(re.is_match(b"cot"));
        assert!(!re.is_match(b"ct"));
    }

    #[test]
    fn quantifiers() {
        let re = Regex::new("ab*c").unwrap();
        assert!(re.is_match(b"ac"));
        assert!(re.is_match(b"abbbbc"));
        assert!(!re.is_match(b"abd"));
    }

    #[test]
    fn anchors() {
        let re = Regex::new(r"^hello$").unwrap();
        assert!(re.is_match(b"hello"));
        assert!(!re.is_match(b"hello world"));
        assert!(!re.is_match(b"say hello"));
    }

    #[test]
    fn email_like_pattern() {
        let re = Regex::new(r"^[a-zA-Z0-9._]+@[a-zA-Z0-9.]+$").unwrap();
        assert!(re.is_match(b"user.name@example.com"));
        assert!(!re.is_match(b"not an email"));
    }

    #[test]
    fn optional_groups() {
        let re = Regex::new(r"^(ab)?(cd)?$").unwrap();
        assert!(re.is_match(b""));
        assert!(re.is_match(b"ab"));
        assert!(re.is_match(b"cd"));
        assert!(re.is_match(b"abcd"));
        assert!(!re.is_match(b"ac"));
    }

    #[test]
    fn nested_repetition_does_not_hang() {
        // (a+)+ is the classic catastrophic-backtracking pattern for a
        // backtracking VM; this engine's simulator is linear in text
        // length regardless, so this just needs to return promptly.
        let re = Regex::new("(a+)+$").unwrap();
        let text: Vec<u8> = [b'a'; 40].iter().chain(b"!".iter()).copied().collect();
        assert!(!re.is_match(&text));
    }

    #[test]
    fn four_way_literal_alternation() {
        let re = Regex::new("cat|dog|bird|fish").unwrap();
        for word in ["cat", "dog", "bird", "fish"] {
            assert!(re.is_match(word.as_bytes()));
        }
        assert!(!re.is_match(b"hamster"));
    }

    #[test]
    fn mixed_dotstar_alternation_with_leading_caret() {
        let re = Regex::new(r"^FDSN:NET_.*_Z/MSEED3?$|^FDSN:XX_.*$").unwrap();
        assert!(re.is_match(b"FDSN:NET_STA_00_H_Z/MSEED"));
        assert!(re.is_match(b"FDSN:XX_anything"));
        assert!(!re.is_match(b"OTHER:NET_STA_Z/MSEED"));
    }

    #[test]
    fn every_listed_invalid_pattern_is_rejected() {
        for bad in ["(", "[z-a]", "a**", "\\", "*a", "[]"] {
            assert!(Regex::new(bad).is_err(), "expected {bad:?} to fail to compile");
        }
    }
}
