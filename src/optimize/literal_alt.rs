// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Probe 3: a pure-literal alternation such as `cat|dog` or
//! `(cat|dog)|(bird|fish)` (spec §4.3). Every alternative is plain text, so
//! the whole thing reduces to "does any of these substrings occur in the
//! text", answered with `aho-corasick` instead of walking the NFA.
//!
//! Nesting is flattened exactly one level deep: an alternative shaped like
//! `(x|y)` has its interior split on every `|` byte, ignoring paren nesting
//! entirely — `parse_literal_alternatives` never re-parses a group's
//! interior with the paren-aware scan used at the top level, so a group
//! nested inside *that* interior (e.g. `((a|b)|c)`) comes apart on raw `|`
//! bytes rather than being flattened recursively.

use aho_corasick::AhoCorasick;

const FORBIDDEN: &[u8] = b".?*+[]^$\\";

pub(crate) struct Matcher {
    ac: AhoCorasick,
}

pub(crate) fn try_compile(pattern: &[u8]) -> Option<Matcher> {
    if pattern.iter().any(|b| FORBIDDEN.contains(b)) {
        return None;
    }
    if !pattern.contains(&b'|') {
        return None;
    }

    let top_level = split_top_level(pattern)?;
    let mut literals: Vec<Vec<u8>> = Vec::new();
    for alt in top_level {
        if alt.is_empty() {
            return None; // `a||b` etc: nothing useful for strstr to find
        }
        if let Some(inner) = unwrap_single_group(alt) {
            let sub = split_naive(inner);
            if sub.len() > 1 {
                for s in sub {
                    if s.is_empty() {
                        return None;
                    }
                    literals.push(s.to_vec());
                }
            } else {
                literals.push(inner.to_vec());
            }
        } else {
            literals.push(alt.to_vec());
        }
    }

    if literals.len() < 2 {
        return None;
    }

    let ac = AhoCorasick::new(&literals).ok()?;
    Some(Matcher { ac })
}

/// Splits `pattern` on top-level (paren-depth-0) `|`. Returns `None` on
/// unbalanced parens.
fn split_top_level(pattern: &[u8]) -> Option<Vec<&[u8]>> {
    let mut depth = 0i32;
    let mut alts = Vec::new();
    let mut start = 0;
    for (i, &b) in pattern.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            b'|' if depth == 0 => {
                alts.push(&pattern[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    alts.push(&pattern[start..]);
    Some(alts)
}

/// Splits `inner` on every `|` byte, ignoring paren nesting entirely.
/// `parse_literal_alternatives` in the source re-splits a group's interior
/// this way rather than recursing with the same paren-aware scan used at
/// the top level, so `((a|b)|c)`'s inner `(a|b)` comes apart into `"(a"`
/// and `"b)"` instead of being flattened again as a nested group.
fn split_naive(inner: &[u8]) -> Vec<&[u8]> {
    inner.split(|&b| b == b'|').collect()
}

/// If `alt` is wrapped in exactly one group spanning its whole length,
/// returns the interior. A `(` that closes before the final byte (e.g.
/// `(a)(b)`) is not such a wrapping.
fn unwrap_single_group(alt: &[u8]) -> Option<&[u8]> {
    if alt.first() != Some(&b'(') || alt.last() != Some(&b')') {
        return None;
    }
    let mut depth = 0i32;
    for (i, &b) in alt.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 && i != alt.len() - 1 {
                    return None;
                }
            }
            _ => {}
        }
    }
    Some(&alt[1..alt.len() - 1])
}

impl Matcher {
    pub(crate) fn is_match(&self, text: &[u8]) -> bool {
        self.ac.is_match(text)
    }
}
