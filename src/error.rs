// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types returned by [`Regex::new`](crate::Regex::new).
//!
//! The original C engine reported failures as `NULL` plus a static
//! diagnostic string written through an out-parameter. `Error` is the
//! `Result`-based equivalent: every failure mode in spec §7's taxonomy has
//! a variant here, and none of them allocate.

use std::fmt;

use crate::limits;

/// Why a pattern failed to compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The pattern's byte length exceeds [`limits::MAX_PATTERN_LENGTH`].
    PatternTooLong { len: usize },
    /// The recursive-descent parser could not make sense of the pattern.
    Parse(ParseError),
    /// Nested groups/alternations/quantifiers pushed the parser past
    /// [`limits::MAX_RECURSION_DEPTH`].
    RecursionLimit,
    /// The pattern has more than [`limits::MAX_ALTERNATIONS`] top-level `|`
    /// operators, or would require more than [`limits::MAX_NFA_STATES`] NFA
    /// states to represent.
    ResourceLimit(ResourceLimitKind),
}

/// Which compile-time resource bound was exceeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceLimitKind {
    /// More than [`limits::MAX_ALTERNATIONS`] `|` operators.
    Alternations,
    /// More than [`limits::MAX_NFA_STATES`] states needed.
    NfaStates,
}

/// A parse failure, carrying the byte offset at which it was detected and a
/// static description (the Rust analogue of the source's static error
/// strings — no allocation, nothing for a caller to free).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) pos: usize,
    pub(crate) kind: ParseErrorKind,
}

/// The specific grammar rule that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `(` with no matching `)`.
    UnclosedGroup,
    /// A `)` with no matching `(`.
    UnopenedGroup,
    /// `[` with no matching `]`.
    UnclosedClass,
    /// `[]` or `[^]`.
    EmptyClass,
    /// `[z-a]`: the range's end byte precedes its start byte.
    InvertedRange,
    /// A trailing `\` with nothing to escape.
    TrailingEscape,
    /// `*`, `+`, or `?` with no preceding atom.
    DanglingQuantifier,
    /// Parsing stopped before consuming the whole pattern (e.g. a stray `)`
    /// or `*` mid-pattern rejected by `parseatom`).
    TrailingBytes,
}

impl Error {
    pub(crate) fn parse(pos: usize, kind: ParseErrorKind) -> Error {
        Error::Parse(ParseError { pos, kind })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::PatternTooLong { len } => write!(
                f,
                "pattern too long: {len} bytes exceeds the {max} byte limit",
                max = limits::MAX_PATTERN_LENGTH,
            ),
            Error::Parse(ref e) => write!(f, "{e}"),
            Error::RecursionLimit => write!(
                f,
                "pattern nesting exceeds the recursion limit of {}",
                limits::MAX_RECURSION_DEPTH,
            ),
            Error::ResourceLimit(ResourceLimitKind::Alternations) => write!(
                f,
                "pattern has more than {} alternation operators",
                limits::MAX_ALTERNATIONS,
            ),
            Error::ResourceLimit(ResourceLimitKind::NfaStates) => write!(
                f,
                "pattern requires more than {} NFA states",
                limits::MAX_NFA_STATES,
            ),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::UnclosedGroup => "unclosed group: missing ')'",
            ParseErrorKind::UnopenedGroup => "unexpected ')' with no matching '('",
            ParseErrorKind::UnclosedClass => "unclosed character class: missing ']'",
            ParseErrorKind::EmptyClass => "empty character class '[]' or '[^]'",
            ParseErrorKind::InvertedRange => "character class range is inverted (end < start)",
            ParseErrorKind::TrailingEscape => "trailing '\\' with nothing to escape",
            ParseErrorKind::DanglingQuantifier => "quantifier with no preceding atom",
            ParseErrorKind::TrailingBytes => "unexpected characters after a complete pattern",
        };
        write!(f, "parse error at byte {}: {}", self.pos, msg)
    }
}

impl std::error::Error for Error {}
impl std::error::Error for ParseError {}
