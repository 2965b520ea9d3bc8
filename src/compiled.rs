// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ties the parser, NFA simulator, and five optimizer probes together into
//! one compiled pattern (spec §4's dispatch order).
//!
//! [`compile`] tries, in order: both-anchors, URL-shape, literal-alternation,
//! advanced-alternation, literal/alternation-DFA, the `.*`
//! matches-everything special case, and finally falls back to the general
//! NFA with whatever skip table the literal prefix scan turned up. At most
//! one of these ends up live in a given [`Compiled`] value — modeled as a
//! tagged enum rather than a struct of optional fields plus booleans, per
//! the note on avoiding "null object" sprawl.

use log::{debug, trace};

use crate::error::Error;
use crate::inst::{State, StateId};
use crate::optimize::{advanced_alt, both_anchors, dfa, literal_alt, url};
use crate::{nfa, parser, prefilter};

pub(crate) enum Inner {
    BothAnchors(both_anchors::Matcher),
    Url(url::Matcher),
    LiteralAlt(literal_alt::Matcher),
    AdvancedAlt(advanced_alt::Matcher),
    Dfa(dfa::Matcher),
    DotstarUnanchored,
    Nfa(NfaProgram),
}

pub(crate) struct NfaProgram {
    states: Vec<State>,
    start: StateId,
    anchored_start: bool,
    anchored_end: bool,
    skip: Skip,
}

enum Skip {
    None,
    FirstByte(u8),
    BoyerMoore { prefix: Vec<u8>, table: Box<[usize; 256]> },
}

pub(crate) struct Compiled {
    inner: Inner,
}

pub(crate) fn compile(pattern: &[u8]) -> Result<Compiled, Error> {
    if pattern.len() > crate::limits::MAX_PATTERN_LENGTH {
        return Err(Error::PatternTooLong { len: pattern.len() });
    }
    let num_alternations = pattern.iter().filter(|&&b| b == b'|').count();
    if num_alternations > crate::limits::MAX_ALTERNATIONS {
        return Err(Error::ResourceLimit(crate::error::ResourceLimitKind::Alternations));
    }

    if let Some(m) = both_anchors::try_compile(pattern) {
        debug!("compiled pattern via both-anchors probe");
        return Ok(Compiled { inner: Inner::BothAnchors(m) });
    }
    if let Some(m) = url::try_compile(pattern) {
        debug!("compiled pattern via URL-shape probe");
        return Ok(Compiled { inner: Inner::Url(m) });
    }
    if let Some(m) = literal_alt::try_compile(pattern) {
        debug!("compiled pattern via literal-alternation probe");
        return Ok(Compiled { inner: Inner::LiteralAlt(m) });
    }
    if let Some(m) = advanced_alt::try_compile(pattern)? {
        debug!("compiled pattern via advanced-alternation probe");
        return Ok(Compiled { inner: Inner::AdvancedAlt(m) });
    }
    if let Some(m) = dfa::try_compile(pattern) {
        debug!("compiled pattern via literal/alternation DFA probe");
        return Ok(Compiled { inner: Inner::Dfa(m) });
    }
    if pattern == b".*" {
        debug!("pattern is exactly \".*\": matches every input");
        return Ok(Compiled { inner: Inner::DotstarUnanchored });
    }

    debug!("no specialized probe applied; falling back to general NFA");
    let built = parser::build(pattern)?;
    let anchored_start = pattern.first() == Some(&b'^');

    let skip = if built.anchored_end || prefilter::has_top_level_alt(pattern) {
        Skip::None
    } else {
        let prefix = prefilter::literal_prefix(pattern);
        if !anchored_start && prefix.len() >= 3 {
            trace!("using Boyer-Moore skip with a {}-byte literal prefix", prefix.len());
            let table = prefilter::bad_char_skip(&prefix);
            Skip::BoyerMoore { prefix, table }
        } else if !anchored_start && !prefix.is_empty() {
            trace!("using first-byte skip on {:?}", prefix[0] as char);
            Skip::FirstByte(prefix[0])
        } else {
            Skip::None
        }
    };

    Ok(Compiled {
        inner: Inner::Nfa(NfaProgram {
            states: built.states,
            start: built.start,
            anchored_start,
            anchored_end: built.anchored_end,
            skip,
        }),
    })
}

impl Compiled {
    pub(crate) fn is_match(&self, text: &[u8]) -> bool {
        match &self.inner {
            Inner::BothAnchors(m) => m.is_match(text),
            Inner::Url(m) => m.is_match(text),
            Inner::LiteralAlt(m) => m.is_match(text),
            Inner::AdvancedAlt(m) => m.is_match(text),
            Inner::Dfa(m) => m.is_match(text),
            Inner::DotstarUnanchored => true,
            Inner::Nfa(p) => p.is_match(text),
        }
    }
}

impl NfaProgram {
    fn is_match(&self, text: &[u8]) -> bool {
        match &self.skip {
            Skip::None => {
                nfa::search(&self.states, self.start, text, self.anchored_start, self.anchored_end)
            }
            Skip::FirstByte(b) => {
                nfa::search_with_first_byte(&self.states, self.start, text, *b, self.anchored_end)
            }
            Skip::BoyerMoore { prefix, table } => nfa::search_with_boyer_moore(
                &self.states,
                self.start,
                text,
                prefix,
                table,
                self.anchored_end,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &[u8]) -> bool {
        compile(pattern.as_bytes()).unwrap().is_match(text)
    }

    #[test]
    fn top_level_alternation_disables_the_general_nfa_skip_table() {
        // "foo.|bar" has a top-level "|", so the first branch's "foo"
        // prefix must not be installed as a Boyer-Moore/first-byte skip —
        // doing so would make the scan only look where "foo" occurs and
        // miss a match that lives entirely in the "bar" branch.
        assert!(matches("foo.|bar", b"bar"));
        assert!(matches("foo.|bar", b"foox"));
        assert!(matches("a.|bc", b"bc"));
        assert!(matches("a.|bc", b"ax"));
    }
}
