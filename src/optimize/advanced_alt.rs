// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Probe 4: alternations whose branches share a `.*`-wrapped shape, or
//! enough plain branches to be worth a common-prefix/suffix split (spec
//! §4.3). The richest and least regular of the five probes — ported
//! faithfully from the source's heuristics rather than smoothed into
//! something more uniform, per the note on preserving its quirks below.

use crate::compiled::{self, Compiled};
use crate::error::Error;
use crate::limits;

const METACHARS: &[u8] = b".?*+[]()|\\";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Kind {
    Literal,
    DotstarPrefix,
    DotstarSuffix,
    DotstarWrapper,
    Regex,
}

struct Alt {
    kind: Kind,
    core: Vec<u8>,
}

fn classify(alt: &[u8]) -> Alt {
    // Per-alternative `^`/`$` are stripped before classification; this
    // probe only reasons about the literal/dotstar shape of what's left.
    let mut s = alt;
    if s.first() == Some(&b'^') {
        s = &s[1..];
    }
    if s.last() == Some(&b'$') {
        s = &s[..s.len() - 1];
    }

    if s.len() < 2 {
        return Alt { kind: Kind::Literal, core: s.to_vec() };
    }

    let has_prefix = s.starts_with(b".*");
    let has_suffix = s.ends_with(b".*");

    if has_prefix && has_suffix {
        let core = if s.len() >= 4 { s[2..s.len() - 2].to_vec() } else { Vec::new() };
        return Alt { kind: Kind::DotstarWrapper, core };
    }
    if has_prefix {
        return Alt { kind: Kind::DotstarPrefix, core: s[2..].to_vec() };
    }
    if has_suffix {
        return Alt { kind: Kind::DotstarSuffix, core: s[..s.len() - 2].to_vec() };
    }
    if s.iter().any(|b| METACHARS.contains(b)) {
        Alt { kind: Kind::Regex, core: s.to_vec() }
    } else {
        Alt { kind: Kind::Literal, core: s.to_vec() }
    }
}

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

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

enum Shape {
    /// No alternative shares a consistent dotstar shape; handled via a
    /// common literal prefix/suffix split instead.
    PrefixSuffixSplit { prefix: Vec<u8>, suffix: SuffixMatcher, middles: Vec<MiddleMatcher> },
    /// Every alternative is `.*core.*`: the core only has to occur
    /// *anywhere* in the text. Checked ahead of `ConsistentPrefix` /
    /// `ConsistentSuffix`, matching the source's `has_dotstar_wrapper`
    /// check running before `has_dotstar_prefix`.
    Wrapper { cores: Vec<Vec<u8>> },
    /// Every alternative has a `.*` prefix: the source's quirk here is that
    /// the core must match the exact *tail* of the text, not merely occur
    /// somewhere in it.
    ConsistentPrefix { cores: Vec<Vec<u8>> },
    /// Every alternative has a `.*` suffix: symmetric counterpart of
    /// `ConsistentPrefix`, matching at the exact head.
    ConsistentSuffix { cores: Vec<Vec<u8>> },
    /// Mixed shapes, admitted only when the whole pattern is `^`-anchored.
    /// Each alternative is tested with its own rule; a `DotstarPrefix` core
    /// only has to occur *anywhere*, unlike the exact-tail rule above.
    PerAlternative { alts: Vec<Alt>, compiled: Vec<Option<Compiled>> },
}

enum SuffixMatcher {
    Literal(Vec<u8>),
    Pattern { raw_len: usize, compiled: Compiled },
}

enum MiddleMatcher {
    Literal(Vec<u8>),
    Pattern(Compiled),
    Empty,
}

pub(crate) struct Matcher {
    shape: Shape,
}

pub(crate) fn try_compile(pattern: &[u8]) -> Result<Option<Matcher>, Error> {
    if !pattern.contains(&b'|') {
        return Ok(None);
    }
    let top_level = match split_top_level(pattern) {
        Some(v) if v.len() >= 2 => v,
        _ => return Ok(None),
    };
    if top_level.len() - 1 > limits::MAX_ALTERNATIONS {
        return Err(Error::ResourceLimit(crate::error::ResourceLimitKind::Alternations));
    }

    let alts: Vec<Alt> = top_level.iter().map(|a| classify(a)).collect();
    let any_dotstar = alts.iter().any(|a| {
        matches!(a.kind, Kind::DotstarPrefix | Kind::DotstarSuffix | Kind::DotstarWrapper)
    });
    let all_prefix = alts
        .iter()
        .all(|a| matches!(a.kind, Kind::DotstarPrefix | Kind::DotstarWrapper));
    let all_suffix = alts
        .iter()
        .all(|a| matches!(a.kind, Kind::DotstarSuffix | Kind::DotstarWrapper));
    let consistent = all_prefix || all_suffix;
    let starts_caret = pattern.first() == Some(&b'^');
    let sufficient_no_dotstar = !any_dotstar
        && ((starts_caret && alts.len() >= 2) || (!starts_caret && alts.len() >= 3));
    let mixed_enabled = any_dotstar && !consistent && starts_caret;

    if !consistent && !sufficient_no_dotstar && !mixed_enabled {
        return Ok(None);
    }

    if mixed_enabled {
        let mut compiled_alts = Vec::with_capacity(alts.len());
        for a in &alts {
            if a.kind == Kind::Regex {
                compiled_alts.push(Some(compiled::compile(&wrap_anchored(&a.core))?));
            } else {
                compiled_alts.push(None);
            }
        }
        return Ok(Some(Matcher {
            shape: Shape::PerAlternative { alts, compiled: compiled_alts },
        }));
    }

    let all_wrapper = alts.iter().all(|a| a.kind == Kind::DotstarWrapper);
    if all_wrapper {
        return Ok(Some(Matcher {
            shape: Shape::Wrapper { cores: alts.into_iter().map(|a| a.core).collect() },
        }));
    }
    if all_prefix {
        return Ok(Some(Matcher {
            shape: Shape::ConsistentPrefix { cores: alts.into_iter().map(|a| a.core).collect() },
        }));
    }
    if all_suffix {
        return Ok(Some(Matcher {
            shape: Shape::ConsistentSuffix { cores: alts.into_iter().map(|a| a.core).collect() },
        }));
    }

    // sufficient_no_dotstar: every alternative is Literal or Regex. Extract
    // a common literal prefix/suffix and compile what's left per branch.
    // Use each alternative's already `^`/`$`-stripped core (from `classify`)
    // rather than its raw top-level slice, so a per-alternative anchor (e.g.
    // `^prefix_aaa|^prefix_bbb`) doesn't get folded into the literal prefix
    // as if the caret were an ordinary matchable byte.
    let raw: Vec<&[u8]> = alts.iter().map(|a| a.core.as_slice()).collect();
    let prefix = common_prefix(&raw);
    let suffix = common_suffix(&raw, prefix.len());
    if prefix.len() < 3 && suffix.len() < 3 {
        return Ok(None);
    }

    let suffix_matcher = if suffix.iter().any(|b| METACHARS.contains(b)) {
        SuffixMatcher::Pattern { raw_len: suffix.len(), compiled: compiled::compile(&wrap_anchored(&suffix))? }
    } else {
        SuffixMatcher::Literal(suffix.clone())
    };

    let mut middles = Vec::with_capacity(raw.len());
    for a in &raw {
        if a.len() < prefix.len() + suffix.len() {
            return Ok(None);
        }
        let mid = &a[prefix.len()..a.len() - suffix.len()];
        if mid.is_empty() {
            middles.push(MiddleMatcher::Empty);
        } else if mid.iter().any(|b| METACHARS.contains(b)) {
            middles.push(MiddleMatcher::Pattern(compiled::compile(&wrap_anchored(mid))?));
        } else {
            middles.push(MiddleMatcher::Literal(mid.to_vec()));
        }
    }

    Ok(Some(Matcher {
        shape: Shape::PrefixSuffixSplit { prefix, suffix: suffix_matcher, middles },
    }))
}

fn wrap_anchored(core: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(core.len() + 2);
    v.push(b'^');
    v.extend_from_slice(core);
    v.push(b'$');
    v
}

fn common_prefix(alts: &[&[u8]]) -> Vec<u8> {
    let shortest = alts.iter().map(|a| a.len()).min().unwrap_or(0);
    let mut n = 0;
    'outer: while n < shortest {
        let b = alts[0][n];
        for a in alts {
            if a[n] != b {
                break 'outer;
            }
        }
        n += 1;
    }
    alts[0][..n].to_vec()
}

fn common_suffix(alts: &[&[u8]], prefix_len: usize) -> Vec<u8> {
    let shortest = alts.iter().map(|a| a.len() - prefix_len).min().unwrap_or(0);
    let mut n = 0;
    'outer: while n < shortest {
        let b = alts[0][alts[0].len() - 1 - n];
        for a in alts {
            if a[a.len() - 1 - n] != b {
                break 'outer;
            }
        }
        n += 1;
    }
    let last = alts[0];
    last[last.len() - n..].to_vec()
}

impl Matcher {
    pub(crate) fn is_match(&self, text: &[u8]) -> bool {
        match &self.shape {
            Shape::Wrapper { cores } => cores.iter().any(|c| contains(text, c)),
            Shape::ConsistentPrefix { cores } => cores.iter().any(|c| text.ends_with(&c[..])),
            Shape::ConsistentSuffix { cores } => cores.iter().any(|c| text.starts_with(&c[..])),
            Shape::PerAlternative { alts, compiled } => {
                alts.iter().zip(compiled).any(|(a, c)| match a.kind {
                    Kind::Regex => c.as_ref().map_or(false, |c| c.is_match(text)),
                    _ => contains(text, &a.core),
                })
            }
            Shape::PrefixSuffixSplit { prefix, suffix, middles } => {
                if !text.starts_with(&prefix[..]) {
                    return false;
                }
                let Some(suffix_start) = find_suffix_start(text, suffix) else {
                    return false;
                };
                if suffix_start < prefix.len() {
                    return false;
                }
                let middle = &text[prefix.len()..suffix_start];
                middles.iter().any(|m| match m {
                    MiddleMatcher::Empty => middle.is_empty(),
                    MiddleMatcher::Literal(lit) => middle == &lit[..],
                    MiddleMatcher::Pattern(p) => p.is_match(middle),
                })
            }
        }
    }
}

fn find_suffix_start(text: &[u8], suffix: &SuffixMatcher) -> Option<usize> {
    match suffix {
        SuffixMatcher::Literal(lit) => {
            if text.ends_with(&lit[..]) {
                Some(text.len() - lit.len())
            } else {
                None
            }
        }
        SuffixMatcher::Pattern { raw_len, compiled } => {
            let max_extra = 10;
            let max_len = std::cmp::min(text.len(), raw_len + max_extra);
            for try_len in *raw_len..=max_len {
                if try_len > text.len() {
                    break;
                }
                let start = text.len() - try_len;
                if compiled.is_match(&text[start..]) {
                    return Some(start);
                }
            }
            None
        }
    }
}
