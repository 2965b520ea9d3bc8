// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Recursive-descent parser and Thompson-construction NFA builder
//! (spec §4.1).
//!
//! Grammar: `alt := cat ('|' cat)*`, `cat := piece*`,
//! `piece := atom ('*'|'+'|'?')?`,
//! `atom := '.' | '^' | '$' | '(' alt ')' | '[' class ']' | '\' any | literal`.
//! An empty `cat` is legal, which is what lets `a|`, `|a`, and `()` parse.

use crate::error::{Error, ParseErrorKind};
use crate::inst::{State, StateId, NONE};
use crate::limits;

/// A patch-list entry: a still-dangling transition slot that needs to be
/// pointed at whatever comes next. The source represents this as a pointer
/// chain threaded through already-allocated `State` storage; we use an
/// explicit `Vec` of tagged slot references into the arena instead (spec
/// §9: "patch-lists ... treat them as non-owning views into the arena").
#[derive(Clone, Copy, Debug)]
enum Slot {
    Out(StateId),
    Out1(StateId),
}

type PatchList = Vec<Slot>;

/// A partially built NFA fragment: one entry state plus a list of dangling
/// exits (spec §3, "Fragment").
struct Frag {
    start: StateId,
    out: PatchList,
}

/// Owns the state arena during construction. Consumed by [`build`] into a
/// finished NFA (`Vec<State>` plus metadata) once parsing succeeds.
pub(crate) struct Builder<'p> {
    pattern: &'p [u8],
    pos: usize,
    depth: usize,
    states: Vec<State>,
}

/// Result of a successful parse + Thompson construction: the state arena,
/// its single entry point, and whether the source pattern ended in an
/// unescaped `$`.
pub(crate) struct BuiltNfa {
    pub states: Vec<State>,
    pub start: StateId,
    pub anchored_end: bool,
}

pub(crate) fn build(pattern: &[u8]) -> Result<BuiltNfa, Error> {
    if pattern.len() > limits::MAX_PATTERN_LENGTH {
        return Err(Error::PatternTooLong { len: pattern.len() });
    }

    let mut b = Builder { pattern, pos: 0, depth: 0, states: Vec::new() };
    let frag = b.parse_alt()?;
    if b.pos != pattern.len() {
        return Err(Error::parse(b.pos, ParseErrorKind::TrailingBytes));
    }

    if b.states.len() >= limits::MAX_NFA_STATES {
        return Err(Error::ResourceLimit(crate::error::ResourceLimitKind::NfaStates));
    }
    let match_id = b.push(State::Match)?;
    b.patch(frag.out, match_id);

    let anchored_end = ends_in_unescaped_dollar(pattern);
    Ok(BuiltNfa { states: b.states, start: frag.start, anchored_end })
}

fn ends_in_unescaped_dollar(pattern: &[u8]) -> bool {
    match pattern.last() {
        Some(b'$') => pattern.len() < 2 || pattern[pattern.len() - 2] != b'\\',
        _ => false,
    }
}

impl<'p> Builder<'p> {
    fn peek(&self) -> Option<u8> {
        self.pattern.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.pattern.get(self.pos + offset).copied()
    }

    fn push(&mut self, s: State) -> Result<StateId, Error> {
        if self.states.len() >= limits::MAX_NFA_STATES {
            return Err(Error::ResourceLimit(crate::error::ResourceLimitKind::NfaStates));
        }
        let id = self.states.len() as StateId;
        self.states.push(s);
        Ok(id)
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= limits::MAX_RECURSION_DEPTH {
            return Err(Error::RecursionLimit);
        }
        self.depth += 1;
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Points every dangling slot in `list` at `target`.
    fn patch(&mut self, list: PatchList, target: StateId) {
        for slot in list {
            match slot {
                Slot::Out(id) => set_out(&mut self.states[id as usize], target),
                Slot::Out1(id) => set_out1(&mut self.states[id as usize], target),
            }
        }
    }

    // alt := cat ('|' cat)*
    fn parse_alt(&mut self) -> Result<Frag, Error> {
        self.enter()?;
        let e1 = self.parse_cat();
        let e1 = match e1 {
            Ok(f) => f,
            Err(e) => {
                self.exit();
                return Err(e);
            }
        };

        if self.peek() != Some(b'|') {
            self.exit();
            return Ok(e1);
        }
        self.pos += 1; // skip '|'
        let e2 = self.parse_alt();
        self.exit();
        let e2 = e2?;

        let split = self.push(State::Split { out: e1.start, out1: e2.start })?;
        let mut out = e1.out;
        out.extend(e2.out);
        Ok(Frag { start: split, out })
    }

    // cat := piece*
    fn parse_cat(&mut self) -> Result<Frag, Error> {
        self.enter()?;
        match self.peek() {
            None | Some(b')') | Some(b'|') => {
                // Empty concatenation: denotes the empty match. Represented
                // as a Split whose first branch is itself the (only)
                // dangling exit, matching the source's `state(SPLIT, ...)`
                // placeholder for an empty `cat`.
                let s = self.push(State::Split { out: NONE, out1: NONE })?;
                self.exit();
                return Ok(Frag { start: s, out: vec![Slot::Out(s)] });
            }
            _ => {}
        }

        let mut e1 = match self.parse_piece() {
            Ok(f) => f,
            Err(e) => {
                self.exit();
                return Err(e);
            }
        };

        loop {
            match self.peek() {
                None | Some(b')') | Some(b'|') => break,
                _ => {}
            }
            let e2 = match self.parse_piece() {
                Ok(f) => f,
                Err(e) => {
                    self.exit();
                    return Err(e);
                }
            };
            self.patch(e1.out, e2.start);
            e1 = Frag { start: e1.start, out: e2.out };
        }
        self.exit();
        Ok(e1)
    }

    // piece := atom ('*' | '+' | '?')?
    fn parse_piece(&mut self) -> Result<Frag, Error> {
        let e = self.parse_atom()?;
        match self.peek() {
            Some(b'*') => {
                self.pos += 1;
                let s = self.push(State::Split { out: e.start, out1: NONE })?;
                self.patch(e.out, s);
                Ok(Frag { start: s, out: vec![Slot::Out1(s)] })
            }
            Some(b'+') => {
                self.pos += 1;
                let s = self.push(State::Split { out: e.start, out1: NONE })?;
                self.patch(e.out, s);
                Ok(Frag { start: e.start, out: vec![Slot::Out1(s)] })
            }
            Some(b'?') => {
                self.pos += 1;
                let s = self.push(State::Split { out: e.start, out1: NONE })?;
                let mut out = e.out;
                out.push(Slot::Out1(s));
                Ok(Frag { start: s, out })
            }
            _ => Ok(e),
        }
    }

    // atom := '.' | '^' | '$' | '(' alt ')' | '[' class ']' | '\' any | literal
    fn parse_atom(&mut self) -> Result<Frag, Error> {
        let c = match self.peek() {
            Some(c) => c,
            None => return Err(Error::parse(self.pos, ParseErrorKind::DanglingQuantifier)),
        };

        match c {
            b'.' => {
                self.pos += 1;
                let s = self.push(State::Any { out: NONE })?;
                Ok(Frag { start: s, out: vec![Slot::Out(s)] })
            }
            b'^' => {
                self.pos += 1;
                let s = self.push(State::StartAnchor { out: NONE })?;
                Ok(Frag { start: s, out: vec![Slot::Out(s)] })
            }
            b'$' => {
                self.pos += 1;
                let s = self.push(State::EndAnchor { out: NONE })?;
                Ok(Frag { start: s, out: vec![Slot::Out(s)] })
            }
            b'(' => {
                self.enter()?;
                self.pos += 1;
                let e = self.parse_alt();
                let e = match e {
                    Ok(f) => f,
                    Err(err) => {
                        self.exit();
                        return Err(err);
                    }
                };
                if self.peek() != Some(b')') {
                    self.exit();
                    return Err(Error::parse(self.pos, ParseErrorKind::UnclosedGroup));
                }
                self.pos += 1;
                self.exit();
                Ok(e)
            }
            b'[' => self.parse_class(),
            b'\\' => {
                if self.peek_at(1).is_none() {
                    return Err(Error::parse(self.pos, ParseErrorKind::TrailingEscape));
                }
                self.pos += 1;
                let escaped = self.pattern[self.pos];
                self.pos += 1;
                let s = self.push(State::Char { byte: escaped, out: NONE })?;
                Ok(Frag { start: s, out: vec![Slot::Out(s)] })
            }
            b')' => Err(Error::parse(self.pos, ParseErrorKind::UnopenedGroup)),
            b'*' | b'+' | b'?' => {
                Err(Error::parse(self.pos, ParseErrorKind::DanglingQuantifier))
            }
            _ => {
                self.pos += 1;
                let s = self.push(State::Char { byte: c, out: NONE })?;
                Ok(Frag { start: s, out: vec![Slot::Out(s)] })
            }
        }
    }

    fn parse_class(&mut self) -> Result<Frag, Error> {
        let class = crate::charclass::parse(self.pattern, &mut self.pos)?;
        let s = self.push(State::Class { class: Box::new(class), out: NONE })?;
        Ok(Frag { start: s, out: vec![Slot::Out(s)] })
    }
}

fn set_out(state: &mut State, target: StateId) {
    match state {
        State::Char { out, .. }
        | State::Any { out, .. }
        | State::Class { out, .. }
        | State::StartAnchor { out }
        | State::EndAnchor { out }
        | State::Split { out, .. } => *out = target,
        State::Match => unreachable!("Match has no outgoing transitions to patch"),
    }
}

fn set_out1(state: &mut State, target: StateId) {
    match state {
        State::Split { out1, .. } => *out1 = target,
        _ => unreachable!("only Split has a second outgoing transition"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiles(pattern: &str) -> bool {
        build(pattern.as_bytes()).is_ok()
    }

    #[test]
    fn accepts_supported_surface() {
        assert!(compiles("abc"));
        assert!(compiles("a.b"));
        assert!(compiles("a*b+c?"));
        assert!(compiles("^abc$"));
        assert!(compiles("a|b|c"));
        assert!(compiles("(ab)+"));
        assert!(compiles("[a-z0-9]"));
        assert!(compiles("[^a-z]"));
        assert!(compiles(r"a\.b"));
        assert!(compiles("a|"));
        assert!(compiles("|a"));
        assert!(compiles("()"));
        assert!(compiles("[-a]"));
        assert!(compiles("[a-]"));
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert!(!compiles("("));
        assert!(!compiles(")"));
        assert!(!compiles("[z-a]"));
        assert!(!compiles("a**"));
        assert!(!compiles("\\"));
        assert!(!compiles("*a"));
        assert!(!compiles("[]"));
        assert!(!compiles("[^]"));
    }

    #[test]
    fn detects_trailing_dollar_anchor() {
        let built = build(b"abc$").unwrap();
        assert!(built.anchored_end);
        let built = build(br"abc\$").unwrap();
        assert!(!built.anchored_end);
        let built = build(b"abc").unwrap();
        assert!(!built.anchored_end);
    }

    #[test]
    fn recursion_limit_is_enforced() {
        let mut pattern = String::new();
        for _ in 0..2000 {
            pattern.push('(');
        }
        pattern.push('a');
        for _ in 0..2000 {
            pattern.push(')');
        }
        assert!(matches!(build(pattern.as_bytes()), Err(Error::RecursionLimit)));
    }

    #[test]
    fn pattern_length_limit_is_enforced() {
        let pattern = "a".repeat(limits::MAX_PATTERN_LENGTH + 1);
        assert!(matches!(
            build(pattern.as_bytes()),
            Err(Error::PatternTooLong { .. })
        ));
    }
}
