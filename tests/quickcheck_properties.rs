use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use vibrex::Regex;

/// A restricted alphabet keeps generated literals free of bytes that would
/// otherwise need escaping, so the properties below stay about the engine's
/// semantics rather than about quoting rules.
#[derive(Clone, Debug)]
struct Word(String);

impl Arbitrary for Word {
    fn arbitrary(g: &mut Gen) -> Word {
        let alphabet: Vec<char> = "abcxyz".chars().collect();
        let len = usize::arbitrary(g) % 8;
        Word((0..len).map(|_| *g.choose(&alphabet).unwrap()).collect())
    }
}

/// Alternation is commutative: `A|B` and `B|A` agree on every input,
/// regardless of which (if any) of the five probes ends up compiling them —
/// a literal-alternation probe on one side and a general-NFA fallback on
/// the other must still produce the same verdict.
#[quickcheck]
fn alternation_is_commutative(a: Word, b: Word, text: Word) -> bool {
    if a.0.is_empty() || b.0.is_empty() {
        return true; // `|b` / `a|` are a different, deliberately-tested shape
    }
    let forward = Regex::new(&format!("{}|{}", a.0, b.0)).unwrap();
    let backward = Regex::new(&format!("{}|{}", b.0, a.0)).unwrap();
    forward.is_match(text.0.as_bytes()) == backward.is_match(text.0.as_bytes())
}

/// A literal pattern matches a text iff the text contains it as a
/// substring — this holds however the engine chooses to evaluate it
/// (DFA probe for short literals, Boyer-Moore skip, or full NFA).
#[quickcheck]
fn literal_matches_iff_substring(pattern: Word, text: Word) -> bool {
    if pattern.0.is_empty() {
        return true;
    }
    let re = Regex::new(&pattern.0).unwrap();
    re.is_match(text.0.as_bytes()) == text.0.contains(&pattern.0)
}

/// `(a)` and `a` are semantically identical: a redundant wrapping group
/// changes nothing about which texts match.
#[quickcheck]
fn redundant_grouping_is_a_no_op(a: Word, text: Word) -> bool {
    if a.0.is_empty() {
        return true;
    }
    let plain = Regex::new(&a.0).unwrap();
    let grouped = Regex::new(&format!("({})", a.0)).unwrap();
    plain.is_match(text.0.as_bytes()) == grouped.is_match(text.0.as_bytes())
}

/// `(P)*` always matches the empty string (zero repetitions is always a
/// valid parse), for any literal `P`. The whole word is wrapped in a group
/// before the `*` so the quantifier applies to all of it, not just its last
/// escaped byte.
#[quickcheck]
fn star_matches_empty_string(a: Word) -> bool {
    let pattern = format!("^({})*$", regex_escape(&a.0));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(b""),
        Err(_) => true, // malformed once escaped-then-starred; not this property's concern
    }
}

/// Compiling the same pattern twice and matching the same text must agree:
/// compilation has no hidden randomness or shared mutable state that could
/// make two "identical" `Regex` values behave differently.
#[quickcheck]
fn compilation_is_idempotent(a: Word, text: Word) -> bool {
    if a.0.is_empty() {
        return true;
    }
    let re1 = Regex::new(&a.0).unwrap();
    let re2 = Regex::new(&a.0).unwrap();
    re1.is_match(text.0.as_bytes()) == re2.is_match(text.0.as_bytes())
}

fn regex_escape(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        if ".?*+[]()|^$\\".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
