use vibrex::{Error, Regex};

#[test]
fn pattern_too_long_is_rejected() {
    let pattern = "a".repeat(70_000);
    match Regex::new(&pattern) {
        Err(Error::PatternTooLong { len }) => assert_eq!(len, 70_000),
        other => panic!("expected PatternTooLong, got {other:?}"),
    }
}

#[test]
fn deeply_nested_groups_hit_the_recursion_limit() {
    let mut pattern = String::new();
    for _ in 0..1500 {
        pattern.push('(');
    }
    pattern.push('a');
    for _ in 0..1500 {
        pattern.push(')');
    }
    assert!(matches!(Regex::new(&pattern), Err(Error::RecursionLimit)));
}

#[test]
fn moderate_nesting_still_compiles() {
    let mut pattern = String::new();
    for _ in 0..50 {
        pattern.push('(');
    }
    pattern.push('a');
    for _ in 0..50 {
        pattern.push(')');
    }
    let re = Regex::new(&pattern).unwrap();
    assert!(re.is_match(b"a"));
}

#[test]
fn too_many_alternations_are_rejected() {
    let alts: Vec<&str> = std::iter::repeat("x").take(1500).collect();
    let pattern = alts.join("|");
    match Regex::new(&pattern) {
        Err(Error::ResourceLimit(_)) => {}
        other => panic!("expected ResourceLimit, got {other:?}"),
    }
}
