#![allow(dead_code)]

use aster::{Program, TokenKind, format, parse_str, scan};

/// Parse or panic with the offending input.
pub fn parse_ok(input: &str) -> Program {
    parse_str(input).unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input}"))
}

/// Canonical text must survive parse + format unchanged.
pub fn roundtrip(input: &str) {
    let output = format(&parse_ok(input));
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Token kinds with newlines and comments removed.
pub fn significant_kinds(input: &str) -> Vec<TokenKind> {
    scan(input)
        .iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}
