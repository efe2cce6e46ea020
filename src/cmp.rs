//! Comparison utilities (component J): token and definition equality used
//! by the redefinition check.
//!
//! Symbols from the same interner are deduplicated on insertion, so string
//! payload equality never needs to touch interner contents; it's a plain
//! integer comparison.

use crate::macro_table::Macro;
use crate::token::{Payload, Token, TokenKind};

/// Returns 0 if `a` and `b` are equal per the rules in §4.J, non-zero
/// otherwise — mirrors the C core's `tok_cmp` return convention.
pub fn tok_cmp(a: &Token, b: &Token) -> i32 {
    if a.kind != b.kind {
        return 1;
    }
    match a.kind {
        TokenKind::Param => match (a.payload, b.payload) {
            (Payload::Param(pa), Payload::Param(pb)) if pa == pb => 0,
            _ => 1,
        },
        TokenKind::Number => match (a.payload, b.payload) {
            (Payload::Num { value: va, .. }, Payload::Num { value: vb, .. }) if va == vb => 0,
            _ => 1,
        },
        _ => match (a.payload, b.payload) {
            (Payload::Str(sa), Payload::Str(sb)) => {
                if sa == sb {
                    0
                } else {
                    1
                }
            }
            (Payload::None, Payload::None) => 0,
            _ => 1,
        },
    }
}

pub fn macro_eq(a: &Macro, b: &Macro) -> bool {
    a.kind == b.kind
        && a.params == b.params
        && a.name == b.name
        && a.replacement.len() == b.replacement.len()
        && a.replacement
            .iter()
            .zip(b.replacement.iter())
            .all(|(x, y)| tok_cmp(x, y) == 0)
}
