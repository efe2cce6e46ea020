//! PasteOperator (component D): re-tokenizes the concatenation of two
//! adjacent tokens for `##`.

use crate::diagnostics::CppError;
use crate::intern::Interner;
use crate::token::{Token, TokenKind};
use crate::tokenizer;

/// At least one of `l`, `r` must be non-`EMPTY_ARG` — callers (the
/// Substituter's paste pass) are responsible for routing the
/// both-`EMPTY_ARG` case to vanish the pair instead of calling this.
pub fn paste_tokens(l: &Token, r: &Token, interner: &mut Interner) -> Result<Token, CppError> {
    if l.kind == TokenKind::EmptyArg {
        return Ok(*r);
    }
    if r.kind == TokenKind::EmptyArg {
        return Ok(*l);
    }

    let mut buf = l.text(interner);
    buf.push_str(&r.text(interner));

    let tok = tokenizer::retokenize_one(&buf, interner).map_err(|_| CppError::InvalidPaste {
        lhs: l.text(interner),
        rhs: r.text(interner),
    })?;
    Ok(tok.with_leading_whitespace(l.leading_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pastes_identifier_and_number_into_one_identifier() {
        let mut interner = Interner::new();
        let toks = tokenizer::tokenize_str("foo 42", &mut interner);
        let result = paste_tokens(&toks[0], &toks[1], &mut interner).unwrap();
        assert_eq!(result.kind, TokenKind::Identifier);
        assert_eq!(result.text(&interner), "foo42");
    }

    #[test]
    fn empty_arg_operand_returns_the_other() {
        let mut interner = Interner::new();
        let toks = tokenizer::tokenize_str("foo", &mut interner);
        let empty = Token::empty_arg();
        let result = paste_tokens(&toks[0], &empty, &mut interner).unwrap();
        assert_eq!(result.text(&interner), "foo");
        let result2 = paste_tokens(&empty, &toks[0], &mut interner).unwrap();
        assert_eq!(result2.text(&interner), "foo");
    }

    #[test]
    fn invalid_concatenation_is_fatal() {
        let mut interner = Interner::new();
        let toks = tokenizer::tokenize_str("foo +", &mut interner);
        // "foo" ## "+" => "foo+", which scans as two tokens (identifier, punct)
        let result = paste_tokens(&toks[0], &toks[1], &mut interner);
        assert!(result.is_err());
    }
}
