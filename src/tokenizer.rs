//! Tokenizer (component L, new in this expansion): a minimal scanner over
//! preprocessing-token source text, enough to drive and test the macro
//! engine. Not a conformant C lexer — it recognizes identifiers, a
//! simplified pp-number grammar, string literals, newlines, and treats
//! every other non-whitespace byte as a single-character punctuator
//! (`##` is special-cased as `TokenPaste`). Also provides the
//! re-tokenization entry point the PasteOperator requires.

use crate::diagnostics::CppError;
use crate::intern::Interner;
use crate::pool::TokenArray;
use crate::token::{NumberValue, Token, TokenKind};

/// Scans one token starting at byte offset `pos` in `src`, returning the
/// token and the offset just past it. Leading whitespace (spaces and tabs)
/// is consumed and recorded on the returned token; `pos == src.len()`
/// yields `TokenKind::End`.
pub fn tokenize_one(src: &str, mut pos: usize, interner: &mut Interner) -> (Token, usize) {
    let bytes = src.as_bytes();
    let mut leading_whitespace = 0u32;
    while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
        leading_whitespace += 1;
        pos += 1;
    }

    if pos >= bytes.len() {
        return (Token::end().with_leading_whitespace(leading_whitespace), pos);
    }

    let start = pos;
    let c = bytes[pos];

    if c == b'\n' {
        return (
            Token::newline().with_leading_whitespace(leading_whitespace),
            pos + 1,
        );
    }

    if c == b'_' || c.is_ascii_alphabetic() {
        while pos < bytes.len() && (bytes[pos] == b'_' || bytes[pos].is_ascii_alphanumeric()) {
            pos += 1;
        }
        let sym = interner.intern(&src[start..pos]);
        return (
            Token::identifier(sym).with_leading_whitespace(leading_whitespace),
            pos,
        );
    }

    if c.is_ascii_digit() || (c == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)) {
        pos += 1;
        while pos < bytes.len() {
            let b = bytes[pos];
            if b == b'e' || b == b'E' || b == b'p' || b == b'P' {
                if matches!(bytes.get(pos + 1), Some(b'+') | Some(b'-')) {
                    pos += 2;
                    continue;
                }
            }
            if b == b'_' || b == b'.' || b.is_ascii_alphanumeric() {
                pos += 1;
            } else {
                break;
            }
        }
        let text = &src[start..pos];
        let literal = interner.intern(text);
        if let Ok(v) = text.parse::<u64>() {
            return (
                Token::number(NumberValue::Unsigned(v), literal).with_leading_whitespace(leading_whitespace),
                pos,
            );
        }
        return (
            Token::prep_number(literal).with_leading_whitespace(leading_whitespace),
            pos,
        );
    }

    if c == b'"' {
        pos += 1;
        while pos < bytes.len() && bytes[pos] != b'"' {
            if bytes[pos] == b'\\' && pos + 1 < bytes.len() {
                pos += 2;
            } else {
                pos += 1;
            }
        }
        // `Token::text` re-escapes `"`/`\` on output, so the payload stored
        // here must be the *decoded* value, not the raw spelling — otherwise
        // an embedded `\"` round-trips as `\\\"`. Quote/backslash are the
        // only escapes this engine's `#`/`##` operators ever need to survive.
        let raw = &src[start + 1..pos];
        let mut value = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    value.push(escaped);
                }
            } else {
                value.push(ch);
            }
        }
        let sym = interner.intern(&value);
        if pos < bytes.len() {
            pos += 1; // closing quote
        }
        return (
            Token::string(sym).with_leading_whitespace(leading_whitespace),
            pos,
        );
    }

    if c == b'#' {
        if bytes.get(pos + 1) == Some(&b'#') {
            return (
                Token::paste_op().with_leading_whitespace(leading_whitespace),
                pos + 2,
            );
        }
        return (
            Token::punct(b'#').with_leading_whitespace(leading_whitespace),
            pos + 1,
        );
    }

    (
        Token::punct(c).with_leading_whitespace(leading_whitespace),
        pos + 1,
    )
}

/// Tokenizes an entire buffer into a fresh `TokenArray`, not including a
/// trailing `End` token.
pub fn tokenize_str(src: &str, interner: &mut Interner) -> TokenArray {
    let mut out = TokenArray::new();
    let mut pos = 0;
    loop {
        let (tok, next) = tokenize_one(src, pos, interner);
        if tok.kind == TokenKind::End {
            break;
        }
        out.push(tok);
        pos = next;
    }
    out
}

/// Re-tokenizes the concatenation produced by `##`: requires the entire
/// buffer to scan as exactly one token (trailing whitespace is tolerated,
/// since it carries no information once pasted).
pub fn retokenize_one(buf: &str, interner: &mut Interner) -> Result<Token, CppError> {
    let (tok, next) = tokenize_one(buf, 0, interner);
    if tok.kind == TokenKind::End {
        return Err(invalid_paste(buf));
    }
    let (trailing, _) = tokenize_one(buf, next, interner);
    if trailing.kind != TokenKind::End {
        return Err(invalid_paste(buf));
    }
    Ok(tok)
}

fn invalid_paste(buf: &str) -> CppError {
    CppError::InvalidPaste {
        lhs: buf.to_string(),
        rhs: String::new(),
    }
}
