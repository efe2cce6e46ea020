//! The preprocessing token and its payload, per the data model in §3.
//!
//! Punctuators are encoded as `TokenKind::Punct(byte)` rather than as an
//! enumerated closed set, since the engine never branches on *which*
//! punctuator it is seeing except for a handful of literal bytes (`#`, `(`,
//! `)`, `,`) — representing the rest structurally keeps the rewriter generic.

use crate::intern::{Interner, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberValue {
    Signed(i64),
    Unsigned(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    PrepNumber,
    Newline,
    End,
    Param,
    EmptyArg,
    TokenPaste,
    Punct(u8),
}

#[derive(Debug, Clone, Copy)]
pub enum Payload {
    Str(Symbol),
    Num { value: NumberValue, literal: Symbol },
    Param(u32),
    None,
}

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub leading_whitespace: u32,
    pub payload: Payload,
}

impl Token {
    pub fn new(kind: TokenKind, payload: Payload) -> Token {
        Token {
            kind,
            payload,
            leading_whitespace: 0,
        }
    }

    pub fn identifier(sym: Symbol) -> Token {
        Token::new(TokenKind::Identifier, Payload::Str(sym))
    }

    pub fn string(sym: Symbol) -> Token {
        Token::new(TokenKind::String, Payload::Str(sym))
    }

    pub fn prep_number(sym: Symbol) -> Token {
        Token::new(TokenKind::PrepNumber, Payload::Str(sym))
    }

    pub fn number(value: NumberValue, literal: Symbol) -> Token {
        Token::new(TokenKind::Number, Payload::Num { value, literal })
    }

    pub fn param(index: u32) -> Token {
        Token::new(TokenKind::Param, Payload::Param(index))
    }

    pub fn punct(byte: u8) -> Token {
        Token::new(TokenKind::Punct(byte), Payload::None)
    }

    pub fn paste_op() -> Token {
        Token::new(TokenKind::TokenPaste, Payload::None)
    }

    pub fn empty_arg() -> Token {
        Token::new(TokenKind::EmptyArg, Payload::None)
    }

    pub fn newline() -> Token {
        Token::new(TokenKind::Newline, Payload::None)
    }

    pub fn end() -> Token {
        Token::new(TokenKind::End, Payload::None)
    }

    pub fn with_leading_whitespace(mut self, n: u32) -> Token {
        self.leading_whitespace = n;
        self
    }

    /// The exact preprocessing-token spelling this token would have in
    /// source text: used for `##` pasting and for rendering the final
    /// expanded stream. String tokens carry their *value* (unquoted) in
    /// `payload`; the surrounding quotes and minimal escaping are added
    /// here, mirroring how a stringize result is re-serialized.
    pub fn text(&self, interner: &Interner) -> String {
        match self.kind {
            TokenKind::Identifier | TokenKind::PrepNumber => {
                let Payload::Str(sym) = self.payload else {
                    unreachable!("identifier/prep-number token without string payload")
                };
                interner.resolve(sym).to_string()
            }
            TokenKind::Number => {
                let Payload::Num { literal, .. } = self.payload else {
                    unreachable!("number token without numeric payload")
                };
                interner.resolve(literal).to_string()
            }
            TokenKind::String => {
                let Payload::Str(sym) = self.payload else {
                    unreachable!("string token without string payload")
                };
                format!("\"{}\"", escape_string_body(interner.resolve(sym)))
            }
            TokenKind::Punct(b) => (b as char).to_string(),
            TokenKind::TokenPaste => "##".to_string(),
            TokenKind::Newline => "\n".to_string(),
            TokenKind::EmptyArg | TokenKind::End | TokenKind::Param => String::new(),
        }
    }
}

fn escape_string_body(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
