//! Stringifier (component E): turns an argument's token sequence into a
//! single `STRING` token per the `#` operator's rules.

use crate::intern::Interner;
use crate::token::{Payload, Token, TokenKind};

pub fn stringify(arg: &[Token], interner: &mut Interner) -> Token {
    if arg.is_empty() || (arg.len() == 1 && arg[0].kind == TokenKind::EmptyArg) {
        let sym = interner.intern("");
        return Token::string(sym);
    }

    if arg.len() == 1 {
        let text = arg[0].text(interner);
        let sym = interner.intern(&text);
        return Token::string(sym);
    }

    let mut out = String::new();
    for (i, t) in arg.iter().enumerate() {
        if t.kind == TokenKind::Newline {
            break;
        }
        if i > 0 && t.leading_whitespace > 0 {
            out.push(' ');
        }
        out.push_str(&t.text(interner));
    }
    let sym = interner.intern(&out);
    Token::string(sym)
}
