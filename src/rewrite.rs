//! Rewriter (component G): walks a token array and repeatedly invokes the
//! Substituter, splicing results in place and continuing the scan at the
//! start of the spliced region.

use crate::args;
use crate::context::Context;
use crate::diagnostics::CppError;
use crate::macro_table::MacroKind;
use crate::pool::TokenArray;
use crate::substitute::expand_macro;
use crate::token::{Payload, TokenKind};

/// Rewrites `list` in place into its fully expanded form.
pub fn expand(ctx: &mut Context, list: &mut TokenArray) -> Result<(), CppError> {
    let mut i = 0usize;
    while i < list.len() {
        let t = list[i];

        if t.kind != TokenKind::Identifier {
            i += 1;
            continue;
        }
        let Payload::Str(name) = t.payload else {
            i += 1;
            continue;
        };

        let (kind, params) = match ctx.definition(name) {
            Some(def) => (def.kind, def.params),
            None => {
                i += 1;
                continue;
            }
        };

        if ctx.is_disabled(name) {
            i += 1;
            continue;
        }

        let is_call = match kind {
            MacroKind::ObjectLike => true,
            MacroKind::FunctionLike => {
                matches!(list.get(i + 1).map(|t| t.kind), Some(TokenKind::Punct(b'(')))
            }
        };
        if !is_call {
            i += 1;
            continue;
        }

        let (arg_list, end) = if kind == MacroKind::FunctionLike {
            args::read_arguments(list, i + 2, params, &mut ctx.pool)?
        } else {
            (Vec::new(), i + 1)
        };

        let mut expn = expand_macro(ctx, name, arg_list)?;
        if let Some(first) = expn.first_mut() {
            first.leading_whitespace = t.leading_whitespace;
        }
        let expn_len = expn.len();

        list.splice(i..end, expn.drain(..));
        ctx.pool.release(expn);

        i += expn_len;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::macro_table::Macro;
    use crate::tokenizer::tokenize_str;

    #[test]
    fn undefined_identifier_passes_through() {
        let mut ctx = Context::new();
        let mut stream = tokenize_str("frobnicate", &mut ctx.interner);
        let before = stream.len();
        expand(&mut ctx, &mut stream).unwrap();
        assert_eq!(stream.len(), before);
    }

    #[test]
    fn function_like_name_without_parens_is_left_alone() {
        let mut ctx = Context::new();
        let name = ctx.interner.intern("F");
        let mut body = ctx.pool.acquire();
        body.push(crate::token::Token::param(0));
        let m = Macro::new(name, MacroKind::FunctionLike, 1, body);
        ctx.table.insert(m, &mut ctx.pool, &ctx.interner).unwrap();

        let mut stream = tokenize_str("F", &mut ctx.interner);
        expand(&mut ctx, &mut stream).unwrap();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn dynamic_file_and_line_refresh_on_each_expand() {
        let mut ctx = Context::new();
        ctx.set_position("main.c", 17);
        let mut stream = tokenize_str("__FILE__ __LINE__", &mut ctx.interner);
        expand(&mut ctx, &mut stream).unwrap();
        assert_eq!(stream[0].text(&ctx.interner), "\"main.c\"");
        assert_eq!(stream[1].text(&ctx.interner), "17");

        ctx.set_position("main.c", 18);
        let mut stream2 = tokenize_str("__FILE__ __LINE__", &mut ctx.interner);
        expand(&mut ctx, &mut stream2).unwrap();
        assert_eq!(stream2[1].text(&ctx.interner), "18");
    }

    #[test]
    fn no_param_or_paste_tokens_remain_after_expand() {
        let mut ctx = Context::new();
        let name = ctx.interner.intern("CAT");
        let mut body = ctx.pool.acquire();
        body.push(crate::token::Token::param(0));
        body.push(crate::token::Token::paste_op());
        body.push(crate::token::Token::param(1));
        let m = Macro::new(name, MacroKind::FunctionLike, 2, body);
        ctx.table.insert(m, &mut ctx.pool, &ctx.interner).unwrap();

        let mut stream = tokenize_str("CAT(foo,bar)", &mut ctx.interner);
        expand(&mut ctx, &mut stream).unwrap();
        assert!(!stream
            .iter()
            .any(|t| t.kind == TokenKind::TokenPaste || t.kind == TokenKind::Param));
    }
}
