//! Builtins (component H): registers the predefined macros and marks
//! `__FILE__`/`__LINE__` for dynamic refresh on lookup.

use once_cell::sync::Lazy;

use crate::context::{CStandard, Context, EngineConfig};
use crate::macro_table::{Macro, MacroKind};
use crate::tokenizer;

/// `(name, source)` pairs for the always-present builtins. Source is parsed
/// by [`parse_builtin_body`], which treats `@N` as a `PARAM` placeholder —
/// unused by any builtin below today, since none of them take parameters,
/// but kept so a future builtin with parameters doesn't need a new parser.
static COMMON_BUILTINS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("__STDC__", "1"),
        ("__STDC_HOSTED__", "1"),
        ("__x86_64__", "1"),
        ("__inline", ""),
    ]
});

pub fn register_builtin_definitions(ctx: &mut Context, config: EngineConfig) {
    for (name, source) in COMMON_BUILTINS.iter() {
        define_builtin(ctx, name, source);
    }

    match config.standard {
        CStandard::C89 => {
            define_builtin(ctx, "__STDC_VERSION__", "199409L");
            define_builtin(ctx, "__STRICT_ANSI__", "");
        }
        CStandard::C99 => {
            define_builtin(ctx, "__STDC_VERSION__", "199901L");
        }
    }

    define_dynamic_builtin(ctx, "__FILE__", "0", true);
    define_dynamic_builtin(ctx, "__LINE__", "0", false);
}

fn define_builtin(ctx: &mut Context, name: &str, source: &str) {
    let sym = ctx.interner.intern(name);
    let body = parse_builtin_body(source, ctx);
    let m = Macro::new(sym, MacroKind::ObjectLike, 0, body);
    ctx.table
        .insert(m, &mut ctx.pool, &ctx.interner)
        .expect("builtin bootstrap never conflicts with an existing definition");
}

fn define_dynamic_builtin(ctx: &mut Context, name: &str, placeholder: &str, is_file: bool) {
    let sym = ctx.interner.intern(name);
    let body = parse_builtin_body(placeholder, ctx);
    let m = Macro::new(sym, MacroKind::ObjectLike, 0, body);
    let m = if is_file {
        m.mark_builtin_file()
    } else {
        m.mark_builtin_line()
    };
    ctx.table
        .insert(m, &mut ctx.pool, &ctx.interner)
        .expect("builtin bootstrap never conflicts with an existing definition");
}

/// Parses a builtin's source snippet into a replacement list, forwarding
/// ordinary text to the tokenizer and treating `@N` as `PARAM(N)`.
fn parse_builtin_body(source: &str, ctx: &mut Context) -> crate::pool::TokenArray {
    let mut body = ctx.pool.acquire();
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'@' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            let start = i + 1;
            let mut j = start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            let index: u32 = source[start..j].parse().expect("digits only");
            body.push(crate::token::Token::param(index));
            i = j;
            continue;
        }
        let (tok, next) = tokenizer::tokenize_one(source, i, &mut ctx.interner);
        if tok.kind == crate::token::TokenKind::End {
            break;
        }
        body.push(tok);
        i = next;
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_stdc_and_version_macros() {
        let mut ctx = Context::new();
        let name = ctx.interner.intern("__STDC_VERSION__");
        let def = ctx.table.lookup(name).unwrap();
        assert_eq!(def.replacement.len(), 1);
    }

    #[test]
    fn file_and_line_are_flagged_for_dynamic_refresh() {
        let mut ctx = Context::new();
        let file = ctx.interner.intern("__FILE__");
        let line = ctx.interner.intern("__LINE__");
        assert!(ctx.table.lookup(file).unwrap().is_file);
        assert!(ctx.table.lookup(line).unwrap().is_line);
    }
}
