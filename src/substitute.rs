//! Substituter (component F): produces the body of one macro expansion —
//! per-argument pre-expansion, parameter substitution, `#`/`##` handling —
//! per the seven ordered steps in §4.F.

use crate::context::Context;
use crate::diagnostics::CppError;
use crate::intern::{Interner, Symbol};
use crate::paste::paste_tokens;
use crate::pool::TokenArray;
use crate::rewrite;
use crate::stringify::stringify;
use crate::token::{Payload, Token, TokenKind};

pub fn expand_macro(
    ctx: &mut Context,
    name: Symbol,
    mut args: Vec<TokenArray>,
) -> Result<TokenArray, CppError> {
    ctx.push_disabled(name);

    let def = ctx
        .table
        .lookup(name)
        .expect("caller only invokes expand_macro for a definition it just looked up")
        .clone();

    // Step 2: pre-stringify snapshot, taken before any pre-expansion.
    let strings: Vec<Option<Token>> = if def.stringify {
        args.iter()
            .map(|a| Some(stringify(a, &mut ctx.interner)))
            .collect()
    } else {
        vec![None; args.len()]
    };

    // Step 3: pre-expand each argument, then force a splice-seam separator.
    for arg in args.iter_mut() {
        let mut owned = std::mem::take(arg);
        rewrite::expand(ctx, &mut owned)?;
        if let Some(first) = owned.first_mut() {
            if first.leading_whitespace < 1 {
                first.leading_whitespace = 1;
            }
        }
        *arg = owned;
    }

    // Step 4: substitute into the replacement list.
    let mut result = ctx.pool.acquire();
    let body = &def.replacement;
    let mut i = 0;
    while i < body.len() {
        let t = body[i];
        if t.kind == TokenKind::Punct(b'#') {
            if let Some(next) = body.get(i + 1) {
                if next.kind == TokenKind::Param {
                    if let Payload::Param(p) = next.payload {
                        let s = strings[p as usize]
                            .expect("def.stringify cached `# PARAM` presence in the body");
                        result.push(s);
                        i += 2;
                        continue;
                    }
                }
            }
        }
        if t.kind == TokenKind::Param {
            if let Payload::Param(p) = t.payload {
                result.extend_from_slice(&args[p as usize]);
            }
            i += 1;
            continue;
        }
        result.push(t);
        i += 1;
    }

    // Step 5: paste pass.
    paste_pass(&mut result, &mut ctx.interner)?;

    // Step 6: rescan while still disabled.
    rewrite::expand(ctx, &mut result)?;

    // Step 7: pop disabling stack, release argument/string storage.
    ctx.pop_disabled();
    for arg in args.drain(..) {
        ctx.pool.release(arg);
    }

    Ok(result)
}

/// Applies `##` pasting to `list` in place, per §4.F's two-cursor walk.
fn paste_pass(list: &mut TokenArray, interner: &mut Interner) -> Result<(), CppError> {
    if list.is_empty() {
        return Ok(());
    }
    if list.first().unwrap().kind == TokenKind::TokenPaste
        || list.last().unwrap().kind == TokenKind::TokenPaste
    {
        return Err(CppError::MisplacedPaste);
    }

    let mut i: isize = 0;
    let mut j: usize = 1;
    while j < list.len() {
        if list[j].kind == TokenKind::TokenPaste {
            let r = list[j + 1];
            if i < 0 {
                // A prior paste in this same chain already vanished both of
                // its operands (e.g. `CAT3(,,)` chaining `## ##`); a
                // negative `i` stands for that vanished placemarker, which
                // behaves like another `EMPTY_ARG` pasted against `r`.
                if r.kind != TokenKind::EmptyArg {
                    i = 0;
                    list[0] = r;
                }
            } else {
                let l = list[i as usize];
                if l.kind == TokenKind::EmptyArg && r.kind == TokenKind::EmptyArg {
                    i -= 1;
                } else {
                    list[i as usize] = paste_tokens(&l, &r, interner)?;
                }
            }
            j += 2;
        } else if list[j].kind != TokenKind::EmptyArg {
            i += 1;
            if (i as usize) < j {
                list[i as usize] = list[j];
            }
            j += 1;
        } else {
            j += 1;
        }
    }
    list.truncate((i + 1).max(0) as usize);
    Ok(())
}
