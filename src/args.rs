//! ArgumentReader (component C): parses a comma-separated,
//! parenthesis-balanced argument list out of a token stream.

use crate::diagnostics::CppError;
use crate::pool::{TokenArray, TokenArrayPool};
use crate::token::{Token, TokenKind};

/// `stream[pos..]` must begin at the token immediately after the macro
/// invocation's opening `(`. Returns the collected arguments (exactly
/// `params` of them) and the index just past the closing `)`.
pub fn read_arguments(
    stream: &[Token],
    mut pos: usize,
    params: u32,
    pool: &mut TokenArrayPool,
) -> Result<(Vec<TokenArray>, usize), CppError> {
    if params == 0 {
        return match stream.get(pos).map(|t| t.kind) {
            Some(TokenKind::Punct(b')')) => Ok((Vec::new(), pos + 1)),
            _ => Err(CppError::ArityMismatch {
                name: String::new(),
            }),
        };
    }

    let mut args = Vec::with_capacity(params as usize);
    for i in 0..params {
        let is_last = i + 1 == params;
        let mut depth: i32 = 0;
        let mut arg = pool.acquire();
        loop {
            match stream.get(pos).map(|t| t.kind) {
                None | Some(TokenKind::Newline) => {
                    return Err(CppError::UnterminatedArgumentList)
                }
                Some(TokenKind::Punct(b'(')) => {
                    depth += 1;
                    arg.push(stream[pos]);
                    pos += 1;
                }
                Some(TokenKind::Punct(b')')) => {
                    if depth == 0 {
                        if !is_last {
                            return Err(CppError::ArityMismatch {
                                name: String::new(),
                            });
                        }
                        break;
                    }
                    depth -= 1;
                    arg.push(stream[pos]);
                    pos += 1;
                }
                Some(TokenKind::Punct(b',')) if depth == 0 => {
                    if is_last {
                        return Err(CppError::ArityMismatch {
                            name: String::new(),
                        });
                    }
                    pos += 1;
                    break;
                }
                _ => {
                    arg.push(stream[pos]);
                    pos += 1;
                }
            }
        }
        if arg.is_empty() {
            arg.push(Token::empty_arg());
        }
        args.push(arg);
    }

    match stream.get(pos).map(|t| t.kind) {
        Some(TokenKind::Punct(b')')) => pos += 1,
        _ => {
            return Err(CppError::ArityMismatch {
                name: String::new(),
            })
        }
    }

    Ok((args, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::Interner;
    use crate::tokenizer::tokenize_str;

    fn toks(src: &str, interner: &mut Interner) -> TokenArray {
        tokenize_str(src, interner)
    }

    #[test]
    fn single_argument() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let stream = toks("1)", &mut interner);
        let (args, end) = read_arguments(&stream, 0, 1, &mut pool).unwrap();
        assert_eq!(args.len(), 1);
        assert_eq!(end, stream.len());
    }

    #[test]
    fn two_arguments_with_nested_parens() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let stream = toks("(1,2),3)", &mut interner);
        let (args, end) = read_arguments(&stream, 0, 2, &mut pool).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].len(), 5); // ( 1 , 2 )
        assert_eq!(args[1].len(), 1); // 3
        assert_eq!(end, stream.len());
    }

    #[test]
    fn empty_argument_is_empty_arg_sentinel() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let stream = toks(",)", &mut interner);
        let (args, _) = read_arguments(&stream, 0, 2, &mut pool).unwrap();
        assert_eq!(args[0].len(), 1);
        assert_eq!(args[0][0].kind, TokenKind::EmptyArg);
        assert_eq!(args[1][0].kind, TokenKind::EmptyArg);
    }

    #[test]
    fn too_few_arguments_is_fatal() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let stream = toks("1)", &mut interner);
        let result = read_arguments(&stream, 0, 2, &mut pool);
        assert!(matches!(result, Err(CppError::ArityMismatch { .. })));
    }

    #[test]
    fn newline_mid_argument_is_fatal() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let stream = toks("1\n,2)", &mut interner);
        let result = read_arguments(&stream, 0, 2, &mut pool);
        assert!(matches!(result, Err(CppError::UnterminatedArgumentList)));
    }

    #[test]
    fn zero_params_consumes_to_close_paren() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let stream = toks(")", &mut interner);
        let (args, end) = read_arguments(&stream, 0, 0, &mut pool).unwrap();
        assert!(args.is_empty());
        assert_eq!(end, 1);
    }

    #[test]
    fn zero_params_with_argument_text_is_fatal() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let stream = toks("x)", &mut interner);
        let result = read_arguments(&stream, 0, 0, &mut pool);
        assert!(matches!(result, Err(CppError::ArityMismatch { .. })));
    }
}
