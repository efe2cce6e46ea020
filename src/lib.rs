//! A C preprocessor macro expansion engine.
//!
//! The engine is organized as a set of small collaborators bundled behind
//! [`context::Context`]: an [`intern::Interner`] for symbol handles, a
//! [`token::Token`] representation, a [`pool::TokenArrayPool`] for reusing
//! token-array storage, a [`macro_table::MacroTable`], an argument reader
//! ([`args`]), a stringifier ([`stringify`]), a paste operator ([`paste`]),
//! a substituter ([`substitute`]) and a rewriter ([`rewrite`]) that drives
//! repeated substitution to a fixed point.
//!
//! `Context` is threaded explicitly through every recursive call rather
//! than reached for through a lock or `static mut` on every lookup —
//! Rewriter calls Substituter which calls Rewriter again for rescanning,
//! and that recursion all happens with a single `&mut Context` borrow.
//! This module layers a `thread_local!` convenience wrapper on top, for
//! callers that want the free-function call shape instead of owning a
//! `Context` themselves. The free functions below only ever borrow the
//! thread-local cell at their own outermost scope; they never re-enter it
//! from within a call already holding the borrow.

#![allow(dead_code)]

use std::cell::RefCell;

pub mod args;
pub mod builtins;
pub mod cmp;
pub mod context;
pub mod diagnostics;
pub mod intern;
pub mod macro_table;
pub mod paste;
pub mod pool;
pub mod rewrite;
pub mod stringify;
pub mod substitute;
pub mod token;
pub mod tokenizer;

pub use cmp::tok_cmp as tok_cmp_raw;
pub use context::{CStandard, Context, EngineConfig, LexerState};
pub use diagnostics::{report_fatal, CppError};
pub use intern::Symbol;
pub use macro_table::{Macro, MacroKind};
pub use pool::TokenArray;
pub use token::{NumberValue, Payload, Token, TokenKind};

thread_local! {
    static CONTEXT: RefCell<Context> = RefCell::new(Context::new());
}

/// Interns `s` in the thread-local context, returning its `Symbol`.
pub fn intern(s: &str) -> Symbol {
    CONTEXT.with(|c| c.borrow_mut().interner.intern(s))
}

/// Sets the source position used to refresh `__FILE__`/`__LINE__`.
pub fn set_position(file: &str, line: i32) {
    CONTEXT.with(|c| c.borrow_mut().set_position(file, line));
}

/// Registers (or re-registers) `m`, per §4.I's redefinition rules.
pub fn define(m: Macro) -> Result<(), CppError> {
    CONTEXT.with(|c| c.borrow_mut().define(m))
}

/// Removes a macro definition, if any.
pub fn undef(name: Symbol) {
    CONTEXT.with(|c| c.borrow_mut().undef(name));
}

/// Looks up `name`'s current definition, dynamically refreshing
/// `__FILE__`/`__LINE__` first if `name` is one of them.
///
/// Returns an owned clone rather than the `&Macro` the distilled spec's
/// §6 calls for: the thread-local `RefCell` accessor can't hand back a
/// reference that outlives the borrow taken inside `with`. Code holding
/// a `Context` directly can still call [`Context::definition`] for the
/// borrowed form.
pub fn definition(name: Symbol) -> Option<Macro> {
    CONTEXT.with(|c| c.borrow_mut().definition(name).cloned())
}

/// Fully expands `list` in place.
pub fn expand(list: &mut TokenArray) -> Result<(), CppError> {
    CONTEXT.with(|c| rewrite::expand(&mut c.borrow_mut(), list))
}

/// Turns an argument's token sequence into a single `STRING` token, per the
/// `#` operator's rules — the entry point a driver's own `#error`/`#pragma`
/// message formatting would use without reaching into `Context` directly.
pub fn stringify(arg: &[Token]) -> Token {
    CONTEXT.with(|c| self::stringify::stringify(arg, &mut c.borrow_mut().interner))
}

/// Resets the thread-local context's definitions back to the builtins for
/// `config`, discarding every user definition made so far.
pub fn register_builtin_definitions(config: EngineConfig) {
    CONTEXT.with(|c| c.borrow_mut().reset(config));
}

pub fn get_token_array() -> TokenArray {
    CONTEXT.with(|c| c.borrow_mut().get_token_array())
}

pub fn release_token_array(a: TokenArray) {
    CONTEXT.with(|c| c.borrow_mut().release_token_array(a));
}

/// Three-way comparison of two tokens per §4.J's macro-equivalence rules.
pub fn tok_cmp(a: &Token, b: &Token) -> i32 {
    cmp::tok_cmp(a, b)
}
