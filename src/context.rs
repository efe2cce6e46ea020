//! Lifecycle (component I) and the process-wide state bundle.
//!
//! Per the distilled spec's Design Notes, the MacroTable, TokenArrayPool,
//! and disabling stack are process-wide by source construction; here
//! they're bundled behind a single owning `Context` value that's threaded
//! explicitly through every recursive call, rather than reached for
//! through a lock or `static mut` on every lookup. `lib.rs` layers a
//! thread-local convenience wrapper on top for callers that want the
//! free-function call shape from §6.

use crate::builtins;
use crate::diagnostics::CppError;
use crate::intern::{Interner, Symbol};
use crate::macro_table::{Macro, MacroTable};
use crate::pool::{TokenArray, TokenArrayPool};
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CStandard {
    C89,
    C99,
}

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub standard: CStandard,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            standard: CStandard::C99,
        }
    }
}

#[derive(Debug)]
pub struct LexerState {
    pub current_file: Symbol,
    pub current_line: i32,
}

pub struct Context {
    pub interner: Interner,
    pub table: MacroTable,
    pub pool: TokenArrayPool,
    pub lexer: LexerState,
    disabling: Vec<Symbol>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut interner = Interner::new();
        let current_file = interner.intern("");
        let mut ctx = Context {
            interner,
            table: MacroTable::new(),
            pool: TokenArrayPool::new(),
            lexer: LexerState {
                current_file,
                current_line: 0,
            },
            disabling: Vec::new(),
        };
        builtins::register_builtin_definitions(&mut ctx, config);
        ctx
    }

    /// Sets the source position used to refresh `__FILE__`/`__LINE__` on
    /// their next lookup (§4.H). Stands in for the external lexer
    /// collaborator that would drive this in a full compiler.
    pub fn set_position(&mut self, file: &str, line: i32) {
        self.lexer.current_file = self.interner.intern(file);
        self.lexer.current_line = line;
    }

    pub fn is_disabled(&self, name: Symbol) -> bool {
        self.disabling.contains(&name)
    }

    pub fn push_disabled(&mut self, name: Symbol) {
        self.disabling.push(name);
    }

    pub fn pop_disabled(&mut self) {
        self.disabling.pop();
    }

    /// True once `expand` has returned to its outermost caller — used by
    /// tests asserting the "no leftover disabling state" invariant.
    pub fn disabling_stack_is_empty(&self) -> bool {
        self.disabling.is_empty()
    }

    /// Looks up `name`, dynamically refreshing `__FILE__`/`__LINE__`'s
    /// first replacement token first if this is one of them (§4.H) — the
    /// engine's public `definition` entry point.
    pub fn definition(&mut self, name: Symbol) -> Option<&Macro> {
        if let Some(m) = self.table.lookup_mut(name) {
            if m.is_file {
                let path_text = self.interner.resolve(self.lexer.current_file).to_string();
                let sym = self.interner.intern(&path_text);
                m.replacement[0] = Token::string(sym);
            } else if m.is_line {
                let line_text = self.lexer.current_line.to_string();
                let sym = self.interner.intern(&line_text);
                m.replacement[0] = Token::prep_number(sym);
            }
        }
        self.table.lookup(name)
    }

    pub fn define(&mut self, m: Macro) -> Result<(), CppError> {
        self.table.insert(m, &mut self.pool, &self.interner)
    }

    pub fn undef(&mut self, name: Symbol) {
        self.table.remove(name, &mut self.pool);
    }

    pub fn get_token_array(&mut self) -> TokenArray {
        self.pool.acquire()
    }

    pub fn release_token_array(&mut self, a: TokenArray) {
        self.pool.release(a);
    }

    /// Discards every user definition and restores a pristine builtin-only
    /// table for `config`, without replacing the pool (so its recycled
    /// storage survives across test cases that reset between them).
    pub fn reset(&mut self, config: EngineConfig) {
        let table = std::mem::take(&mut self.table);
        table.destroy(&mut self.pool);
        self.disabling.clear();
        self.lexer.current_line = 0;
        self.lexer.current_file = self.interner.intern("");
        builtins::register_builtin_definitions(self, config);
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let table = std::mem::take(&mut self.table);
        table.destroy(&mut self.pool);
    }
}
