//! MacroTable (component B): name → definition store with insert/lookup/
//! remove and the redefinition check mandated by invariant 5 in §3.

use std::collections::HashMap;

use crate::cmp::macro_eq;
use crate::diagnostics::CppError;
use crate::intern::{Interner, Symbol};
use crate::pool::{TokenArray, TokenArrayPool};
use crate::token::{Payload, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    ObjectLike,
    FunctionLike,
}

#[derive(Debug, Clone)]
pub struct Macro {
    pub name: Symbol,
    pub kind: MacroKind,
    pub params: u32,
    pub replacement: TokenArray,
    pub stringify: bool,
    pub is_file: bool,
    pub is_line: bool,
}

impl Macro {
    pub fn new(name: Symbol, kind: MacroKind, params: u32, replacement: TokenArray) -> Macro {
        let stringify = replacement.windows(2).any(|w| {
            w[0].kind == TokenKind::Punct(b'#') && w[1].kind == TokenKind::Param
        });
        Macro {
            name,
            kind,
            params,
            replacement,
            stringify,
            is_file: false,
            is_line: false,
        }
    }

    /// Marks this definition as the dynamically-refreshed `__FILE__` or
    /// `__LINE__` builtin. Exactly one of the two flags should ever be set;
    /// callers (builtins bootstrap only) are responsible for that.
    pub fn mark_builtin_file(mut self) -> Macro {
        self.is_file = true;
        self
    }

    pub fn mark_builtin_line(mut self) -> Macro {
        self.is_line = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct MacroTable {
    entries: HashMap<Symbol, Macro>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn lookup(&self, name: Symbol) -> Option<&Macro> {
        self.entries.get(&name)
    }

    pub fn lookup_mut(&mut self, name: Symbol) -> Option<&mut Macro> {
        self.entries.get_mut(&name)
    }

    /// Inserts `m`. If a definition by the same name already exists and is
    /// byte-equal to `m`, `m`'s replacement is pooled and the existing
    /// definition is kept (invariant 5's redefinition-is-a-no-op case). If
    /// it exists and differs, `m`'s replacement is pooled and a
    /// `Redefinition` error is returned — the table is left untouched.
    pub fn insert(
        &mut self,
        m: Macro,
        pool: &mut TokenArrayPool,
        interner: &Interner,
    ) -> Result<(), CppError> {
        if let Some(existing) = self.entries.get(&m.name) {
            if macro_eq(existing, &m) {
                pool.release(m.replacement);
                return Ok(());
            }
            let name = interner.resolve(m.name).to_string();
            pool.release(m.replacement);
            return Err(CppError::Redefinition { name });
        }
        self.entries.insert(m.name, m);
        Ok(())
    }

    pub fn remove(&mut self, name: Symbol, pool: &mut TokenArrayPool) {
        if let Some(m) = self.entries.remove(&name) {
            pool.release(m.replacement);
        }
    }

    pub fn destroy(self, pool: &mut TokenArrayPool) {
        for (_, m) in self.entries {
            pool.release(m.replacement);
        }
    }
}

/// Every `PARAM` token's payload must be `< params` (invariant 1); checked
/// once at construction time by callers that build replacement lists from
/// untrusted text (the directive layer, in a full compiler). Exposed here
/// so tests and the builtins bootstrap can assert it holds.
pub fn params_well_formed(replacement: &TokenArray, params: u32) -> bool {
    replacement.iter().all(|t| match t.payload {
        Payload::Param(p) => p < params,
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn table_with_one(interner: &mut Interner, pool: &mut TokenArrayPool) -> (MacroTable, Symbol) {
        let mut table = MacroTable::new();
        let name = interner.intern("A");
        let lit = interner.intern("1");
        let mut body = pool.acquire();
        body.push(Token::prep_number(lit));
        table
            .insert(Macro::new(name, MacroKind::ObjectLike, 0, body), pool, interner)
            .unwrap();
        (table, name)
    }

    #[test]
    fn redefinition_with_identical_body_is_a_no_op() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let (mut table, name) = table_with_one(&mut interner, &mut pool);

        let lit = interner.intern("1");
        let mut body = pool.acquire();
        body.push(Token::prep_number(lit));
        let result = table.insert(Macro::new(name, MacroKind::ObjectLike, 0, body), &mut pool, &interner);
        assert!(result.is_ok());
        assert_eq!(table.lookup(name).unwrap().replacement.len(), 1);
    }

    #[test]
    fn redefinition_with_different_body_is_fatal() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let (mut table, name) = table_with_one(&mut interner, &mut pool);

        let lit = interner.intern("2");
        let mut body = pool.acquire();
        body.push(Token::prep_number(lit));
        let result = table.insert(Macro::new(name, MacroKind::ObjectLike, 0, body), &mut pool, &interner);
        assert!(matches!(result, Err(CppError::Redefinition { .. })));
    }

    #[test]
    fn remove_pools_the_replacement() {
        let mut interner = Interner::new();
        let mut pool = TokenArrayPool::new();
        let (mut table, name) = table_with_one(&mut interner, &mut pool);
        table.remove(name, &mut pool);
        assert!(table.lookup(name).is_none());
        assert_eq!(pool.cached(), 1);
    }

    #[test]
    fn params_well_formed_rejects_out_of_range_index() {
        let mut arr = TokenArray::new();
        arr.push(Token::param(2));
        assert!(!params_well_formed(&arr, 2));
        assert!(params_well_formed(&arr, 3));
    }
}
