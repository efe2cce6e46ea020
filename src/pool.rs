//! TokenArrayPool (component A): recycles growable token buffers so the
//! rewriter and substituter don't pay an allocation on every splice.

use crate::token::Token;

pub type TokenArray = Vec<Token>;

#[derive(Debug, Default)]
pub struct TokenArrayPool {
    free: Vec<TokenArray>,
}

impl TokenArrayPool {
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    pub fn acquire(&mut self) -> TokenArray {
        self.free.pop().unwrap_or_default()
    }

    pub fn release(&mut self, mut array: TokenArray) {
        array.clear();
        self.free.push(array);
    }

    pub fn cached(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_then_acquire_reuses_storage() {
        let mut pool = TokenArrayPool::new();
        let mut a = pool.acquire();
        a.push(Token::end());
        let cap = a.capacity();
        pool.release(a);
        assert_eq!(pool.cached(), 1);

        let b = pool.acquire();
        assert!(b.is_empty());
        assert!(b.capacity() >= cap);
        assert_eq!(pool.cached(), 0);
    }

    #[test]
    fn acquire_on_empty_pool_allocates() {
        let mut pool = TokenArrayPool::new();
        let a = pool.acquire();
        assert!(a.is_empty());
    }
}
