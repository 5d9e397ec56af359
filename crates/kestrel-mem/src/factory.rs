//! Construction of fresh arenas with a configured chunk size.
//!
//! A factory does not pool or reuse arenas. Each call to
//! [`ArenaFactory::create_arena`] returns a brand-new [`Arena`], and memory is
//! reclaimed when that arena is dropped.
//!
//! ```
//! use kestrel_mem::ArenaFactory;
//!
//! let factory = ArenaFactory::new(64 * 1024);
//! let arena = factory.create_arena();
//!
//! assert_eq!(*arena.alloc(42u32), 42);
//! assert_eq!(arena.stats().total_capacity, 64 * 1024);
//! ```

use crate::arena::{Arena, DEFAULT_CHUNK_SIZE};

/// Creates [`Arena`]s that share one initial chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaFactory {
    chunk_size: usize,
}

impl ArenaFactory {
    /// Creates a factory for arenas whose first chunk holds `chunk_size`
    /// bytes, subject to the arena's 8 KiB..=1 MiB clamp and power-of-two rounding.
    #[must_use]
    pub const fn new(chunk_size: usize) -> Self {
        ArenaFactory { chunk_size }
    }

    /// Creates a new, empty arena.
    #[must_use]
    pub fn create_arena(&self) -> Arena {
        Arena::new(self.chunk_size)
    }

    /// Returns the configured chunk size.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for ArenaFactory {
    fn default() -> Self {
        ArenaFactory::new(DEFAULT_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_default() {
        let factory = ArenaFactory::default();
        assert_eq!(factory.chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_factory_arenas_are_independent() {
        let factory = ArenaFactory::new(16 * 1024);
        let a = factory.create_arena();
        let b = factory.create_arena();

        for i in 0..100u64 {
            a.alloc(i);
        }

        assert_eq!(a.stats().total_allocated, 800);
        assert_eq!(b.stats().total_allocated, 0);
        assert_eq!(b.stats().total_capacity, 16 * 1024);
    }
}
