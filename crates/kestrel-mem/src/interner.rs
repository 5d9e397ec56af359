//! Identifier interning.
//!
//! [`StringInterner`] maps each distinct string to a dense [`Symbol`] id, in
//! first-interned order starting from zero. The text lives in an arena owned
//! by the interner, so each string is copied exactly once.
//!
//! ```
//! use kestrel_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//! let a = interner.intern("radius");
//! let b = interner.intern("radius");
//! let c = interner.intern("area");
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(interner.resolve(c), Some("area"));
//! ```

use std::fmt;

use hashbrown::HashMap;

use crate::arena::Arena;

/// An interned string id.
///
/// Symbols compare and hash by id; they only mean something together with
/// the interner that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Symbol(id)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional string <-> [`Symbol`] table.
pub struct StringInterner {
    arena: Arena,
    /// Indexed by symbol id.
    strings: Vec<&'static str>,
    symbols: HashMap<&'static str, Symbol>,
}

impl StringInterner {
    #[must_use]
    pub fn new() -> Self {
        StringInterner {
            arena: Arena::default(),
            strings: Vec::new(),
            symbols: HashMap::new(),
        }
    }

    /// Returns the symbol for `s`, interning it on first use.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.symbols.get(s) {
            return sym;
        }

        let id = u32::try_from(self.strings.len()).unwrap_or_else(|_| panic!("symbol table overflow"));
        let sym = Symbol::new(id);

        // SAFETY: the text lives in `self.arena`, which is never reset and is
        // dropped together with the maps that borrow from it. The `'static`
        // lifetime never escapes: `resolve` reborrows for `&self`.
        let text: &'static str = unsafe { &*std::ptr::from_ref::<str>(self.arena.alloc_str(s)) };

        self.strings.push(text);
        self.symbols.insert(text, sym);
        kestrel_log::trace!("interned {:?} as {}", text, sym);
        sym
    }

    /// Returns the symbol for `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.symbols.get(s).copied()
    }

    /// Returns the text of `sym`, or `None` if this interner never produced it.
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.as_usize()).copied()
    }

    /// Returns the number of distinct strings interned.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        StringInterner::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .field("arena", &self.arena)
            .finish()
    }
}
