//! The compilation-unit context.
//!
//! [`AstContext`] owns the arena every node, type and declaration lives in,
//! plus the identifier interner. It is passed explicitly to every
//! construction operation; nothing allocates through ambient state.
//!
//! ```
//! use kestrel_ast::AstContext;
//!
//! let ctx = AstContext::new();
//! let name = ctx.intern("velocity");
//!
//! assert_eq!(ctx.intern("velocity"), name);
//! assert_eq!(ctx.resolve(name).as_deref(), Some("velocity"));
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::ptr::NonNull;

use kestrel_log::debug;
use kestrel_mem::{Arena, ArenaFactory, ArenaStats, StringInterner, Symbol};

use crate::config::AstConfig;
use crate::types::{FloatKind, TupleTypeElt, Type, TypeBase};

static DEPENDENT_TYPE: TypeBase<'static> = TypeBase::UnstructuredDependent;
static ERROR_TYPE: TypeBase<'static> = TypeBase::Error;

/// Owner of all AST memory for one compilation unit.
///
/// References handed out by the context borrow it, so no node can outlive
/// the arena it was allocated in.
pub struct AstContext {
    arena: Arena,
    interner: RefCell<StringInterner>,
    config: AstConfig,
}

impl AstContext {
    pub fn new() -> Self {
        Self::with_config(AstConfig::default())
    }

    pub fn with_config(config: AstConfig) -> Self {
        let arena = ArenaFactory::new(config.arena_chunk_size).create_arena();
        debug!(
            "created AST context ({} byte arena, dump indent {})",
            arena.stats().total_capacity,
            config.dump_indent
        );

        AstContext {
            arena,
            interner: RefCell::new(StringInterner::new()),
            config,
        }
    }

    pub fn config(&self) -> &AstConfig {
        &self.config
    }

    // ===== Allocation =====

    /// Moves `value` into the arena.
    pub fn alloc<T>(&self, value: T) -> &T {
        self.arena.alloc(value)
    }

    /// Reserves `size` bytes aligned to `align`.
    pub fn allocate(&self, size: usize, align: usize) -> NonNull<u8> {
        self.arena.alloc_raw(size, align)
    }

    /// Copies `items` into the arena.
    pub fn allocate_copy<T: Copy>(&self, items: &[T]) -> &[T] {
        self.arena.alloc_slice_copy(items)
    }

    pub fn alloc_str(&self, s: &str) -> &str {
        self.arena.alloc_str(s)
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    // ===== Identifiers =====

    pub fn intern(&self, s: &str) -> Symbol {
        self.interner.borrow_mut().intern(s)
    }

    /// Returns the text of `sym`.
    ///
    /// The returned guard borrows the interner; drop it before interning.
    pub fn resolve(&self, sym: Symbol) -> Option<Ref<'_, str>> {
        Ref::filter_map(self.interner.borrow(), |interner| interner.resolve(sym)).ok()
    }

    // ===== Types =====

    /// # Panics
    ///
    /// Panics if `bit_width` is zero.
    pub fn builtin_integer_type(&self, bit_width: u32) -> Type<'_> {
        assert!(bit_width > 0, "builtin integer types need a non-zero width");
        self.alloc(TypeBase::BuiltinInteger { bit_width })
    }

    pub fn builtin_float_type(&self, kind: FloatKind) -> Type<'_> {
        self.alloc(TypeBase::BuiltinFloat(kind))
    }

    pub fn tuple_type<'a>(&'a self, elements: &[TupleTypeElt<'a>]) -> Type<'a> {
        let elements = self.allocate_copy(elements);
        self.alloc(TypeBase::Tuple(elements))
    }

    pub fn function_type<'a>(&'a self, input: Type<'a>, result: Type<'a>) -> Type<'a> {
        self.alloc(TypeBase::Function { input, result })
    }

    pub fn metatype<'a>(&'a self, instance: Type<'a>) -> Type<'a> {
        self.alloc(TypeBase::MetaType { instance })
    }

    pub fn nominal_type(&self, name: &str) -> Type<'_> {
        let name = self.intern(name);
        self.alloc(TypeBase::Nominal { name })
    }

    pub fn lvalue_type<'a>(&'a self, object: Type<'a>) -> Type<'a> {
        self.alloc(TypeBase::LValue { object })
    }

    pub fn module_type(&self, name: &str) -> Type<'_> {
        let name = self.intern(name);
        self.alloc(TypeBase::Module { name })
    }

    /// The shared placeholder type of still-overloaded references.
    pub fn dependent_type(&self) -> Type<'_> {
        &DEPENDENT_TYPE
    }

    pub fn error_type(&self) -> Type<'_> {
        &ERROR_TYPE
    }
}

impl Default for AstContext {
    fn default() -> Self {
        AstContext::new()
    }
}

impl fmt::Debug for AstContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstContext")
            .field("arena", &self.arena)
            .field("symbols", &self.interner.borrow().len())
            .field("config", &self.config)
            .finish()
    }
}
