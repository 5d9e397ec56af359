//! Memory management for the Kestrel compiler frontend.
//!
//! - [`arena`]: bump allocation scoped to one compilation unit
//! - [`factory`]: configured construction of fresh arenas
//! - [`interner`]: dense [`Symbol`] ids for identifier text

pub mod arena;
pub mod factory;
pub mod interner;

pub use arena::{Arena, ArenaAllocError, ArenaStats, MAX_CHUNK_SIZE};
pub use factory::ArenaFactory;
pub use interner::{StringInterner, Symbol};
