//! Bump arena for compiler frontend data.
//!
//! An [`Arena`] owns a list of chunks obtained from the system allocator and
//! hands out memory by advancing a bump pointer through the newest chunk.
//! Allocation takes `&self`, so references returned from the arena may be
//! held for the arena's whole lifetime while further allocations happen.
//! Nothing is freed individually: every chunk is released when the arena is
//! dropped, and no destructor of an arena-allocated value ever runs.
//!
//! # Example
//!
//! ```
//! use kestrel_mem::Arena;
//!
//! let arena = Arena::new(8192);
//!
//! let a = arena.alloc(42u32);
//! let b = arena.alloc_slice_copy(&[1u64, 2, 3]);
//! let s = arena.alloc_str("identifier");
//!
//! assert_eq!(*a, 42);
//! assert_eq!(b, &[1, 2, 3]);
//! assert_eq!(s, "identifier");
//! assert_eq!(arena.stats().chunk_count, 1);
//! ```

use std::alloc::{self, Layout};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

/// Error returned when the system allocator cannot provide a new chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("arena allocation failed: out of memory")]
pub struct ArenaAllocError;

/// Alignment of every chunk's base address.
const CHUNK_ALIGNMENT: usize = 16;

/// Minimum chunk size (8 KiB).
const MIN_CHUNK_SIZE: usize = 8192;

/// Chunks stop doubling once they reach 1 MiB. Also the largest first chunk.
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Chunk size used when the caller has no preference.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Arena allocation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaStats {
    /// Bytes requested by callers, excluding alignment padding.
    pub total_allocated: usize,
    /// Number of chunks in the arena.
    pub chunk_count: usize,
    /// Total capacity of all chunks in bytes.
    pub total_capacity: usize,
}

/// A block of memory owned by an arena.
struct Chunk {
    start: NonNull<u8>,
    capacity: usize,
}

impl Chunk {
    fn new(capacity: usize) -> Result<Self, ArenaAllocError> {
        let layout = Layout::from_size_align(capacity, CHUNK_ALIGNMENT).map_err(|_| ArenaAllocError)?;

        // SAFETY: capacity is at least MIN_CHUNK_SIZE, so the layout is non-zero.
        let start = unsafe { alloc::alloc(layout) };
        let start = NonNull::new(start).ok_or(ArenaAllocError)?;

        Ok(Chunk { start, capacity })
    }

    fn start(&self) -> *mut u8 {
        self.start.as_ptr()
    }

    fn end(&self) -> *mut u8 {
        self.start.as_ptr().wrapping_add(self.capacity)
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        // SAFETY: this exact layout was validated and allocated in `Chunk::new`.
        unsafe {
            let layout = Layout::from_size_align_unchecked(self.capacity, CHUNK_ALIGNMENT);
            alloc::dealloc(self.start.as_ptr(), layout);
        }
    }
}

/// Single-threaded bump arena.
///
/// Values are allocated with [`Arena::alloc`] and friends and live exactly as
/// long as the arena. Types with drop glue are rejected at compile time, since
/// the arena never runs destructors.
///
/// `Arena` is neither `Send` nor `Sync`.
pub struct Arena {
    chunks: RefCell<Vec<Chunk>>,
    /// Bump pointer into the newest chunk.
    ptr: Cell<*mut u8>,
    /// One past the end of the newest chunk.
    end: Cell<*mut u8>,
    /// Capacity of the first chunk.
    initial_size: usize,
    total_allocated: Cell<usize>,
}

impl Arena {
    /// Creates an arena whose first chunk holds at least `initial_size` bytes.
    ///
    /// The size is clamped to the 8 KiB..=1 MiB range and rounded up to a
    /// power of two.
    pub fn new(initial_size: usize) -> Self {
        let initial_size = initial_size
            .clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
            .checked_next_power_of_two()
            .unwrap_or(MAX_CHUNK_SIZE);
        let arena = Arena {
            chunks: RefCell::new(Vec::new()),
            ptr: Cell::new(ptr::null_mut()),
            end: Cell::new(ptr::null_mut()),
            initial_size,
            total_allocated: Cell::new(0),
        };

        if arena.grow(0, 1).is_err() {
            out_of_memory(initial_size, CHUNK_ALIGNMENT);
        }
        arena
    }

    /// Moves `value` into the arena and returns a reference to it.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        const { assert!(!mem::needs_drop::<T>(), "arena values never have their destructors run") };

        let ptr = self.alloc_raw(mem::size_of::<T>(), mem::align_of::<T>()).cast::<T>();

        // SAFETY: ptr is fresh, aligned for T, valid for size_of::<T>() bytes
        // and disjoint from every other allocation; the chunk lives as long as self.
        unsafe {
            ptr.as_ptr().write(value);
            &mut *ptr.as_ptr()
        }
    }

    /// Copies `src` into the arena.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> &mut [T] {
        if src.is_empty() {
            return Default::default();
        }

        let dst = self.alloc_raw(mem::size_of_val(src), mem::align_of::<T>()).cast::<T>();

        // SAFETY: dst is fresh, aligned for T and sized for src.len() elements.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), src.len());
            slice::from_raw_parts_mut(dst.as_ptr(), src.len())
        }
    }

    /// Copies `s` into the arena.
    pub fn alloc_str(&self, s: &str) -> &str {
        let bytes = self.alloc_slice_copy(s.as_bytes());

        // SAFETY: the bytes were copied verbatim from a valid `str`.
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    /// Reserves `size` bytes aligned to `align`.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two. Aborts through
    /// [`std::alloc::handle_alloc_error`] if the system is out of memory.
    pub fn alloc_raw(&self, size: usize, align: usize) -> NonNull<u8> {
        match self.try_alloc_raw(size, align) {
            Ok(ptr) => ptr,
            Err(ArenaAllocError) => out_of_memory(size, align),
        }
    }

    /// Reserves `size` bytes aligned to `align`, reporting allocator failure.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two.
    pub fn try_alloc_raw(&self, size: usize, align: usize) -> Result<NonNull<u8>, ArenaAllocError> {
        assert!(align.is_power_of_two(), "arena alignment must be a power of two, got {align}");

        loop {
            if let Some(ptr) = self.bump(size, align) {
                self.total_allocated.set(self.total_allocated.get() + size);
                return Ok(ptr);
            }
            self.grow(size, align)?;
        }
    }

    /// Returns allocation statistics for this arena.
    pub fn stats(&self) -> ArenaStats {
        let chunks = self.chunks.borrow();
        ArenaStats {
            total_allocated: self.total_allocated.get(),
            chunk_count: chunks.len(),
            total_capacity: chunks.iter().map(|c| c.capacity).sum(),
        }
    }

    #[inline]
    fn bump(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let current = self.ptr.get();
        let aligned = current.addr().checked_add(align - 1)? & !(align - 1);
        let new_addr = aligned.checked_add(size)?;

        if new_addr > self.end.get().addr() {
            return None;
        }

        self.ptr.set(current.with_addr(new_addr));
        NonNull::new(current.with_addr(aligned))
    }

    #[cold]
    fn grow(&self, size: usize, align: usize) -> Result<(), ArenaAllocError> {
        let mut chunks = self.chunks.borrow_mut();
        let required = size.checked_add(align).ok_or(ArenaAllocError)?;
        let capacity = match chunks.last() {
            Some(last) => last.capacity.saturating_mul(2).min(MAX_CHUNK_SIZE),
            None => self.initial_size,
        }
        .max(required);

        let chunk = Chunk::new(capacity)?;
        kestrel_log::debug!(
            "arena grows to {} chunks (+{} bytes for a {}-byte request)",
            chunks.len() + 1,
            capacity,
            size
        );

        self.ptr.set(chunk.start());
        self.end.set(chunk.end());
        chunks.push(chunk);
        Ok(())
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new(DEFAULT_CHUNK_SIZE)
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena").field("stats", &self.stats()).finish()
    }
}

#[cold]
fn out_of_memory(size: usize, align: usize) -> ! {
    match Layout::from_size_align(size.max(1), align) {
        Ok(layout) => alloc::handle_alloc_error(layout),
        Err(_) => panic!("arena request of {size} bytes with alignment {align} is not a valid layout"),
    }
}
