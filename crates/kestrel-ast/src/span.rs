//! Source location tracking for AST nodes.
//!
//! A [`SourceLoc`] is a byte offset into the compilation unit. Nodes that
//! were synthesized by the compiler rather than written by the user carry
//! [`SourceLoc::INVALID`], which is how implicitness is detected.
//!
//! # Examples
//!
//! ```
//! use kestrel_ast::span::{SourceLoc, SourceRange};
//!
//! let lhs = SourceRange::new(SourceLoc::new(4), SourceLoc::new(9));
//! let rhs = SourceRange::point(SourceLoc::new(14));
//! let merged = SourceRange::merge(lhs, rhs);
//!
//! assert_eq!(merged.start, SourceLoc::new(4));
//! assert_eq!(merged.end, SourceLoc::new(14));
//! assert!(!SourceLoc::INVALID.is_valid());
//! ```

use std::fmt;

/// A byte offset into the source, or the invalid location.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLoc(u32);

impl SourceLoc {
    /// Location of nodes that have no source text.
    pub const INVALID: SourceLoc = SourceLoc(u32::MAX);

    /// Creates a location at byte `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is `u32::MAX`, which is reserved for
    /// [`SourceLoc::INVALID`].
    #[must_use]
    pub const fn new(offset: u32) -> Self {
        assert!(offset != u32::MAX, "u32::MAX is reserved for the invalid location");
        SourceLoc(offset)
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Returns the byte offset, or `None` for the invalid location.
    #[must_use]
    pub const fn offset(self) -> Option<u32> {
        if self.is_valid() { Some(self.0) } else { None }
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        SourceLoc::INVALID
    }
}

impl fmt::Debug for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "SourceLoc({offset})"),
            None => f.write_str("SourceLoc(<invalid>)"),
        }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "{offset}"),
            None => f.write_str("<invalid>"),
        }
    }
}

/// An inclusive pair of token locations.
///
/// `end` is the location of the last token, not one past it, so a node made
/// of a single token has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub start: SourceLoc,
    pub end: SourceLoc,
}

impl SourceRange {
    pub const INVALID: SourceRange = SourceRange {
        start: SourceLoc::INVALID,
        end: SourceLoc::INVALID,
    };

    #[must_use]
    pub const fn new(start: SourceLoc, end: SourceLoc) -> Self {
        SourceRange { start, end }
    }

    /// A range covering a single token.
    #[must_use]
    pub const fn point(loc: SourceLoc) -> Self {
        SourceRange { start: loc, end: loc }
    }

    /// Covers `left` through `right`.
    #[must_use]
    pub const fn merge(left: SourceRange, right: SourceRange) -> Self {
        SourceRange {
            start: left.start,
            end: right.end,
        }
    }

    /// Returns `true` if both ends are valid locations.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Anything that occupies a range of source text.
pub trait Spanned {
    fn source_range(&self) -> SourceRange;

    fn start_loc(&self) -> SourceLoc {
        self.source_range().start
    }

    fn end_loc(&self) -> SourceLoc {
        self.source_range().end
    }
}

impl Spanned for SourceRange {
    fn source_range(&self) -> SourceRange {
        *self
    }
}
