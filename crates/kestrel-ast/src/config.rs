//! Context configuration.

use kestrel_log::warn;
use kestrel_mem::MAX_CHUNK_SIZE;

/// Environment variable overriding [`AstConfig::arena_chunk_size`].
pub const ARENA_CHUNK_SIZE_ENV: &str = "KESTREL_ARENA_CHUNK_SIZE";

/// Environment variable overriding [`AstConfig::dump_indent`].
pub const DUMP_INDENT_ENV: &str = "KESTREL_DUMP_INDENT";

/// Tunables for an [`AstContext`](crate::AstContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstConfig {
    /// Size of the first arena chunk, in bytes.
    pub arena_chunk_size: usize,
    /// Spaces added per nesting level when dumping trees.
    pub dump_indent: usize,
}

impl Default for AstConfig {
    fn default() -> Self {
        AstConfig {
            arena_chunk_size: 8192,
            dump_indent: 2,
        }
    }
}

impl AstConfig {
    /// Reads overrides from the process environment.
    ///
    /// Unset variables keep their defaults. Unparsable values, and chunk
    /// sizes above the arena's 1 MiB chunk limit, are reported with a
    /// warning and also keep their defaults.
    ///
    /// Also applies `KESTREL_LOG` to the global log level.
    pub fn from_env() -> Self {
        if let Err(err) = kestrel_log::init_from_default_env() {
            warn!("ignoring {}: {}", kestrel_log::DEFAULT_ENV_VAR, err);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// ```
    /// use kestrel_ast::AstConfig;
    ///
    /// let config = AstConfig::from_lookup(|name| match name {
    ///     "KESTREL_DUMP_INDENT" => Some("4".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.dump_indent, 4);
    /// assert_eq!(config.arena_chunk_size, AstConfig::default().arena_chunk_size);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AstConfig::default();
        AstConfig {
            arena_chunk_size: parse_var(&lookup, ARENA_CHUNK_SIZE_ENV, MAX_CHUNK_SIZE, defaults.arena_chunk_size),
            dump_indent: parse_var(&lookup, DUMP_INDENT_ENV, MAX_DUMP_INDENT, defaults.dump_indent),
        }
    }

    #[must_use]
    pub fn with_arena_chunk_size(mut self, bytes: usize) -> Self {
        self.arena_chunk_size = bytes;
        self
    }

    #[must_use]
    pub fn with_dump_indent(mut self, spaces: usize) -> Self {
        self.dump_indent = spaces;
        self
    }
}

/// Widest indentation step accepted from the environment.
const MAX_DUMP_INDENT: usize = 64;

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, name: &str, max: usize, default: usize) -> usize {
    let Some(raw) = lookup(name) else {
        return default;
    };

    match raw.trim().parse::<usize>() {
        Ok(value) if value <= max => value,
        Ok(value) => {
            warn!("ignoring {}={}: above the limit of {}; using {}", name, value, max, default);
            default
        }
        Err(err) => {
            warn!("ignoring {}={:?}: {}; using {}", name, raw, err, default);
            default
        }
    }
}
