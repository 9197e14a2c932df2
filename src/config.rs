//! Configuration for framestore
//!
//! Centralized configuration with sensible defaults, plus the container
//! open-mode enum with its historically permissive string parsing.

/// Main configuration for a frame store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Persistence Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: when to persist the container image to disk
    pub sync_strategy: SyncStrategy,
}

/// Persistence strategy for the container file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Persist after every mutating operation (safest, slowest)
    EveryWrite,

    /// Persist only on explicit `flush()` and on `close()`
    OnClose,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_strategy: SyncStrategy::EveryWrite,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

// =============================================================================
// Open Modes
// =============================================================================

/// Container file open modes.
///
/// Mirrors the historical mode strings accepted at open time. Unrecognized
/// strings fall back to [`OpenMode::OpenOrCreate`] with a warning rather
/// than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Read only; error if the file does not exist
    Read,

    /// Read/write; error if the file does not exist
    ReadWrite,

    /// Create a new file, truncating any existing one
    CreateTruncate,

    /// Create a new file; error if one already exists
    CreateNew,

    /// Read/write, creating the file if it does not exist
    #[default]
    OpenOrCreate,
}

impl OpenMode {
    /// Parse a mode string.
    ///
    /// Accepts both the long spellings (`read`, `read-write-must-exist`,
    /// `create-truncate`, `create-must-not-exist`, `open-or-create`) and the
    /// short historical ones (`r`, `rw`, `w`, `w-`/`x`, `w+`/`a`). Anything
    /// else maps to `OpenOrCreate` and logs a warning; parsing never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "read" | "r" => OpenMode::Read,
            "read-write-must-exist" | "rw" => OpenMode::ReadWrite,
            "create-truncate" | "w" => OpenMode::CreateTruncate,
            "create-must-not-exist" | "w-" | "x" => OpenMode::CreateNew,
            "open-or-create" | "w+" | "a" => OpenMode::OpenOrCreate,
            other => {
                tracing::warn!(
                    mode = other,
                    "unrecognized open mode, falling back to open-or-create"
                );
                OpenMode::OpenOrCreate
            }
        }
    }

    /// Whether this mode produces a writable store
    pub fn is_writable(self) -> bool {
        !matches!(self, OpenMode::Read)
    }

    /// Canonical mode string
    pub fn as_str(self) -> &'static str {
        match self {
            OpenMode::Read => "read",
            OpenMode::ReadWrite => "read-write-must-exist",
            OpenMode::CreateTruncate => "create-truncate",
            OpenMode::CreateNew => "create-must-not-exist",
            OpenMode::OpenOrCreate => "open-or-create",
        }
    }
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_spellings() {
        assert_eq!(OpenMode::parse("read"), OpenMode::Read);
        assert_eq!(OpenMode::parse("read-write-must-exist"), OpenMode::ReadWrite);
        assert_eq!(OpenMode::parse("create-truncate"), OpenMode::CreateTruncate);
        assert_eq!(OpenMode::parse("create-must-not-exist"), OpenMode::CreateNew);
        assert_eq!(OpenMode::parse("open-or-create"), OpenMode::OpenOrCreate);
    }

    #[test]
    fn parse_short_spellings() {
        assert_eq!(OpenMode::parse("r"), OpenMode::Read);
        assert_eq!(OpenMode::parse("rw"), OpenMode::ReadWrite);
        assert_eq!(OpenMode::parse("w"), OpenMode::CreateTruncate);
        assert_eq!(OpenMode::parse("w-"), OpenMode::CreateNew);
        assert_eq!(OpenMode::parse("x"), OpenMode::CreateNew);
        assert_eq!(OpenMode::parse("w+"), OpenMode::OpenOrCreate);
        assert_eq!(OpenMode::parse("a"), OpenMode::OpenOrCreate);
    }

    #[test]
    fn parse_unknown_falls_back_to_open_or_create() {
        assert_eq!(OpenMode::parse("banana"), OpenMode::OpenOrCreate);
        assert_eq!(OpenMode::parse(""), OpenMode::OpenOrCreate);
    }

    #[test]
    fn only_read_mode_is_read_only() {
        assert!(!OpenMode::Read.is_writable());
        assert!(OpenMode::ReadWrite.is_writable());
        assert!(OpenMode::CreateTruncate.is_writable());
        assert!(OpenMode::CreateNew.is_writable());
        assert!(OpenMode::OpenOrCreate.is_writable());
    }
}
