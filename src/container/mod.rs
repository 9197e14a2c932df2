//! Container Module
//!
//! The hierarchical container backing a frame store: groups, named datasets,
//! and key/value attribute maps, persisted as a single file. This module is
//! the sole point where the concrete container technology appears; the store
//! above it only speaks in adapter operations (`require_group`,
//! `open_group`, `create_or_replace_dataset`, `list_children`,
//! `get_attrs`/`set_attrs`).
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                       │
//! │   Magic: "FRST" (4) | Version: u16 (2) | Len: u64 (8)   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Payload (variable)                                      │
//! │   bincode-encoded root group (entire node tree)         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                        │
//! │   PayloadCRC: u32                                       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every flush rewrites the whole image to a temporary file and renames it
//! over the target, so a group/attribute mutation is either fully on disk
//! or not at all.

mod codec;
mod file;
mod node;

pub use file::Container;
pub use node::{Dataset, Group, Node, NodeKind};

// =============================================================================
// Shared Constants (used by codec and tests)
// =============================================================================

/// Magic bytes identifying a framestore container file
pub(crate) const MAGIC: &[u8; 4] = b"FRST";

/// Current container format version
pub(crate) const FORMAT_VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadLen (8) = 14 bytes
pub(crate) const HEADER_SIZE: usize = 14;

/// Footer size: PayloadCRC (4)
pub(crate) const FOOTER_SIZE: usize = 4;
