//! # framestore
//!
//! Frame-indexed storage for time-series scientific measurement data
//! (e.g. microscopy frames) in a single hierarchical container file, with:
//! - Canonical, fixed-width frame naming (`time_0000042`)
//! - Read/write-mode access control with a terminal closed state
//! - Overwrite-safety guards for both bulk data and metadata
//! - Per-frame and per-dataset attribute maps
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      FrameStore                             │
//! │   open/close · write/read · list · frame & dataset metadata │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ frame number ──▶ time_%07d group name
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Container Adapter                          │
//! │   require_group · open_group · create_or_replace_dataset    │
//! │   list_children · get_attrs / set_attrs                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Container File                             │
//! │   groups + datasets + attribute maps, single on-disk image  │
//! │   (magic/version header, bincode payload, CRC32 footer)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Frame producers ([`FrameSource`]) feed data in from the side; concrete
//! image readers live outside this crate.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod array;
pub mod attrs;
pub mod container;
pub mod frame;
pub mod source;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, OpenMode, SyncStrategy};

pub use array::{Array, ArrayData, DType};
pub use attrs::{AttrMap, AttrValue};
pub use container::{Container, Dataset, Group, Node, NodeKind};
pub use frame::{frame_group_name, parse_frame_number, MAX_FRAME};
pub use source::{FrameSource, MemorySource};
pub use store::{FrameStore, WriteOptions};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of framestore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
