//! Frame Naming
//!
//! A frame is a logical, zero-based integer index materialized on demand as
//! a group whose name is a fixed-width, zero-padded string. The format is
//! part of the on-disk contract: existing files written by other language
//! bindings use the exact same pattern.

use crate::error::{Result, StoreError};

/// Literal prefix of every frame group name
pub const FRAME_PREFIX: &str = "time_";

/// Fixed digit width of the zero-padded frame number
pub const FRAME_DIGITS: usize = 7;

/// Largest frame number that fits the fixed digit width
pub const MAX_FRAME: u64 = 9_999_999;

/// Format the canonical group name for a frame number.
///
/// Total and injective over `0..=MAX_FRAME`; numbers that would overflow
/// the fixed width are a caller error, not a widened name.
///
/// ```
/// # use framestore::frame::frame_group_name;
/// assert_eq!(frame_group_name(42).unwrap(), "time_0000042");
/// ```
pub fn frame_group_name(frame: u64) -> Result<String> {
    if frame > MAX_FRAME {
        return Err(StoreError::FrameOutOfRange { frame });
    }
    Ok(format!("{FRAME_PREFIX}{frame:0width$}", width = FRAME_DIGITS))
}

/// Parse a frame number back out of a group name.
///
/// Strict inverse of [`frame_group_name`]: the name must be the literal
/// prefix followed by exactly seven ASCII digits. Returns `None` for
/// anything else, so unrelated root-level groups are simply skipped when
/// enumerating frames.
pub fn parse_frame_number(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(FRAME_PREFIX)?;
    if digits.len() != FRAME_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
