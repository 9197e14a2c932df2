//! Container Image Codec
//!
//! Encodes the container tree to its single-file image and back, validating
//! magic bytes, format version, payload length, and CRC on the way in.

use crate::error::{Result, StoreError};

use super::node::Group;
use super::{FOOTER_SIZE, FORMAT_VERSION, HEADER_SIZE, MAGIC};

/// Encode the root group into a complete file image
pub(crate) fn encode_image(root: &Group) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(root).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&payload);
    let crc = hasher.finalize();

    let mut image = Vec::with_capacity(HEADER_SIZE + payload.len() + FOOTER_SIZE);
    image.extend_from_slice(MAGIC);
    image.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    image.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    image.extend_from_slice(&payload);
    image.extend_from_slice(&crc.to_le_bytes());

    Ok(image)
}

/// Decode and validate a complete file image into the root group
pub(crate) fn decode_image(bytes: &[u8]) -> Result<Group> {
    if bytes.len() < HEADER_SIZE + FOOTER_SIZE {
        return Err(StoreError::Corruption(format!(
            "container file truncated: {} bytes, need at least {}",
            bytes.len(),
            HEADER_SIZE + FOOTER_SIZE
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(StoreError::Corruption(format!(
            "invalid container magic: expected {:?}, got {:?}",
            MAGIC,
            &bytes[0..4]
        )));
    }

    let version = u16::from_le_bytes(bytes[4..6].try_into().expect("fixed-width slice"));
    if version != FORMAT_VERSION {
        return Err(StoreError::Corruption(format!(
            "unsupported container format version: {version}"
        )));
    }

    // Compare against the space actually present rather than summing with
    // the untrusted declared length, which can overflow.
    let declared_len = u64::from_le_bytes(bytes[6..14].try_into().expect("fixed-width slice"));
    let available_len = (bytes.len() - HEADER_SIZE - FOOTER_SIZE) as u64;
    if declared_len != available_len {
        return Err(StoreError::Corruption(format!(
            "container length mismatch: header declares {declared_len} payload bytes, \
             file holds {available_len}"
        )));
    }
    let payload_len = declared_len as usize;

    let payload = &bytes[HEADER_SIZE..HEADER_SIZE + payload_len];
    let stored_crc = u32::from_le_bytes(
        bytes[HEADER_SIZE + payload_len..]
            .try_into()
            .expect("fixed-width slice"),
    );

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(payload);
    let actual_crc = hasher.finalize();
    if actual_crc != stored_crc {
        return Err(StoreError::Corruption(format!(
            "payload CRC mismatch: stored {stored_crc:#010x}, computed {actual_crc:#010x}"
        )));
    }

    bincode::deserialize(payload).map_err(|e| {
        StoreError::Corruption(format!("payload failed to deserialize: {e}"))
    })
}
