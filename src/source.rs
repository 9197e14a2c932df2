//! Frame Producers
//!
//! The interface any upstream image reader (multi-page stacks, numbered
//! file series, ...) must expose to feed frames into a store. Readers live
//! outside this crate; [`MemorySource`] is the in-crate implementation
//! used by tests and as a reference for writing new ones.

use crate::array::Array;
use crate::attrs::AttrMap;
use crate::error::Result;

/// A producer of indexed frames.
///
/// Indices beyond the producer's range yield `Ok(None)` rather than an
/// unrelated I/O error, so producers with gaps stay readable.
pub trait FrameSource {
    /// Number of frames this producer can supply
    fn frame_count(&self) -> u64;

    /// The frame at `index`, or `None` if it does not exist
    fn get_frame(&mut self, index: u64) -> Result<Option<Array>>;

    /// Embedded per-frame metadata, for formats that carry it
    fn get_metadata(&mut self, index: u64) -> Result<Option<AttrMap>> {
        let _ = index;
        Ok(None)
    }
}

/// A pre-loaded, in-memory frame producer
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    frames: Vec<Option<Array>>,
    metadata: Vec<Option<AttrMap>>,
}

impl MemorySource {
    /// Build a source from a sequence of frames
    pub fn new(frames: impl IntoIterator<Item = Array>) -> Self {
        let frames: Vec<Option<Array>> = frames.into_iter().map(Some).collect();
        let metadata = vec![None; frames.len()];
        Self { frames, metadata }
    }

    /// Attach metadata to the frame at `index`
    pub fn set_metadata(&mut self, index: usize, metadata: AttrMap) {
        if index < self.metadata.len() {
            self.metadata[index] = Some(metadata);
        }
    }

    /// Mark the frame at `index` as absent (a gap in the sequence)
    pub fn remove_frame(&mut self, index: usize) {
        if index < self.frames.len() {
            self.frames[index] = None;
        }
    }
}

impl FrameSource for MemorySource {
    fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    fn get_frame(&mut self, index: u64) -> Result<Option<Array>> {
        Ok(usize::try_from(index)
            .ok()
            .and_then(|i| self.frames.get(i))
            .and_then(|f| f.clone()))
    }

    fn get_metadata(&mut self, index: u64) -> Result<Option<AttrMap>> {
        Ok(usize::try_from(index)
            .ok()
            .and_then(|i| self.metadata.get(i))
            .and_then(|m| m.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_none_not_an_error() {
        let mut source = MemorySource::new(vec![Array::from_u8(vec![1, 2])]);
        assert_eq!(source.frame_count(), 1);
        assert!(source.get_frame(0).unwrap().is_some());
        assert!(source.get_frame(1).unwrap().is_none());
        assert!(source.get_frame(u64::MAX).unwrap().is_none());
    }

    #[test]
    fn gaps_are_reported_as_absent() {
        let mut source = MemorySource::new(vec![
            Array::from_u8(vec![1]),
            Array::from_u8(vec![2]),
        ]);
        source.remove_frame(0);
        assert_eq!(source.frame_count(), 2);
        assert!(source.get_frame(0).unwrap().is_none());
        assert!(source.get_frame(1).unwrap().is_some());
    }
}
