//! Frame Store
//!
//! The public contract over the container: open with a mode, write and
//! read frame datasets, attach frame-level and dataset-level metadata,
//! enumerate datasets, close.
//!
//! ## Lifecycle
//!
//! ```text
//! CLOSED (initial) ──open──▶ OPEN_READONLY | OPEN_WRITABLE ──close──▶ CLOSED (terminal)
//! ```
//!
//! No other transitions exist; re-opening requires a new instance. Every
//! operation on a closed store fails with `ClosedStore`, and every mutating
//! operation on a read-only store fails with `ReadOnly`.

use std::path::Path;

use crate::array::Array;
use crate::attrs::AttrMap;
use crate::config::{Config, OpenMode, SyncStrategy};
use crate::container::{Container, NodeKind};
use crate::error::{Result, StoreError};
use crate::frame::{frame_group_name, parse_frame_number};
use crate::source::FrameSource;

/// Options for [`FrameStore::write_with`]
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Metadata to attach to the dataset's attribute map after the write
    pub metadata: Option<AttrMap>,

    /// Replace an existing dataset instead of leaving it untouched
    pub overwrite: bool,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach metadata to the written dataset
    pub fn metadata(mut self, metadata: AttrMap) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the dataset overwrite flag
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// A frame-indexed store over a single container file.
///
/// One instance exclusively owns one open container handle. All operations
/// are synchronous and blocking; mutating methods take `&mut self`, so
/// concurrent access from several threads is ruled out at compile time.
pub struct FrameStore {
    /// The open container; `None` once closed (terminal state)
    inner: Option<Container>,

    /// When to persist the container image
    sync_strategy: SyncStrategy,
}

impl FrameStore {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open a store with the default configuration
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        Self::open_with_config(path, mode, Config::default())
    }

    /// Open a store with an explicit configuration
    pub fn open_with_config(
        path: impl AsRef<Path>,
        mode: OpenMode,
        config: Config,
    ) -> Result<Self> {
        let path = path.as_ref();
        let container = Container::open(path, mode)?;
        tracing::debug!(
            path = %path.display(),
            mode = %mode,
            "opened frame store"
        );
        Ok(Self {
            inner: Some(container),
            sync_strategy: config.sync_strategy,
        })
    }

    /// Close the store, persisting any pending changes.
    ///
    /// Idempotent: closing an already-closed store does nothing and raises
    /// nothing. Every subsequent operation fails with `ClosedStore`.
    pub fn close(&mut self) -> Result<()> {
        if let Some(container) = self.inner.take() {
            let path = container.path().to_path_buf();
            container.close()?;
            tracing::debug!(path = %path.display(), "closed frame store");
        }
        Ok(())
    }

    /// Whether `close()` has run
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Whether the store accepts mutating operations (false once closed)
    pub fn is_writable(&self) -> bool {
        self.inner.as_ref().is_some_and(Container::is_writable)
    }

    /// Persist pending changes without closing.
    ///
    /// A no-op under `SyncStrategy::EveryWrite`, where every mutating
    /// operation already persists; the explicit persistence point under
    /// `SyncStrategy::OnClose`.
    pub fn flush(&mut self) -> Result<()> {
        self.container_mut()?.flush()
    }

    // =========================================================================
    // Data Operations
    // =========================================================================

    /// Write a dataset into a frame with default options
    pub fn write(&mut self, frame: u64, name: &str, data: Array) -> Result<()> {
        self.write_with(frame, name, data, WriteOptions::default())
    }

    /// Write a dataset into a frame.
    ///
    /// Creates the frame group (and any intermediate groups in `name`) on
    /// demand. If the dataset already exists and `overwrite` is false the
    /// existing contents are left exactly as they were and the call
    /// returns `Ok`: first write wins. With `overwrite` true the dataset
    /// is deleted and recreated; the new dtype wins and its attribute map
    /// starts empty. Metadata accompanying the write is attached to the
    /// dataset afterwards (never on the first-write-wins no-op path).
    pub fn write_with(
        &mut self,
        frame: u64,
        name: &str,
        data: Array,
        opts: WriteOptions,
    ) -> Result<()> {
        let container = self.writable_container("write")?;
        let group = frame_group_name(frame)?;

        match container.create_or_replace_dataset(&group, name, data, opts.overwrite) {
            Ok(()) => {}
            Err(StoreError::DatasetExists { path }) => {
                // First write wins.
                tracing::debug!(%path, "dataset already present, leaving existing data untouched");
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        if let Some(metadata) = &opts.metadata {
            if !metadata.is_empty() {
                // The dataset was just (re)created, so its attribute map is
                // empty and this can never conflict.
                let dataset_path = format!("{group}/{name}");
                container.set_attrs(&dataset_path, metadata, true)?;
            }
        }

        self.sync_after_write()
    }

    /// Read the full contents of a dataset.
    ///
    /// The frame group and the dataset must both exist; a group sitting
    /// where the dataset name points is a structural error. Returns a copy
    /// preserving dtype and shape exactly.
    pub fn read(&self, frame: u64, name: &str) -> Result<Array> {
        let container = self.container()?;
        let group = frame_group_name(frame)?;
        container.open_group(&group)?;
        let dataset = container.open_dataset(&format!("{group}/{name}"))?;
        Ok(dataset.data().clone())
    }

    /// List every dataset within a frame, recursively through subgroups.
    ///
    /// Returns `/`-prefixed paths relative to the frame group; groups are
    /// traversed but not listed. Depth-first over the container's native
    /// enumeration order; callers should treat the result as a set.
    pub fn list_datasets(&self, frame: u64) -> Result<Vec<String>> {
        let container = self.container()?;
        let group = frame_group_name(frame)?;
        container.open_group(&group)?;

        let mut datasets = Vec::new();
        let mut worklist = vec![String::new()];
        while let Some(relative) = worklist.pop() {
            let absolute = if relative.is_empty() {
                group.clone()
            } else {
                format!("{group}/{relative}")
            };
            for (name, kind) in container.list_children(&absolute)? {
                let child = if relative.is_empty() {
                    name
                } else {
                    format!("{relative}/{name}")
                };
                match kind {
                    NodeKind::Dataset => datasets.push(format!("/{child}")),
                    NodeKind::Group => worklist.push(child),
                }
            }
        }
        Ok(datasets)
    }

    /// Sorted list of the frame numbers present in the container.
    ///
    /// Only root-level groups whose name matches the canonical frame
    /// pattern count; other root entries are ignored.
    pub fn frames(&self) -> Result<Vec<u64>> {
        let container = self.container()?;
        let mut frames: Vec<u64> = container
            .list_children("")?
            .into_iter()
            .filter_map(|(name, kind)| match kind {
                NodeKind::Group => parse_frame_number(&name),
                NodeKind::Dataset => None,
            })
            .collect();
        frames.sort_unstable();
        Ok(frames)
    }

    // =========================================================================
    // Metadata Operations
    // =========================================================================

    /// Set frame-level metadata, creating the frame group on demand.
    ///
    /// Overwrite-guarded and all-or-nothing: if any incoming key already
    /// exists and `overwrite` is false, nothing is written and the call
    /// fails with `AttrConflict`.
    pub fn set_frame_metadata(
        &mut self,
        frame: u64,
        metadata: &AttrMap,
        overwrite: bool,
    ) -> Result<()> {
        let container = self.writable_container("set_frame_metadata")?;
        let group = frame_group_name(frame)?;
        container.require_group(&group)?;
        container.set_attrs(&group, metadata, overwrite)?;
        self.sync_after_write()
    }

    /// Full copy of a frame's metadata; the frame must exist
    pub fn get_frame_metadata(&self, frame: u64) -> Result<AttrMap> {
        let container = self.container()?;
        let group = frame_group_name(frame)?;
        container.open_group(&group)?;
        container.get_attrs(&group)
    }

    /// Update metadata on an existing dataset.
    ///
    /// Never creates the dataset: a missing frame or dataset is a
    /// `NotFound` error. Same overwrite guard as frame metadata.
    pub fn update_dataset_metadata(
        &mut self,
        frame: u64,
        name: &str,
        metadata: &AttrMap,
        overwrite: bool,
    ) -> Result<()> {
        let container = self.writable_container("update_dataset_metadata")?;
        let group = frame_group_name(frame)?;
        let dataset_path = format!("{group}/{name}");
        container.open_group(&group)?;
        container.open_dataset(&dataset_path)?;
        container.set_attrs(&dataset_path, metadata, overwrite)?;
        self.sync_after_write()
    }

    /// Full copy of a dataset's metadata; frame and dataset must exist
    pub fn get_dataset_metadata(&self, frame: u64, name: &str) -> Result<AttrMap> {
        let container = self.container()?;
        let group = frame_group_name(frame)?;
        container.open_group(&group)?;
        let dataset = container.open_dataset(&format!("{group}/{name}"))?;
        Ok(dataset.attrs().clone())
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Drain a frame producer into the store.
    ///
    /// Walks indices `0..frame_count`, writing each present frame under
    /// its own index as `dataset_name`, with any embedded per-frame
    /// metadata attached to the dataset. Absent frames are skipped.
    /// Returns the number of frames written.
    pub fn ingest<S: FrameSource>(&mut self, source: &mut S, dataset_name: &str) -> Result<u64> {
        let count = source.frame_count();
        let mut written = 0;
        for index in 0..count {
            let Some(data) = source.get_frame(index)? else {
                continue;
            };
            let mut opts = WriteOptions::new();
            if let Some(metadata) = source.get_metadata(index)? {
                opts.metadata = Some(metadata);
            }
            self.write_with(index, dataset_name, data, opts)?;
            written += 1;
        }
        tracing::debug!(frames = written, dataset = dataset_name, "ingest complete");
        Ok(written)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn container(&self) -> Result<&Container> {
        self.inner.as_ref().ok_or(StoreError::ClosedStore)
    }

    fn container_mut(&mut self) -> Result<&mut Container> {
        self.inner.as_mut().ok_or(StoreError::ClosedStore)
    }

    /// Closed and read-only checks for mutating operations
    fn writable_container(&mut self, op: &'static str) -> Result<&mut Container> {
        let container = self.inner.as_mut().ok_or(StoreError::ClosedStore)?;
        if !container.is_writable() {
            return Err(StoreError::ReadOnly { op });
        }
        Ok(container)
    }

    /// Persist after a mutating operation when the strategy asks for it
    fn sync_after_write(&mut self) -> Result<()> {
        if self.sync_strategy == SyncStrategy::EveryWrite {
            if let Some(container) = self.inner.as_mut() {
                container.flush()?;
            }
        }
        Ok(())
    }
}

impl Drop for FrameStore {
    fn drop(&mut self) {
        // No finalizer recovery: an unclosed store is a leak, not a crash.
        if let Some(container) = &self.inner {
            if container.is_dirty() {
                tracing::warn!(
                    path = %container.path().display(),
                    "frame store dropped without close; unflushed changes lost"
                );
            }
        }
    }
}
