//! Container File
//!
//! Owns the backing file and the in-memory node tree, and exposes the
//! adapter operations the frame store is written against. Paths are
//! `/`-separated and relative to the root group; empty segments are
//! ignored, so `a//b` and `a/b` name the same node.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::array::Array;
use crate::attrs::AttrMap;
use crate::config::OpenMode;
use crate::error::{Result, StoreError};

use super::codec::{decode_image, encode_image};
use super::node::{Dataset, Group, Node, NodeKind};

/// Split a path into its non-empty segments
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// An open hierarchical container file.
///
/// Exclusively owned by one frame store instance for its lifetime. All
/// mutations happen against the in-memory tree and are persisted by
/// [`Container::flush`], which rewrites the image atomically (write to a
/// temporary file, fsync, rename over the target).
pub struct Container {
    /// Backing file path
    path: PathBuf,

    /// Root group of the node tree
    root: Group,

    /// Write permission, fixed at open time
    writable: bool,

    /// Whether the in-memory tree has diverged from the on-disk image
    dirty: bool,
}

impl Container {
    /// Open or create the container at `path` in the given mode.
    ///
    /// `Read` and `ReadWrite` require the file to exist; `CreateNew`
    /// requires it not to; `CreateTruncate` discards any existing content.
    /// Creating modes write an empty image immediately so the file exists
    /// on disk as soon as the container is open.
    pub fn open(path: &Path, mode: OpenMode) -> Result<Self> {
        let writable = mode.is_writable();
        let exists = path.exists();

        let (root, fresh) = match mode {
            OpenMode::Read | OpenMode::ReadWrite => {
                if !exists {
                    return Err(StoreError::NotFound {
                        path: path.display().to_string(),
                    });
                }
                (Self::load(path)?, false)
            }
            OpenMode::CreateTruncate => (Group::default(), true),
            OpenMode::CreateNew => {
                if exists {
                    return Err(StoreError::AlreadyExists {
                        path: path.display().to_string(),
                    });
                }
                (Group::default(), true)
            }
            OpenMode::OpenOrCreate => {
                if exists {
                    (Self::load(path)?, false)
                } else {
                    (Group::default(), true)
                }
            }
        };

        let mut container = Self {
            path: path.to_path_buf(),
            root,
            writable,
            dirty: false,
        };

        if fresh {
            container.dirty = true;
            container.flush()?;
        }

        Ok(container)
    }

    /// Read and validate an existing container image
    fn load(path: &Path) -> Result<Group> {
        let bytes = fs::read(path)?;
        decode_image(&bytes)
    }

    /// Persist the in-memory tree if it has changed.
    ///
    /// Writes the full image to `<file>.tmp`, fsyncs, and renames it over
    /// the target, so readers never observe a half-written container.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let image = encode_image(&self.root)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "container".to_string());
        let tmp = self.path.with_file_name(format!("{file_name}.tmp"));

        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&image)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        self.dirty = false;
        tracing::trace!(
            path = %self.path.display(),
            bytes = image.len(),
            "container image flushed"
        );
        Ok(())
    }

    /// Flush and consume the container
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    // =========================================================================
    // Adapter Operations
    // =========================================================================

    /// Return the group at `path`, creating any missing levels.
    ///
    /// Requires write access. Fails with a structural error if a dataset
    /// already occupies any segment of the path.
    pub fn require_group(&mut self, path: &str) -> Result<&mut Group> {
        if !self.writable {
            return Err(StoreError::ReadOnly {
                op: "require_group",
            });
        }

        let file = self.path.clone();
        let mut created = false;
        let mut current = &mut self.root;
        let mut walked = String::new();

        for seg in path.split('/').filter(|s| !s.is_empty()) {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(seg);

            let child = current.children.entry(seg.to_string()).or_insert_with(|| {
                created = true;
                Node::Group(Group::default())
            });
            match child {
                Node::Group(g) => current = g,
                Node::Dataset(_) => {
                    return Err(StoreError::Structural {
                        path: walked,
                        expected: NodeKind::Group,
                        found: NodeKind::Dataset,
                        file: file.clone(),
                    });
                }
            }
        }

        if created {
            self.dirty = true;
        }
        Ok(current)
    }

    /// Return the existing group at `path`.
    ///
    /// The empty path names the root group.
    pub fn open_group(&self, path: &str) -> Result<&Group> {
        if segments(path).next().is_none() {
            return Ok(&self.root);
        }
        match self.node(path)? {
            Node::Group(g) => Ok(g),
            Node::Dataset(_) => Err(self.structural(path, NodeKind::Group, NodeKind::Dataset)),
        }
    }

    /// Return the existing dataset at `path`
    pub fn open_dataset(&self, path: &str) -> Result<&Dataset> {
        match self.node(path)? {
            Node::Dataset(d) => Ok(d),
            Node::Group(_) => Err(self.structural(path, NodeKind::Dataset, NodeKind::Group)),
        }
    }

    /// Create a dataset named `name` under `group_path`, or replace an
    /// existing one when `overwrite` is true.
    ///
    /// `name` may itself contain nested group structure (`b/c`); missing
    /// intermediate groups are created. When a dataset already exists and
    /// `overwrite` is false, signals [`StoreError::DatasetExists`] and lets
    /// the caller decide whether that is an error or a no-op. Replacing a
    /// dataset is a delete + recreate: the new data's dtype wins and the
    /// attribute map starts empty. A non-dataset child of the same name is
    /// a structural error regardless of `overwrite`.
    pub fn create_or_replace_dataset(
        &mut self,
        group_path: &str,
        name: &str,
        data: Array,
        overwrite: bool,
    ) -> Result<()> {
        if !self.writable {
            return Err(StoreError::ReadOnly {
                op: "create_or_replace_dataset",
            });
        }
        if segments(name).next().is_none() {
            return Err(StoreError::InvalidName {
                name: name.to_string(),
            });
        }

        let mut full = String::new();
        for seg in segments(group_path).chain(segments(name)) {
            if !full.is_empty() {
                full.push('/');
            }
            full.push_str(seg);
        }
        let (parent_path, leaf) = match full.rsplit_once('/') {
            Some((parent, leaf)) => (parent.to_string(), leaf.to_string()),
            None => (String::new(), full.clone()),
        };

        let file = self.path.clone();
        let parent = self.require_group(&parent_path)?;
        match parent.children.get(&leaf) {
            Some(Node::Group(_)) => {
                return Err(StoreError::Structural {
                    path: full,
                    expected: NodeKind::Dataset,
                    found: NodeKind::Group,
                    file,
                });
            }
            Some(Node::Dataset(_)) if !overwrite => {
                return Err(StoreError::DatasetExists { path: full });
            }
            _ => {}
        }

        parent.children.insert(leaf, Node::Dataset(Dataset::new(data)));
        self.dirty = true;
        Ok(())
    }

    /// List the direct children of the group at `group_path` with their
    /// kind tags, in the container's native enumeration order
    pub fn list_children(&self, group_path: &str) -> Result<Vec<(String, NodeKind)>> {
        let group = self.open_group(group_path)?;
        Ok(group
            .children
            .iter()
            .map(|(name, node)| (name.clone(), node.kind()))
            .collect())
    }

    /// Full copy of the attribute map on the node at `path`
    pub fn get_attrs(&self, path: &str) -> Result<AttrMap> {
        Ok(self.node(path)?.attrs().clone())
    }

    /// Overwrite-guarded attribute set (shared algorithm).
    ///
    /// Computes the clashing keys first; if any exist and `overwrite` is
    /// false the whole operation aborts with [`StoreError::AttrConflict`]
    /// and nothing is written. Otherwise every incoming key is written,
    /// replacing existing values.
    pub fn set_attrs(&mut self, path: &str, attrs: &AttrMap, overwrite: bool) -> Result<()> {
        if !self.writable {
            return Err(StoreError::ReadOnly { op: "set_attrs" });
        }
        if attrs.is_empty() {
            return Ok(());
        }

        let node = self.node_mut(path)?;
        let existing = node.attrs_mut();

        let clashes: Vec<String> = attrs
            .keys()
            .filter(|key| existing.contains_key(key.as_str()))
            .cloned()
            .collect();
        if !clashes.is_empty() && !overwrite {
            return Err(StoreError::AttrConflict {
                path: path.to_string(),
                keys: clashes,
            });
        }

        for (key, value) in attrs {
            existing.insert(key.clone(), value.clone());
        }
        self.dirty = true;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this container was opened with write access
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Whether unflushed changes exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn structural(&self, path: &str, expected: NodeKind, found: NodeKind) -> StoreError {
        StoreError::Structural {
            path: path.to_string(),
            expected,
            found,
            file: self.path.clone(),
        }
    }

    /// Resolve the node at a non-empty path
    fn node(&self, path: &str) -> Result<&Node> {
        let segs: Vec<&str> = segments(path).collect();
        let Some((leaf, parents)) = segs.split_last() else {
            return Err(StoreError::NotFound {
                path: path.to_string(),
            });
        };

        let mut current = &self.root;
        let mut walked = String::new();
        for seg in parents {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(seg);
            match current.children.get(*seg) {
                Some(Node::Group(g)) => current = g,
                Some(Node::Dataset(_)) => {
                    return Err(self.structural(&walked, NodeKind::Group, NodeKind::Dataset));
                }
                None => return Err(StoreError::NotFound { path: walked }),
            }
        }

        if !walked.is_empty() {
            walked.push('/');
        }
        walked.push_str(leaf);
        current
            .children
            .get(*leaf)
            .ok_or(StoreError::NotFound { path: walked })
    }

    /// Mutable variant of [`Container::node`]
    fn node_mut(&mut self, path: &str) -> Result<&mut Node> {
        let file = self.path.clone();
        let segs: Vec<&str> = segments(path).collect();
        let Some((leaf, parents)) = segs.split_last() else {
            return Err(StoreError::NotFound {
                path: path.to_string(),
            });
        };

        let mut current = &mut self.root;
        let mut walked = String::new();
        for seg in parents {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(seg);
            match current.children.get_mut(*seg) {
                Some(Node::Group(g)) => current = g,
                Some(Node::Dataset(_)) => {
                    return Err(StoreError::Structural {
                        path: walked,
                        expected: NodeKind::Group,
                        found: NodeKind::Dataset,
                        file: file.clone(),
                    });
                }
                None => return Err(StoreError::NotFound { path: walked }),
            }
        }

        if !walked.is_empty() {
            walked.push('/');
        }
        walked.push_str(leaf);
        current
            .children
            .get_mut(*leaf)
            .ok_or(StoreError::NotFound { path: walked })
    }
}
