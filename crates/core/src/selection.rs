//! In-memory image selection owned by a single view.
//!
//! [`Selection`] filters out non-image candidates, caps the number of kept
//! images and preserves arrival order. Removal never reorders the remaining
//! entries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data_url;
use crate::generation::MAX_IMAGES;

/// Where the bytes of a selected image live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on local disk, read lazily when encoding.
    File(PathBuf),
    /// Bytes already in memory (drag-and-drop, clipboard, tests).
    Memory(Arc<[u8]>),
}

/// A file offered to the selection, before MIME filtering.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    /// MIME type declared by the picker, if any.
    pub mime_type: Option<String>,
    pub source: ImageSource,
}

impl CandidateFile {
    /// Candidate backed by a file path. The MIME type is inferred from the
    /// extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(data_url::mime_from_extension)
            .map(str::to_string);
        Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            mime_type,
            source: ImageSource::File(path.to_path_buf()),
        }
    }

    /// Candidate backed by in-memory bytes with an optional declared type.
    pub fn from_bytes(name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_string),
            source: ImageSource::Memory(bytes.into()),
        }
    }

    /// Resolve the effective MIME type: declared, then sniffed, then by
    /// extension.
    fn resolve_mime(&self) -> Option<String> {
        if let Some(declared) = self.mime_type.as_deref().filter(|m| !m.is_empty()) {
            return Some(declared.to_ascii_lowercase());
        }
        if let ImageSource::Memory(bytes) = &self.source {
            if let Some(sniffed) = data_url::sniff_mime(bytes) {
                return Some(sniffed.to_string());
            }
        }
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(data_url::mime_from_extension)
            .map(str::to_string)
    }
}

/// An accepted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub name: String,
    pub mime_type: String,
    pub source: ImageSource,
}

impl SelectedImage {
    /// URL the view can render as a preview of the original.
    ///
    /// The preview is derived from the source and released with it; there
    /// is no separate handle to revoke.
    pub fn preview_url(&self) -> String {
        match &self.source {
            ImageSource::File(path) => format!("file://{}", path.display()),
            ImageSource::Memory(bytes) => data_url::encode(&self.mime_type, bytes),
        }
    }
}

/// How new batches combine with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Append new images, then truncate to `max`.
    Multi { max: usize },
    /// Replace the selection with the first image of each batch.
    Single,
}

impl Default for SelectionMode {
    fn default() -> Self {
        SelectionMode::Multi { max: MAX_IMAGES }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    images: Vec<SelectedImage>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            images: Vec::new(),
        }
    }

    /// Selection for the color-grading flow.
    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Offer a batch of candidates. Returns how many were kept.
    pub fn add_batch(&mut self, candidates: impl IntoIterator<Item = CandidateFile>) -> usize {
        let mut accepted = candidates.into_iter().filter_map(|candidate| {
            let mime_type = candidate.resolve_mime()?;
            data_url::is_image_mime(&mime_type).then(|| SelectedImage {
                name: candidate.name,
                mime_type,
                source: candidate.source,
            })
        });

        match self.mode {
            SelectionMode::Single => match accepted.next() {
                Some(first) => {
                    self.images = vec![first];
                    1
                }
                None => 0,
            },
            SelectionMode::Multi { max } => {
                let before = self.images.len();
                let room = max.saturating_sub(before);
                self.images.extend(accepted.take(room));
                self.images.len() - before
            }
        }
    }

    /// Remove the image at `index`, keeping the order of the others.
    pub fn remove(&mut self, index: usize) -> Option<SelectedImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn images(&self) -> &[SelectedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn first(&self) -> Option<&SelectedImage> {
        self.images.first()
    }
}
