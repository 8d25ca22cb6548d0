//! Reference documents: loading from disk and the in-memory session library.

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationResult};

/// File extensions accepted as reference material.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];

/// A named reference text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceDocument {
    /// File name or label shown to the user.
    pub name: String,
    /// The reference text.
    pub content: String,
}

impl ReferenceDocument {
    /// Create a document from a name and its text.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Length of the content in characters.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Whether `path` has one of the [`ACCEPTED_EXTENSIONS`], ignoring case.
pub fn is_accepted(path: &Utf8Path) -> bool {
    path.extension().is_some_and(|ext| {
        ACCEPTED_EXTENSIONS
            .iter()
            .any(|accepted| ext.eq_ignore_ascii_case(accepted))
    })
}

/// Load a reference file.
///
/// Rejects unaccepted extensions and files over `max_bytes` before reading.
/// Bytes are decoded as lossy UTF-8; PDF and DOCX files are not parsed, so
/// their text comes back mangled.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_reference_file(
    path: &Utf8Path,
    max_bytes: Option<usize>,
) -> GenerationResult<ReferenceDocument> {
    let name = path.file_name().unwrap_or(path.as_str()).to_string();
    if !is_accepted(path) {
        return Err(GenerationError::UnsupportedFileType { name });
    }

    let read_err = |source| GenerationError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_err)?;
    if let Some(limit) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > limit {
            return Err(GenerationError::InputTooLarge { size, limit });
        }
    }

    let bytes = std::fs::read(path.as_std_path()).map_err(read_err)?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    tracing::info!(name = %name, bytes = bytes.len(), "reference loaded");
    Ok(ReferenceDocument { name, content })
}

/// Ordered reference documents with an optional active entry.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    documents: Vec<ReferenceDocument>,
    active: Option<usize>,
}

impl ReferenceLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and make it active. Returns its index.
    pub fn add(&mut self, document: ReferenceDocument) -> usize {
        self.documents.push(document);
        let idx = self.documents.len() - 1;
        self.active = Some(idx);
        idx
    }

    /// Make the document at `index` active.
    pub fn select(&mut self, index: usize) -> Option<&ReferenceDocument> {
        let doc = self.documents.get(index)?;
        self.active = Some(index);
        Some(doc)
    }

    /// Remove the document at `index`.
    ///
    /// Removing the active document clears the selection; removing one
    /// before it shifts the selection down so it keeps pointing at the same
    /// document.
    pub fn remove(&mut self, index: usize) -> Option<ReferenceDocument> {
        if index >= self.documents.len() {
            return None;
        }
        let removed = self.documents.remove(index);
        self.active = match self.active {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Some(removed)
    }

    /// The active document, if any.
    pub fn active(&self) -> Option<&ReferenceDocument> {
        self.active.and_then(|i| self.documents.get(i))
    }

    /// Index of the active document, if any.
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// All documents in insertion order.
    pub fn documents(&self) -> &[ReferenceDocument] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the library holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn doc(name: &str) -> ReferenceDocument {
        ReferenceDocument::new(name, format!("{name} content"))
    }

    #[test]
    fn extensions_are_case_insensitive() {
        assert!(is_accepted(Utf8Path::new("notes.TXT")));
        assert!(is_accepted(Utf8Path::new("paper.pdf")));
        assert!(is_accepted(Utf8Path::new("brief.Docx")));
        assert!(!is_accepted(Utf8Path::new("image.png")));
        assert!(!is_accepted(Utf8Path::new("README")));
    }

    #[test]
    fn loads_text_file() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("notes.txt")).unwrap();
        fs::write(&path, "Reference text.").unwrap();

        let loaded = load_reference_file(&path, Some(1024)).unwrap();
        assert_eq!(loaded.name, "notes.txt");
        assert_eq!(loaded.content, "Reference text.");
    }

    #[test]
    fn rejects_unsupported_type() {
        let err = load_reference_file(Utf8Path::new("photo.jpg"), None).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedFileType { ref name } if name == "photo.jpg"));
    }

    #[test]
    fn rejects_oversized_file() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("big.txt")).unwrap();
        fs::write(&path, "x".repeat(64)).unwrap();

        let err = load_reference_file(&path, Some(16)).unwrap_err();
        assert!(matches!(err, GenerationError::InputTooLarge { size: 64, limit: 16 }));
    }

    #[test]
    fn missing_file_is_read_failure() {
        let err = load_reference_file(Utf8Path::new("/nonexistent/ref.txt"), None).unwrap_err();
        assert!(matches!(err, GenerationError::FileRead { .. }));
    }

    #[test]
    fn binary_content_decodes_lossily() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("scan.pdf")).unwrap();
        fs::write(&path, [b'%', b'P', b'D', b'F', 0xff, 0xfe]).unwrap();

        let loaded = load_reference_file(&path, None).unwrap();
        assert!(loaded.content.starts_with("%PDF"));
        assert!(loaded.content.contains('\u{FFFD}'));
    }

    #[test]
    fn add_makes_document_active() {
        let mut lib = ReferenceLibrary::new();
        lib.add(doc("a.txt"));
        let idx = lib.add(doc("b.txt"));
        assert_eq!(idx, 1);
        assert_eq!(lib.active().unwrap().name, "b.txt");
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn select_out_of_range_keeps_selection() {
        let mut lib = ReferenceLibrary::new();
        lib.add(doc("a.txt"));
        assert!(lib.select(5).is_none());
        assert_eq!(lib.active_index(), Some(0));
    }

    #[test]
    fn removing_active_clears_selection() {
        let mut lib = ReferenceLibrary::new();
        lib.add(doc("a.txt"));
        lib.add(doc("b.txt"));
        let removed = lib.remove(1).unwrap();
        assert_eq!(removed.name, "b.txt");
        assert!(lib.active().is_none());
    }

    #[test]
    fn removing_earlier_shifts_selection() {
        let mut lib = ReferenceLibrary::new();
        lib.add(doc("a.txt"));
        lib.add(doc("b.txt"));
        lib.add(doc("c.txt"));
        lib.select(2);
        lib.remove(0);
        assert_eq!(lib.active_index(), Some(1));
        assert_eq!(lib.active().unwrap().name, "c.txt");
    }

    #[test]
    fn removing_later_keeps_selection() {
        let mut lib = ReferenceLibrary::new();
        lib.add(doc("a.txt"));
        lib.add(doc("b.txt"));
        lib.select(0);
        lib.remove(1);
        assert_eq!(lib.active().unwrap().name, "a.txt");
        assert!(lib.remove(7).is_none());
    }

    #[test]
    fn char_count_counts_characters() {
        assert_eq!(ReferenceDocument::new("x", "héllo").char_count(), 5);
    }
}
