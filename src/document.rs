//! Documents and the store they are loaded from and saved to

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{KingpadError, Result};

/// Loads and saves document text by path
pub trait DocumentStore {
    fn load(&self, path: &Path) -> Result<String>;
    fn save(&self, path: &Path, text: &str) -> Result<()>;
}

/// UTF-8 documents on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl DocumentStore for FileStore {
    fn load(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| file_error(path, e))
    }

    fn save(&self, path: &Path, text: &str) -> Result<()> {
        fs::write(path, text).map_err(|e| file_error(path, e))
    }
}

fn file_error(path: &Path, e: io::Error) -> KingpadError {
    match e.kind() {
        io::ErrorKind::NotFound => KingpadError::FileNotFound(path.display().to_string()),
        _ => KingpadError::Io(e),
    }
}

/// An open text document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Associated file path (None for untitled documents)
    path: Option<PathBuf>,
    text: String,
    /// Whether the document has unsaved changes
    modified: bool,
}

impl Document {
    /// Create a new untitled, empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document through `store`
    pub fn open(store: &dyn DocumentStore, path: &Path) -> Result<Self> {
        let text = store.load(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            text,
            modified: false,
        })
    }

    /// Save to the document's own path
    pub fn save(&mut self, store: &dyn DocumentStore) -> Result<()> {
        let path = self.path.as_deref().ok_or(KingpadError::NoFileName)?;
        store.save(path, &self.text)?;
        self.modified = false;
        Ok(())
    }

    /// Save to `path` and adopt it as the document's path
    pub fn save_as(&mut self, store: &dyn DocumentStore, path: &Path) -> Result<()> {
        store.save(path, &self.text)?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Display name: the file name, or "untitled"
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and mark the document modified
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// The document's highlighting blocks: one per line
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kingpad-doc-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_open_missing_file() {
        let path = temp_path("missing.py");
        let _ = fs::remove_file(&path);
        assert!(matches!(
            Document::open(&FileStore, &path),
            Err(KingpadError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_save_and_open() {
        let path = temp_path("roundtrip.py");
        let mut doc = Document::new();
        doc.set_text("def main():\n    pass\n");
        assert!(doc.is_modified());
        assert!(matches!(doc.save(&FileStore), Err(KingpadError::NoFileName)));

        doc.save_as(&FileStore, &path).unwrap();
        assert!(!doc.is_modified());
        assert_eq!(doc.name(), path.file_name().unwrap().to_string_lossy());

        let reopened = Document::open(&FileStore, &path).unwrap();
        assert_eq!(reopened.text(), "def main():\n    pass\n");
        assert_eq!(reopened.blocks().collect::<Vec<_>>(), vec!["def main():", "    pass"]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_untitled_name() {
        assert_eq!(Document::new().name(), "untitled");
        assert_eq!(Document::new().blocks().count(), 0);
    }
}
