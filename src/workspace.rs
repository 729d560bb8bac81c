//! Open documents and their highlighters
//!
//! The workspace is the tab host: it owns every open document, keyed by
//! path, and binds each one to the highlighter its file type calls for.

use std::path::Path;

use crate::document::{Document, DocumentStore};
use crate::error::{KingpadError, Result};
use crate::status::StatusSink;
use crate::syntax::{Highlighter, Span, SyntaxManager};

/// One open document
#[derive(Debug)]
pub struct Tab {
    pub document: Document,
    highlighter: Option<Highlighter>,
}

impl Tab {
    pub fn highlighter(&self) -> Option<&Highlighter> {
        self.highlighter.as_ref()
    }
}

/// The set of open documents
pub struct Workspace<S: StatusSink> {
    store: Box<dyn DocumentStore>,
    syntax: SyntaxManager,
    status: S,
    tabs: Vec<Tab>,
    current: Option<usize>,
}

impl<S: StatusSink> Workspace<S> {
    pub fn new(store: Box<dyn DocumentStore>, syntax: SyntaxManager, status: S) -> Self {
        Self {
            store,
            syntax,
            status,
            tabs: Vec::new(),
            current: None,
        }
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn syntax(&self) -> &SyntaxManager {
        &self.syntax
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Index of the focused tab
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn tab(&self, index: usize) -> Result<&Tab> {
        self.tabs.get(index).ok_or(KingpadError::NoSuchTab(index))
    }

    fn tab_mut(&mut self, index: usize) -> Result<&mut Tab> {
        self.tabs.get_mut(index).ok_or(KingpadError::NoSuchTab(index))
    }

    /// Index of the tab showing `path`, if open
    pub fn tab_for(&self, path: &Path) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.document.path() == Some(path))
    }

    /// Report an error to the status sink and hand it back
    fn fail<T>(&mut self, error: KingpadError) -> Result<T> {
        self.status.report(&error.to_string());
        Err(error)
    }

    /// Open `path`, or focus its tab if it is already open
    pub fn open(&mut self, path: &Path) -> Result<usize> {
        if let Some(index) = self.tab_for(path) {
            self.current = Some(index);
            return Ok(index);
        }

        let document = match Document::open(self.store.as_ref(), path) {
            Ok(document) => document,
            Err(e) => return self.fail(e),
        };
        let highlighter = self.syntax.highlighter_for(path);
        self.tabs.push(Tab {
            document,
            highlighter,
        });

        let index = self.tabs.len() - 1;
        self.current = Some(index);
        self.status.report(&format!("Opened {}", path.display()));
        Ok(index)
    }

    /// Open an empty untitled document
    pub fn new_document(&mut self) -> usize {
        self.tabs.push(Tab {
            document: Document::new(),
            highlighter: None,
        });
        let index = self.tabs.len() - 1;
        self.current = Some(index);
        self.status.report("New file");
        index
    }

    /// Replace a document's text
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.tab_mut(index)?.document.set_text(text);
        Ok(())
    }

    /// Save a document to its own path
    pub fn save(&mut self, index: usize) -> Result<()> {
        let tab = self.tabs.get_mut(index).ok_or(KingpadError::NoSuchTab(index))?;
        if let Err(e) = tab.document.save(self.store.as_ref()) {
            return self.fail(e);
        }
        let name = tab
            .document
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.status.report(&format!("Saved {}", name));
        Ok(())
    }

    /// Save a document under a new path; its highlighter follows the new file type
    pub fn save_as(&mut self, index: usize, path: &Path) -> Result<()> {
        let tab = self.tabs.get_mut(index).ok_or(KingpadError::NoSuchTab(index))?;
        if let Err(e) = tab.document.save_as(self.store.as_ref(), path) {
            return self.fail(e);
        }
        tab.highlighter = self.syntax.highlighter_for(path);
        self.status.report(&format!("Saved {}", path.display()));
        Ok(())
    }

    /// Close a tab; a modified document needs `force`
    pub fn close(&mut self, index: usize, force: bool) -> Result<()> {
        let tab = self.tab(index)?;
        if tab.document.is_modified() && !force {
            let name = tab.document.name();
            return self.fail(KingpadError::Unsaved(name));
        }

        let tab = self.tabs.remove(index);
        self.current = match self.current {
            _ if self.tabs.is_empty() => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) => Some(current.min(self.tabs.len() - 1)),
            None => None,
        };
        self.status.report(&format!("Closed {}", tab.document.name()));
        Ok(())
    }

    /// Highlight one block of a document with that document's highlighter
    pub fn highlight_block(&self, index: usize, block: &str) -> Result<Vec<Span>> {
        Ok(self
            .tab(index)?
            .highlighter
            .as_ref()
            .map(|h| h.highlight(block))
            .unwrap_or_default())
    }
}
