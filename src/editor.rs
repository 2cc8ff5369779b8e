// Editor
// Holds the document plus cursor/selection state and provides the two
// change-notification channels commands subscribe to: one fired on every
// selection change, one fired after every committed transaction. Observers
// are invoked synchronously and must recompute from scratch on each firing.

use crate::document::{Document, DocumentPosition, ElementId};
use crate::transaction::{EditResult, Transaction};

/// Callback invoked with a read-only view of the editor
pub type Observer = Box<dyn FnMut(&Editor)>;

/// The editor with cursor and selection state
pub struct Editor {
    document: Document,
    cursor: DocumentPosition,
    selection: Option<(DocumentPosition, DocumentPosition)>, // (start, end)
    selection_observers: Vec<Observer>,
    document_observers: Vec<Observer>,
}

impl Editor {
    /// Create a new editor with an empty document
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create an editor with an existing document
    pub fn with_document(document: Document) -> Self {
        Editor {
            document,
            cursor: DocumentPosition::start(),
            selection: None,
            selection_observers: Vec::new(),
            document_observers: Vec::new(),
        }
    }

    /// Get the document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get mutable document
    ///
    /// Changes made through this reference bypass change notification; use
    /// `apply` for mutations commands should observe.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Get cursor position
    pub fn cursor(&self) -> DocumentPosition {
        self.cursor
    }

    /// Set cursor position (will be clamped to valid range)
    pub fn set_cursor(&mut self, pos: DocumentPosition) {
        self.cursor = self.document.clamp_position(pos);
        self.selection = None; // Clear selection when moving cursor
        self.notify_selection_changed();
    }

    /// Get selection range
    pub fn selection(&self) -> Option<(DocumentPosition, DocumentPosition)> {
        self.selection
    }

    /// Set selection range
    pub fn set_selection(&mut self, start: DocumentPosition, end: DocumentPosition) {
        let start = self.document.clamp_position(start);
        let end = self.document.clamp_position(end);
        self.cursor = start;
        self.selection = Some((start, end));
        self.notify_selection_changed();
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.notify_selection_changed();
    }

    /// Start or extend selection from current cursor position to a new position
    pub fn extend_selection_to(&mut self, end: DocumentPosition) {
        let end = self.document.clamp_position(end);

        if let Some((start, _)) = self.selection {
            // Already have a selection - keep the original start, update end
            self.selection = Some((start, end));
        } else {
            // Start new selection from current cursor position
            self.selection = Some((self.cursor, end));
        }

        self.cursor = end;
        self.notify_selection_changed();
    }

    /// The ordered ids of the blocks the selection covers.
    ///
    /// A collapsed selection yields the cursor's enclosing block; only an
    /// empty document yields nothing.
    pub fn selected_blocks(&self) -> Vec<ElementId> {
        if self.document.is_empty() {
            return Vec::new();
        }

        let blocks = self.document.blocks();
        match self.selection {
            Some((start, end)) => {
                let (first, last) = if start.block_index <= end.block_index {
                    (start.block_index, end.block_index)
                } else {
                    (end.block_index, start.block_index)
                };
                let last = last.min(blocks.len() - 1);
                blocks[first..=last].iter().map(|b| b.id).collect()
            }
            None => {
                let index = self.cursor.block_index.min(blocks.len() - 1);
                vec![blocks[index].id]
            }
        }
    }

    /// Register an observer on the selection-changed channel
    pub fn observe_selection(&mut self, observer: Observer) {
        self.selection_observers.push(observer);
    }

    /// Register an observer on the document-changed channel
    pub fn observe_document(&mut self, observer: Observer) {
        self.document_observers.push(observer);
    }

    /// Commit a transaction against the document and notify observers.
    /// Nothing is notified if the commit fails; the document is unchanged.
    pub fn apply(&mut self, transaction: Transaction) -> EditResult {
        transaction.commit(&mut self.document)?;
        self.notify_document_changed();
        Ok(())
    }

    fn notify_selection_changed(&mut self) {
        let mut observers = std::mem::take(&mut self.selection_observers);
        for observer in observers.iter_mut() {
            observer(self);
        }
        self.selection_observers = observers;
    }

    fn notify_document_changed(&mut self) {
        let mut observers = std::mem::take(&mut self.document_observers);
        for observer in observers.iter_mut() {
            observer(self);
        }
        self.document_observers = observers;
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Block;
    use std::cell::Cell;
    use std::rc::Rc;

    fn three_block_editor() -> Editor {
        let mut doc = Document::new();
        doc.add_block(Block::plain(0).with_text("one"));
        doc.add_block(Block::plain(0).with_text("two"));
        doc.add_block(Block::plain(0).with_text("three"));
        Editor::with_document(doc)
    }

    #[test]
    fn test_collapsed_selection_yields_cursor_block() {
        let mut editor = three_block_editor();
        editor.set_cursor(DocumentPosition::new(1, 0));

        let ids = editor.selected_blocks();
        assert_eq!(ids.len(), 1);
        assert_eq!(editor.document().find_block_index(ids[0]), Some(1));
    }

    #[test]
    fn test_range_selection_is_ordered() {
        let mut editor = three_block_editor();
        // Reversed range: anchor after head
        editor.set_selection(DocumentPosition::new(2, 0), DocumentPosition::new(0, 0));

        let ids = editor.selected_blocks();
        assert_eq!(ids.len(), 3);
        assert_eq!(editor.document().find_block_index(ids[0]), Some(0));
        assert_eq!(editor.document().find_block_index(ids[2]), Some(2));
    }

    #[test]
    fn test_empty_document_selects_nothing() {
        let editor = Editor::new();
        assert!(editor.selected_blocks().is_empty());
    }

    #[test]
    fn test_selection_observers_fire() {
        let mut editor = three_block_editor();
        let fired = Rc::new(Cell::new(0usize));

        let counter = Rc::clone(&fired);
        editor.observe_selection(Box::new(move |_| {
            counter.set(counter.get() + 1);
        }));

        editor.set_cursor(DocumentPosition::new(1, 0));
        editor.set_selection(DocumentPosition::new(0, 0), DocumentPosition::new(2, 0));
        editor.clear_selection();

        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn test_document_observers_fire_after_commit() {
        let mut editor = three_block_editor();
        let fired = Rc::new(Cell::new(0usize));

        let counter = Rc::clone(&fired);
        editor.observe_document(Box::new(move |_| {
            counter.set(counter.get() + 1);
        }));

        editor.apply(Transaction::new()).unwrap();
        assert_eq!(fired.get(), 1);
    }
}
