// Structured Document Model
// A flat, ordered sequence of blocks. List structure is expressed through
// per-block attributes (list type + indent), not through nesting in the tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for document elements
pub type ElementId = usize;

/// The two list flavors a list item can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Bulleted,
    Numbered,
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListType::Bulleted => write!(f, "bulleted"),
            ListType::Numbered => write!(f, "numbered"),
        }
    }
}

/// Block-level kind
///
/// List-only attributes live in the `ListItem` payload, so changing the kind
/// changes discriminant and attributes together: converting to a list item
/// establishes `list_type`/`indent` in the same step, and converting back to
/// a plain block strips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Plain,
    ListItem { list_type: ListType, indent: u32 },
}

/// A block of content
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: ElementId,
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    pub fn new(id: ElementId, kind: BlockKind) -> Self {
        Block {
            id,
            kind,
            text: String::new(),
        }
    }

    pub fn plain(id: ElementId) -> Self {
        Self::new(id, BlockKind::Plain)
    }

    pub fn list_item(id: ElementId, list_type: ListType, indent: u32) -> Self {
        Self::new(id, BlockKind::ListItem { list_type, indent })
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self.kind, BlockKind::ListItem { .. })
    }

    /// List type, if this block is a list item
    pub fn list_type(&self) -> Option<ListType> {
        match self.kind {
            BlockKind::ListItem { list_type, .. } => Some(list_type),
            BlockKind::Plain => None,
        }
    }

    /// Indent level, if this block is a list item (0 = root-level item)
    pub fn indent(&self) -> Option<u32> {
        match self.kind {
            BlockKind::ListItem { indent, .. } => Some(indent),
            BlockKind::Plain => None,
        }
    }

    pub fn text_len(&self) -> usize {
        self.text.len()
    }
}

/// Position within a document
/// This represents a logical cursor position in the block sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentPosition {
    pub block_index: usize,
    pub offset: usize, // Character offset within the block's text
}

impl DocumentPosition {
    pub fn new(block_index: usize, offset: usize) -> Self {
        DocumentPosition {
            block_index,
            offset,
        }
    }

    pub fn start() -> Self {
        DocumentPosition::new(0, 0)
    }
}

/// The structured document
pub struct Document {
    blocks: Vec<Block>,
    next_id: ElementId,
}

impl Document {
    pub fn new() -> Self {
        Document {
            blocks: Vec::new(),
            next_id: 1,
        }
    }

    /// Get a unique element ID
    fn next_id(&mut self) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Get blocks
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get mutable blocks
    pub fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// Add a block at the end
    pub fn add_block(&mut self, mut block: Block) {
        if block.id == 0 {
            block.id = self.next_id();
        }
        self.blocks.push(block);
    }

    /// Insert a block at a specific position
    pub fn insert_block(&mut self, index: usize, mut block: Block) {
        if block.id == 0 {
            block.id = self.next_id();
        }
        self.blocks.insert(index, block);
    }

    /// Remove a block
    pub fn remove_block(&mut self, index: usize) -> Option<Block> {
        if index < self.blocks.len() {
            Some(self.blocks.remove(index))
        } else {
            None
        }
    }

    /// Get block count
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Find block by ID
    pub fn find_block(&self, id: ElementId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Find block by ID, mutable
    pub fn find_block_mut(&mut self, id: ElementId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    /// Find block index by ID
    pub fn find_block_index(&self, id: ElementId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Sibling before the given index
    pub fn prev_block(&self, index: usize) -> Option<&Block> {
        if index == 0 {
            None
        } else {
            self.blocks.get(index - 1)
        }
    }

    /// Sibling after the given index
    pub fn next_block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index + 1)
    }

    /// Validate and clamp a position to document bounds
    pub fn clamp_position(&self, pos: DocumentPosition) -> DocumentPosition {
        if self.blocks.is_empty() {
            return DocumentPosition::start();
        }

        let block_index = pos.block_index.min(self.blocks.len() - 1);
        let block = &self.blocks[block_index];
        let offset = pos.offset.min(block.text_len());

        DocumentPosition::new(block_index, offset)
    }

    /// Check if document is empty
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Create a simple document with one plain block
    pub fn with_plain_block(text: impl Into<String>) -> Self {
        let mut doc = Self::new();
        let id = doc.next_id();
        doc.add_block(Block::plain(id).with_text(text));
        doc
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document ({} blocks):", self.blocks.len())?;
        for (i, block) in self.blocks.iter().enumerate() {
            write!(f, "  [{}] ", i)?;
            match block.kind {
                BlockKind::Plain => write!(f, "Plain")?,
                BlockKind::ListItem { list_type, indent } => {
                    write!(f, "ListItem({}, indent {})", list_type, indent)?
                }
            }
            writeln!(f, ": {:?}", block.text)?;
        }
        Ok(())
    }
}
