// Structural legality checks
// The toggle engine asks the schema whether a block of a given shape may be
// inserted at a position; it never validates the rest of the document.

use crate::document::{BlockKind, Document};

/// Decides whether a block of a candidate shape is permitted immediately
/// before the given index.
pub trait Schema {
    fn allows_insert(&self, document: &Document, index: usize, kind: &BlockKind) -> bool;
}

/// Default schema: list items must be reachable from their predecessor.
///
/// A list item with indent `k` is permitted at a position iff `k == 0`, or
/// the block directly before that position is a list item with indent at
/// least `k - 1`. Depth is additionally capped at `max_indent`. Plain blocks
/// are permitted anywhere.
pub struct NestingSchema {
    max_indent: u32,
}

pub const DEFAULT_MAX_INDENT: u32 = 8;

impl NestingSchema {
    pub fn new(max_indent: u32) -> Self {
        NestingSchema { max_indent }
    }
}

impl Default for NestingSchema {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INDENT)
    }
}

impl Schema for NestingSchema {
    fn allows_insert(&self, document: &Document, index: usize, kind: &BlockKind) -> bool {
        match kind {
            BlockKind::Plain => true,
            BlockKind::ListItem { indent, .. } => {
                if *indent > self.max_indent {
                    return false;
                }
                if *indent == 0 {
                    return true;
                }
                index > 0
                    && document
                        .prev_block(index)
                        .and_then(|b| b.indent())
                        .is_some_and(|d| d + 1 >= *indent)
            }
        }
    }
}
