// Transactions
// A transaction collects block mutations and applies them as one atomic
// batch: either every operation commits, or the document is left untouched.
// Operations are applied strictly in push order; callers that care about
// intermediate states (the toggle engine does) encode their ordering by
// pushing in the order they want applied.

use crate::document::{BlockKind, Document, ElementId, ListType};

/// Result of an editing operation
pub type EditResult = Result<(), EditError>;

/// Errors that can occur while applying block mutations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    UnknownBlock(ElementId),
    NotAListItem(ElementId),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::UnknownBlock(id) => write!(f, "unknown block {}", id),
            EditError::NotAListItem(id) => write!(f, "block {} is not a list item", id),
        }
    }
}

/// A single block mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOp {
    /// Rename to list item, establishing list attributes with the kind change
    ConvertToListItem {
        id: ElementId,
        list_type: ListType,
        indent: u32,
    },
    /// Rename to plain block; list attributes are dropped with the payload
    ConvertToPlain { id: ElementId },
    SetListType { id: ElementId, list_type: ListType },
    SetIndent { id: ElementId, indent: u32 },
}

/// An ordered batch of block mutations
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    ops: Vec<BlockOp>,
}

impl Transaction {
    pub fn new() -> Self {
        Transaction { ops: Vec::new() }
    }

    pub fn push(&mut self, op: BlockOp) {
        self.ops.push(op);
    }

    /// Append all operations from another transaction, preserving order
    pub fn extend(&mut self, other: Transaction) {
        self.ops.extend(other.ops);
    }

    pub fn ops(&self) -> &[BlockOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Apply all operations to the document, in push order.
    /// If any operation fails, the document is restored to its prior state
    /// and the error is returned.
    pub fn commit(&self, document: &mut Document) -> EditResult {
        let saved = document.blocks().to_vec();
        for op in &self.ops {
            if let Err(err) = apply_op(document, op) {
                *document.blocks_mut() = saved;
                return Err(err);
            }
        }
        Ok(())
    }
}

fn apply_op(document: &mut Document, op: &BlockOp) -> EditResult {
    match op {
        BlockOp::ConvertToListItem {
            id,
            list_type,
            indent,
        } => {
            let block = document
                .find_block_mut(*id)
                .ok_or(EditError::UnknownBlock(*id))?;
            block.kind = BlockKind::ListItem {
                list_type: *list_type,
                indent: *indent,
            };
        }
        BlockOp::ConvertToPlain { id } => {
            let block = document
                .find_block_mut(*id)
                .ok_or(EditError::UnknownBlock(*id))?;
            block.kind = BlockKind::Plain;
        }
        BlockOp::SetListType { id, list_type } => {
            let block = document
                .find_block_mut(*id)
                .ok_or(EditError::UnknownBlock(*id))?;
            match &mut block.kind {
                BlockKind::ListItem { list_type: lt, .. } => *lt = *list_type,
                BlockKind::Plain => return Err(EditError::NotAListItem(*id)),
            }
        }
        BlockOp::SetIndent { id, indent } => {
            let block = document
                .find_block_mut(*id)
                .ok_or(EditError::UnknownBlock(*id))?;
            match &mut block.kind {
                BlockKind::ListItem { indent: d, .. } => *d = *indent,
                BlockKind::Plain => return Err(EditError::NotAListItem(*id)),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Block;

    fn two_block_doc() -> Document {
        let mut doc = Document::new();
        doc.add_block(Block::plain(0).with_text("first"));
        doc.add_block(Block::list_item(0, ListType::Bulleted, 1).with_text("second"));
        doc
    }

    #[test]
    fn test_convert_establishes_attributes() {
        let mut doc = two_block_doc();
        let id = doc.blocks()[0].id;

        let mut txn = Transaction::new();
        txn.push(BlockOp::ConvertToListItem {
            id,
            list_type: ListType::Numbered,
            indent: 0,
        });
        txn.commit(&mut doc).unwrap();

        let block = doc.find_block(id).unwrap();
        assert_eq!(block.list_type(), Some(ListType::Numbered));
        assert_eq!(block.indent(), Some(0));
    }

    #[test]
    fn test_convert_to_plain_strips_attributes() {
        let mut doc = two_block_doc();
        let id = doc.blocks()[1].id;

        let mut txn = Transaction::new();
        txn.push(BlockOp::ConvertToPlain { id });
        txn.commit(&mut doc).unwrap();

        let block = doc.find_block(id).unwrap();
        assert_eq!(block.kind, BlockKind::Plain);
        assert_eq!(block.indent(), None);
    }

    #[test]
    fn test_failed_commit_rolls_back() {
        let mut doc = two_block_doc();
        let plain_id = doc.blocks()[0].id;
        let item_id = doc.blocks()[1].id;

        let mut txn = Transaction::new();
        // Valid op first, then one that must fail
        txn.push(BlockOp::SetIndent {
            id: item_id,
            indent: 3,
        });
        txn.push(BlockOp::SetIndent {
            id: plain_id,
            indent: 1,
        });

        let err = txn.commit(&mut doc).unwrap_err();
        assert_eq!(err, EditError::NotAListItem(plain_id));
        // The first op must not have been applied either
        assert_eq!(doc.find_block(item_id).unwrap().indent(), Some(1));
    }

    #[test]
    fn test_unknown_block_fails() {
        let mut doc = two_block_doc();
        let mut txn = Transaction::new();
        txn.push(BlockOp::ConvertToPlain { id: 9999 });
        assert_eq!(txn.commit(&mut doc), Err(EditError::UnknownBlock(9999)));
    }
}
