// List toggling
// Converts a selected run of blocks to/from list items of a fixed type,
// repairing the indentation of affected neighbors so the document never ends
// up with an item nested deeper than its predecessor allows.
//
// The command derives two booleans from the editor state: `active` (the
// selection already starts inside a matching list) and `enabled` (toggling
// is structurally legal here). Both are recomputed from scratch on every
// selection-changed and document-changed notification.

use std::cell::Cell;
use std::rc::Rc;

use crate::document::{BlockKind, Document, ElementId, ListType};
use crate::editor::Editor;
use crate::schema::Schema;
use crate::transaction::{BlockOp, EditResult, Transaction};

#[derive(Debug, Clone, Copy, Default)]
struct ToggleState {
    active: bool,
    enabled: bool,
}

/// A toggle command for one list type
pub struct ListToggle {
    target: ListType,
    schema: Rc<dyn Schema>,
    state: Rc<Cell<ToggleState>>,
}

impl ListToggle {
    /// Create the command and subscribe it to the editor's change channels.
    /// The derived state is computed immediately from the current editor.
    pub fn attach(editor: &mut Editor, target: ListType, schema: Rc<dyn Schema>) -> Self {
        let state = Rc::new(Cell::new(ToggleState::default()));

        {
            let state = Rc::clone(&state);
            let schema = Rc::clone(&schema);
            editor.observe_selection(Box::new(move |editor| {
                recompute(&state, target, schema.as_ref(), editor);
            }));
        }
        {
            let state = Rc::clone(&state);
            let schema = Rc::clone(&schema);
            editor.observe_document(Box::new(move |editor| {
                recompute(&state, target, schema.as_ref(), editor);
            }));
        }

        recompute(&state, target, schema.as_ref(), editor);

        ListToggle {
            target,
            schema,
            state,
        }
    }

    pub fn target(&self) -> ListType {
        self.target
    }

    /// Whether the selection currently starts inside a list of the target type
    pub fn active(&self) -> bool {
        self.state.get().active
    }

    /// Whether toggling is currently legal
    pub fn enabled(&self) -> bool {
        self.state.get().enabled
    }

    /// Toggle the selected run of blocks.
    ///
    /// `blocks` overrides the editor's selection when given. If `transaction`
    /// is supplied, the planned operations are appended to it and the caller
    /// is responsible for committing; otherwise the command commits one
    /// transaction through the editor.
    ///
    /// Invoking while `enabled` is false is a silent no-op, as is an empty
    /// effective block set.
    pub fn execute(
        &self,
        editor: &mut Editor,
        blocks: Option<Vec<ElementId>>,
        transaction: Option<&mut Transaction>,
    ) -> EditResult {
        if !self.enabled() {
            return Ok(());
        }

        let ids = blocks.unwrap_or_else(|| editor.selected_blocks());
        let mut indices: Vec<usize> = ids
            .iter()
            .filter_map(|id| editor.document().find_block_index(*id))
            .collect();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            return Ok(());
        }

        let plan = self.plan(editor.document(), &indices);
        match transaction {
            Some(txn) => {
                txn.extend(plan);
                Ok(())
            }
            None => editor.apply(plan),
        }
    }

    /// Compute the full mutation batch for the given selected block indices
    /// (ordered, deduplicated). No document state is mutated here; the batch
    /// encodes the required apply order.
    fn plan(&self, document: &Document, selected: &[usize]) -> Transaction {
        let blocks = document.blocks();
        let first = &blocks[selected[0]];
        let turning_off = first.list_type() == Some(self.target);

        let mut txn = Transaction::new();

        if turning_off {
            // Indent renormalization: items following the turned-off run lose
            // their parent chain, so the run of nested items directly after it
            // is re-rooted. The walk stops at the first root-level item or
            // non-list-item; the first visited item always becomes a new root,
            // and any later item dipping below the running baseline resets it.
            let mut pending: Vec<(ElementId, u32)> = Vec::new();
            let mut baseline: Option<u32> = None;

            let mut i = selected[selected.len() - 1] + 1;
            while i < blocks.len() {
                let Some(depth) = blocks[i].indent() else {
                    break;
                };
                if depth == 0 {
                    break;
                }
                let base = baseline.map_or(depth, |b| b.min(depth));
                baseline = Some(base);
                pending.push((blocks[i].id, depth - base));
                i += 1;
            }

            // Applied far end first, so no intermediate state shows an item
            // deeper than its (possibly about-to-be-renamed) predecessor.
            for (id, indent) in pending.into_iter().rev() {
                txn.push(BlockOp::SetIndent { id, indent });
            }
        }

        let mut working = selected.to_vec();
        if !turning_off {
            // Sibling expansion: retyping part of a nested sub-list would mix
            // two types at one level, so the whole contiguous run of
            // same-indent siblings is pulled in. Current type is not checked;
            // everything pulled in is forced to the target type below.
            if let BlockKind::ListItem { indent, .. } = first.kind {
                if indent > 0 {
                    let mut i = working[0];
                    while i > 0 && blocks[i - 1].indent() == Some(indent) {
                        i -= 1;
                        working.insert(0, i);
                    }
                    let mut j = working[working.len() - 1] + 1;
                    while j < blocks.len() && blocks[j].indent() == Some(indent) {
                        working.push(j);
                        j += 1;
                    }
                }
            }
        }

        // Per-block conversion, in reverse document order
        for &index in working.iter().rev() {
            let block = &blocks[index];
            match (block.kind, turning_off) {
                (BlockKind::ListItem { .. }, true) => {
                    txn.push(BlockOp::ConvertToPlain { id: block.id });
                }
                (BlockKind::Plain, false) => {
                    txn.push(BlockOp::ConvertToListItem {
                        id: block.id,
                        list_type: self.target,
                        indent: 0,
                    });
                }
                (BlockKind::ListItem { list_type, .. }, false) if list_type != self.target => {
                    txn.push(BlockOp::SetListType {
                        id: block.id,
                        list_type: self.target,
                    });
                }
                _ => {} // already the correct kind and type
            }
        }

        txn
    }
}

fn recompute(state: &Cell<ToggleState>, target: ListType, schema: &dyn Schema, editor: &Editor) {
    let document = editor.document();
    // Only the first selected block is consulted; a heterogeneous selection
    // is active only if it starts inside a matching list.
    let first = editor
        .selected_blocks()
        .first()
        .and_then(|id| document.find_block_index(*id));

    let active = first
        .and_then(|index| document.blocks()[index].list_type())
        .map(|lt| lt == target)
        .unwrap_or(false);

    let enabled = active
        || first.is_some_and(|index| {
            schema.allows_insert(
                document,
                index,
                &BlockKind::ListItem {
                    list_type: target,
                    indent: 0,
                },
            )
        });

    state.set(ToggleState { active, enabled });
}
