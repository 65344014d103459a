use core::fmt;
use std::{iter::Rev, vec};

use crate::instance::*;

/// A single reversible edit applied to a formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Edit {
    /// A clause was inserted at the front of the formula.
    Prepended,
    /// A clause was pushed at the back of the formula.
    Appended,
    /// The clause at `index` was removed.
    ClauseRemoved { index: usize, clause: Clause },
    /// The literal at `position` of the clause at `index` was removed.
    LiteralRemoved {
        index: usize,
        position: usize,
        literal: Literal,
    },
}

/// Stores the edits made to a formula since the outermost open checkpoint. Should be the
/// source of truth for what needs to be reverted upon backtrack.
/// Note: nothing is recorded while no checkpoint is open, so a formula that is never
/// branched on in place pays nothing for the log.
#[derive(Clone, Default)]
pub(crate) struct Trail {
    edits: Vec<Edit>,
    // Offsets into `edits`, one per open checkpoint
    checkpoints: Vec<usize>,
}

impl Trail {
    pub(crate) fn new() -> Trail {
        Trail::default()
    }

    /// The number of open checkpoints
    pub(crate) fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    pub(crate) fn is_recording(&self) -> bool {
        !self.checkpoints.is_empty()
    }

    pub(crate) fn record(&mut self, edit: Edit) {
        if self.is_recording() {
            self.edits.push(edit);
        }
    }

    pub(crate) fn checkpoint(&mut self) {
        self.checkpoints.push(self.edits.len());
    }

    /// Closes the innermost checkpoint and hands back the edits made since it was opened,
    /// most recent first. None if no checkpoint is open.
    pub(crate) fn unwind(&mut self) -> Option<Rev<vec::IntoIter<Edit>>> {
        let mark = self.checkpoints.pop()?;
        Some(self.edits.split_off(mark).into_iter().rev())
    }

    pub(crate) fn len(&self) -> usize {
        self.edits.len()
    }
}

impl fmt::Debug for Trail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Trail {{ depth={:?}, edits={:?} }}",
            self.depth(),
            self.len()
        )
    }
}
