//! Linear undo/redo log of full-state snapshots.

use std::sync::Arc;

/// Snapshot history with a single cursor.
///
/// Invariants:
/// - there is always at least one snapshot (the baseline);
/// - `0 <= cursor < snapshots.len()`;
/// - pushing while the cursor is not at the end drops every snapshot after it.
///
/// Snapshots are immutable once recorded and shared behind `Arc`, so handing
/// one back on undo/redo never copies the log itself.
#[derive(Debug, Clone)]
pub struct History<S> {
    snapshots: Vec<Arc<S>>,
    cursor: usize,
}

impl<S> History<S> {
    /// Start a history whose only entry is `baseline`.
    pub fn new(baseline: S) -> Self {
        Self {
            snapshots: vec![Arc::new(baseline)],
            cursor: 0,
        }
    }

    /// Record a new state after the cursor, pruning the redo branch.
    pub fn push(&mut self, snapshot: S) {
        let pruned = self.snapshots.len() - (self.cursor + 1);
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Arc::new(snapshot));
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, pruned, "history snapshot recorded");
    }

    /// Forget everything and start again from `baseline`.
    pub fn reset(&mut self, baseline: S) {
        self.snapshots.clear();
        self.snapshots.push(Arc::new(baseline));
        self.cursor = 0;
    }

    /// Step back one snapshot. `None` when already at the oldest one.
    pub fn undo(&mut self) -> Option<Arc<S>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        tracing::debug!(cursor = self.cursor, "history undo");
        Some(Arc::clone(&self.snapshots[self.cursor]))
    }

    /// Step forward one snapshot. `None` when already at the newest one.
    pub fn redo(&mut self) -> Option<Arc<S>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, "history redo");
        Some(Arc::clone(&self.snapshots[self.cursor]))
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The snapshot the cursor points at.
    pub fn current(&self) -> &S {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: a history holds at least its baseline.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
