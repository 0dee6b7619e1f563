//! Undo/redo history for the diagram editor
//!
//! Each entry is a full copy of the scene taken just before a change
//! committed. The past stack is bounded and drops its oldest entry on
//! overflow; the future stack is cleared by every new edit.

use std::collections::VecDeque;

use drillboard_core::constants::DEFAULT_HISTORY_CAPACITY;

use crate::scene::Scene;

/// Manages undo/redo stacks of scene snapshots
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Scene>,
    future: Vec<Scene>,
    capacity: usize,
}

impl History {
    /// Create with a maximum undo depth (at least 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the state of `scene` before a change
    pub fn push(&mut self, scene: &Scene) {
        self.push_snapshot(scene.clone());
    }

    /// Record a snapshot taken earlier, e.g. at the start of a gesture
    pub fn push_snapshot(&mut self, snapshot: Scene) {
        self.future.clear();
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }

    /// Restore the previous state into `scene`. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.future.push(std::mem::replace(scene, previous));
        true
    }

    /// Re-apply the most recently undone state into `scene`
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        self.past.push_back(std::mem::replace(scene, next));
        true
    }

    /// Drop the most recent snapshot, restoring it into `scene` without
    /// making it redoable. Used to abandon an edit that pushed history
    /// up front.
    pub fn revert(&mut self, scene: &mut Scene) -> bool {
        match self.past.pop_back() {
            Some(previous) => {
                *scene = previous;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
