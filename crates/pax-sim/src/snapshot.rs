//! `SnapshotManager` — one full copy of [`EngineState`] per computed interval.
//!
//! Entry `i` is the state at the start of interval `i` (entry 0 is the state
//! right after construction).  Navigation restores an entry by copying it into
//! the live state; nothing is ever recomputed.
//!
//! History is unbounded: a run of `T` intervals keeps `T + 1` states.

use pax_core::Interval;

use crate::EngineState;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotManager {
    states: Vec<EngineState>,
}

impl SnapshotManager {
    pub fn new(initial: &EngineState) -> Self {
        Self { states: vec![initial.clone()] }
    }

    /// Discard everything and start over from `initial`.
    pub fn reset(&mut self, initial: &EngineState) {
        self.states.clear();
        self.states.push(initial.clone());
    }

    /// Store `state` as the entry for `state.interval()`, dropping any entries
    /// at or after that interval first.
    pub fn record(&mut self, state: &EngineState) {
        self.states.truncate(state.interval().index());
        self.states.push(state.clone());
    }

    /// Drop every entry after `interval`.
    pub fn truncate_after(&mut self, interval: Interval) {
        self.states.truncate(interval.index() + 1);
    }

    /// Copy the entry for `target` (clamped to the computed range) into
    /// `live` and return the interval actually restored.
    pub fn restore_into(&self, target: Interval, live: &mut EngineState) -> Interval {
        let at = target.min(self.max_computed());
        if let Some(state) = self.states.get(at.index()) {
            live.clone_from(state);
        }
        at
    }

    pub fn get(&self, interval: Interval) -> Option<&EngineState> {
        self.states.get(interval.index())
    }

    /// Latest interval with a stored state.
    pub fn max_computed(&self) -> Interval {
        Interval(self.states.len().saturating_sub(1) as u32)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
