//! `PendingTransit` — passengers walking between stages, keyed by the
//! interval they reach the next one.
//!
//! Same shape as a wake queue: `BTreeMap<Interval, Vec<PassengerId>>` with a
//! cached total.  Walks are short, so the number of distinct keys stays small
//! and every operation is effectively O(passengers touched).

use std::collections::BTreeMap;

use pax_core::{Interval, PassengerId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTransit {
    inner: BTreeMap<Interval, Vec<PassengerId>>,
    total: usize,
}

impl PendingTransit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `passenger` to arrive at `at`.
    pub fn push(&mut self, at: Interval, passenger: PassengerId) {
        self.inner.entry(at).or_default().push(passenger);
        self.total += 1;
    }

    /// Remove and return everyone arriving at exactly `at`, in push order.
    pub fn drain(&mut self, at: Interval) -> Vec<PassengerId> {
        let arrivals = self.inner.remove(&at).unwrap_or_default();
        self.total -= arrivals.len();
        arrivals
    }

    /// Remove every passenger matching `pred` and return them.  Entries left
    /// empty are pruned.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<PassengerId>
    where
        F: FnMut(PassengerId) -> bool,
    {
        let mut removed = Vec::new();
        self.inner.retain(|_, list| {
            list.retain(|&p| {
                let hit = pred(p);
                if hit {
                    removed.push(p);
                }
                !hit
            });
            !list.is_empty()
        });
        self.total -= removed.len();
        removed
    }

    /// Total passengers in transit.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct arrival intervals with at least one passenger.
    pub fn interval_count(&self) -> usize {
        self.inner.len()
    }

    /// `(arrival interval, passengers)` in ascending interval order.
    pub fn iter(&self) -> impl Iterator<Item = (Interval, &[PassengerId])> {
        self.inner.iter().map(|(&at, list)| (at, list.as_slice()))
    }

    pub fn passengers(&self) -> impl Iterator<Item = PassengerId> + '_ {
        self.inner.values().flatten().copied()
    }
}
