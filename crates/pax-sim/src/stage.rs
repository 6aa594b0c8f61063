//! `ServiceStage` — N parallel servers with FIFO queues and fractional rates.
//!
//! # Rate accumulation
//!
//! Each server carries a progress accumulator.  Every interval:
//!
//! ```text
//! progress += rate_per_interval
//! whole     = floor(progress)
//! progress -= whole              // stays in [0, 1)
//! serve up to `whole` passengers
//! ```
//!
//! Capacity the queue cannot use (it ran dry) is lost, not banked; only the
//! fractional remainder carries into the next interval.
//!
//! # Containers
//!
//! | Container | Holds                                                           |
//! |-----------|-----------------------------------------------------------------|
//! | queue     | passengers waiting for this server, in arrival order            |
//! | staging   | passengers this server finished who have not reached the next stage |
//! | serving   | the last passenger served in the current interval               |
//!
//! Staging and serving are views: a staged passenger is also in a pending
//! transit record, and it is that record which owns it.

use std::collections::VecDeque;

use pax_core::{FlightId, PassengerId, PassengerStore};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceStage {
    queues:   Vec<VecDeque<PassengerId>>,
    staging:  Vec<Vec<PassengerId>>,
    progress: Vec<f64>,
    serving:  Vec<Option<PassengerId>>,
}

impl ServiceStage {
    pub fn new(servers: usize) -> Self {
        Self {
            queues:   vec![VecDeque::new(); servers],
            staging:  vec![Vec::new(); servers],
            progress: vec![0.0; servers],
            serving:  vec![None; servers],
        }
    }

    pub fn server_count(&self) -> usize {
        self.queues.len()
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn queues(&self) -> &[VecDeque<PassengerId>] {
        &self.queues
    }

    pub fn staging(&self) -> &[Vec<PassengerId>] {
        &self.staging
    }

    pub fn serving(&self) -> &[Option<PassengerId>] {
        &self.serving
    }

    pub fn progress(&self) -> &[f64] {
        &self.progress
    }

    /// Passengers waiting across all queues.
    pub fn queued(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    /// Passengers of `flight` waiting across all queues.
    pub fn queued_for(&self, flight: FlightId, store: &PassengerStore) -> usize {
        self.queues
            .iter()
            .flatten()
            .filter(|&&p| store.flight_of(p) == flight)
            .count()
    }

    /// Server with the fewest queued passengers among `candidates`.  Ties go
    /// to the first candidate, so pass candidates in ascending order.
    pub fn shortest_queue(&self, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&s| s < self.queues.len())
            .min_by_key(|&s| self.queues[s].len())
    }

    /// Server with the fewest queued passengers overall, lowest index first.
    pub fn shortest_queue_any(&self) -> Option<usize> {
        (0..self.queues.len()).min_by_key(|&s| self.queues[s].len())
    }

    /// Every passenger referenced by a queue, staging list or serving slot.
    pub fn members(&self) -> impl Iterator<Item = PassengerId> + '_ {
        self.queues
            .iter()
            .flatten()
            .chain(self.staging.iter().flatten())
            .chain(self.serving.iter().flatten())
            .copied()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    pub fn enqueue(&mut self, server: usize, passenger: PassengerId) {
        self.queues[server].push_back(passenger);
    }

    /// Empty the serving slots; called at the start of every interval.
    pub fn begin_interval(&mut self) {
        self.serving.fill(None);
    }

    /// Run one interval of service on `server` at `rate` passengers per
    /// interval and return the passengers served, in service order.
    ///
    /// Missed passengers at the head of the queue are dropped, not served.
    /// Served passengers are staged and the last one occupies the serving slot.
    pub fn serve(&mut self, server: usize, rate: f64, store: &PassengerStore) -> Vec<PassengerId> {
        let progress = &mut self.progress[server];
        *progress += rate;
        let whole = progress.floor();
        *progress -= whole;

        let queue = &mut self.queues[server];
        let mut served = Vec::new();
        for _ in 0..whole as u64 {
            let next = loop {
                match queue.pop_front() {
                    Some(p) if store.is_missed(p) => continue,
                    other => break other,
                }
            };
            match next {
                Some(p) => served.push(p),
                None => break,
            }
        }

        if let Some(&last) = served.last() {
            self.serving[server] = Some(last);
        }
        self.staging[server].extend_from_slice(&served);
        served
    }

    /// Drop `passenger` from whichever staging list holds it.
    pub fn unstage(&mut self, passenger: PassengerId) {
        for list in &mut self.staging {
            if let Some(pos) = list.iter().position(|&p| p == passenger) {
                list.remove(pos);
                return;
            }
        }
    }

    /// Remove every missed passenger from queues, staging lists and serving
    /// slots.  Returns how many queue entries were dropped.
    pub fn purge_missed(&mut self, store: &PassengerStore) -> usize {
        let before = self.queued();
        for q in &mut self.queues {
            q.retain(|&p| !store.is_missed(p));
        }
        for list in &mut self.staging {
            list.retain(|&p| !store.is_missed(p));
        }
        for slot in &mut self.serving {
            if slot.is_some_and(|p| store.is_missed(p)) {
                *slot = None;
            }
        }
        before - self.queued()
    }
}
