// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-run assignment tallies used by the fairness term.

use std::collections::HashMap;

use shiftplan_core::WorkerId;

/// How many times each worker has been placed on each position so far in
/// the current run.
///
/// A ledger is created fresh for every run and dropped afterwards; carrying
/// one across runs would make results depend on call history.
#[derive(Debug, Clone, Default)]
pub struct FairnessLedger {
    counts: HashMap<WorkerId, HashMap<String, u32>>,
}

impl FairnessLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prior assignments of `worker` to `position` in this run.
    pub fn count(&self, worker: &WorkerId, position: &str) -> u32 {
        self.counts
            .get(worker)
            .and_then(|per_position| per_position.get(position))
            .copied()
            .unwrap_or(0)
    }

    /// Record one assignment and return the new tally.
    pub fn record(&mut self, worker: &WorkerId, position: &str) -> u32 {
        let slot = self
            .counts
            .entry(worker.clone())
            .or_default()
            .entry(position.to_string())
            .or_insert(0);
        *slot += 1;
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_per_worker_and_position() {
        let mut ledger = FairnessLedger::new();
        let w1 = WorkerId::new("w1");
        let w2 = WorkerId::new("w2");

        assert_eq!(ledger.count(&w1, "Gate"), 0);
        assert_eq!(ledger.record(&w1, "Gate"), 1);
        assert_eq!(ledger.record(&w1, "Gate"), 2);
        ledger.record(&w1, "Tower");
        ledger.record(&w2, "Gate");

        assert_eq!(ledger.count(&w1, "Gate"), 2);
        assert_eq!(ledger.count(&w1, "Tower"), 1);
        assert_eq!(ledger.count(&w2, "Tower"), 0);
        assert_eq!(ledger.count(&WorkerId::new("nobody"), "Gate"), 0);
    }
}
