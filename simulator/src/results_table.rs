//! Results buffer shared by the sweep workers.
//!
//! One slot per grid index. Ownership of the slots is split statically
//! between workers before they start, each slot accepts a single write,
//! and the table is only read back once every worker handle has been
//! dropped.

use std::sync::{Arc, OnceLock};

use guardchannel::GuardOutcome;

use crate::sweep_runner::SweepError;

#[derive(Debug)]
pub struct ResultsTable {
    slots: Vec<OnceLock<GuardOutcome>>,
}

impl ResultsTable {
    pub fn new(len: usize) -> Self {
        Self { slots: (0..len).map(|_| OnceLock::new()).collect() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Stores the outcome of grid index `index`.
    pub fn write(&self, index: usize, outcome: GuardOutcome) -> Result<(), SweepError> {
        let slot = self.slots.get(index).ok_or(SweepError::IndexOutOfRange { index, len: self.slots.len() })?;
        slot.set(outcome).map_err(|_| SweepError::SlotAlreadyWritten(index))
    }

    pub fn completed(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    /// Reclaims the table from its shared handle once no worker holds it.
    pub fn reclaim(shared: Arc<ResultsTable>) -> Result<ResultsTable, SweepError> {
        Arc::try_unwrap(shared).map_err(|arc| SweepError::TableStillShared(Arc::strong_count(&arc) - 1))
    }

    /// Outcomes in ascending index order; fails on the first empty slot.
    pub fn into_outcomes(self) -> Result<Vec<GuardOutcome>, SweepError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.into_inner().ok_or(SweepError::MissingResult(index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardchannel::AveragedStats;

    fn found(guard: u32) -> GuardOutcome {
        GuardOutcome::Found { guard, stats: AveragedStats::default() }
    }

    #[test]
    fn second_write_to_a_slot_fails() {
        let table = ResultsTable::new(2);
        table.write(1, found(3)).unwrap();
        assert!(matches!(table.write(1, found(4)), Err(SweepError::SlotAlreadyWritten(1))));
        assert!(matches!(table.write(2, found(4)), Err(SweepError::IndexOutOfRange { index: 2, len: 2 })));
    }

    #[test]
    fn missing_slot_is_reported() {
        let table = ResultsTable::new(3);
        table.write(0, found(0)).unwrap();
        table.write(2, found(2)).unwrap();
        assert_eq!(table.completed(), 2);
        assert!(matches!(table.into_outcomes(), Err(SweepError::MissingResult(1))));
    }

    #[test]
    fn reclaim_requires_sole_owner() {
        let shared = Arc::new(ResultsTable::new(1));
        let worker = Arc::clone(&shared);
        let shared = match ResultsTable::reclaim(shared) {
            Err(SweepError::TableStillShared(1)) => Arc::clone(&worker),
            other => panic!("unexpected {:?}", other.map(|t| t.len())),
        };
        drop(worker);
        assert_eq!(ResultsTable::reclaim(shared).unwrap().len(), 1);
    }
}
