//! Which reset window each entered value belongs to
//!
//! The ledger itself does not know when a value was entered, so a value
//! entered for a half-year would otherwise carry over into the next one.
//! `Stamps` keeps the window of the last write per credit, so that stale
//! values can be listed and, when the session asks for it, cleared.

use crate::lib::{
    benefit::{BenefitId, BENEFIT_COUNT},
    date::Date,
    ledger::Ledger,
    period::PeriodKey,
};

/// What to do with values whose window has ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// keep them until the user clears them
    Manual,
    /// clear them as soon as the session date leaves their window
    Automatic,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Manual
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stamps {
    written: [Option<PeriodKey>; BENEFIT_COUNT],
}

impl Stamps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `id` was written while the session date was `date`
    pub fn record(&mut self, id: BenefitId, date: Date) {
        self.written[id.index()] = Some(PeriodKey::of(id.cadence(), date));
    }

    pub fn clear(&mut self) {
        self.written = [None; BENEFIT_COUNT];
    }

    /// Credits holding a nonzero value that was entered in a window
    /// which ended before `date`
    ///
    /// Looking at an earlier date never makes a value stale.
    pub fn stale(&self, ledger: &Ledger, date: Date) -> Vec<BenefitId> {
        BenefitId::all()
            .filter(|id| ledger.is_used(*id))
            .filter(|id| match self.written[id.index()] {
                Some(key) => key < PeriodKey::of(id.cadence(), date),
                None => false,
            })
            .collect()
    }

    /// Zero out every stale value, returns what was cleared
    pub fn expire(&mut self, ledger: &mut Ledger, date: Date) -> Vec<BenefitId> {
        let stale = self.stale(ledger, date);
        for id in &stale {
            ledger.toggle(*id, false);
            self.written[id.index()] = None;
        }
        if !stale.is_empty() {
            tracing::debug!(count = stale.len(), %date, "expired values from previous windows");
        }
        stale
    }
}
