//! One user session: a ledger, the date it is looked at, and how values
//! from previous reset windows are treated
//!
//! `Session` is the only owner of the ledger. Commands go through `apply`,
//! rendering borrows the session through `ledger`, `today` and `summary`.

use crate::lib::{
    benefit::{Amount, BenefitId},
    date::Date,
    ledger::{Ledger, LedgerError},
    rollover::{Policy, Stamps},
    summary::Summary,
};
use crate::load::parse::Command;

#[derive(Debug)]
pub struct Session {
    ledger: Ledger,
    today: Date,
    policy: Policy,
    stamps: Stamps,
}

/// What the front-end should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// the ledger changed, totals should be refreshed
    Updated,
    /// the date changed, listed credits were cleared by the rollover
    Moved(Vec<BenefitId>),
    /// listed credits hold values from an ended window, they were cleared
    /// only if `cleared` is set
    Stale { ids: Vec<BenefitId>, cleared: bool },
    Show,
    Help,
    Quit,
}

impl Session {
    pub fn new(today: Date, policy: Policy) -> Self {
        Self {
            ledger: Ledger::new(),
            today,
            policy,
            stamps: Stamps::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.ledger)
    }

    /// Translate one command into ledger operations
    ///
    /// A rejected command leaves the session exactly as it was.
    pub fn apply(&mut self, command: Command) -> Result<Reply, LedgerError> {
        match command {
            Command::Check(id) => self.write(id, id.unit()),
            Command::Uncheck(id) | Command::Clear(id) => self.write(id, Amount::ZERO),
            Command::Set(id, amount) => self.write(id, amount),
            Command::Reset => {
                self.ledger.reset();
                self.stamps.clear();
                Ok(Reply::Updated)
            }
            Command::Date(date) => {
                tracing::info!(from = %self.today, to = %date, "session date moved");
                self.today = date;
                let expired = match self.policy {
                    Policy::Automatic => self.stamps.expire(&mut self.ledger, date),
                    Policy::Manual => Vec::new(),
                };
                Ok(Reply::Moved(expired))
            }
            Command::Rollover => {
                let cleared = self.policy == Policy::Automatic;
                let ids = if cleared {
                    self.stamps.expire(&mut self.ledger, self.today)
                } else {
                    self.stamps.stale(&self.ledger, self.today)
                };
                Ok(Reply::Stale { ids, cleared })
            }
            Command::Show => Ok(Reply::Show),
            Command::Help => Ok(Reply::Help),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    fn write(&mut self, id: BenefitId, amount: Amount) -> Result<Reply, LedgerError> {
        if id.control().is_none() {
            return Err(LedgerError::NoInput(id));
        }
        self.ledger.set(id, amount)?;
        self.stamps.record(id, self.today);
        Ok(Reply::Updated)
    }
}
