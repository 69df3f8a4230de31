use std::fmt;

use crate::lib::benefit::{Amount, BenefitId, BENEFIT_COUNT};

/// Why a ledger operation was refused
///
/// A refused operation leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// name is not one of the ten tracked credits
    UnknownBenefit(String),
    /// credit is tracked but has no input
    NoInput(BenefitId),
    /// amount does not fit in `[0, cap]`
    OutOfRange {
        id: BenefitId,
        amount: Amount,
        cap: Amount,
    },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::UnknownBenefit(name) => write!(f, "'{}' is not a tracked benefit", name),
            LedgerError::NoInput(id) => write!(f, "{} is tracked but cannot be marked as used", id),
            LedgerError::OutOfRange { id, amount, cap } => write!(
                f,
                "{} cannot be marked as used for {}, it is capped at {}",
                id, amount, cap,
            ),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Amount currently marked as used for every tracked credit
///
/// Always holds exactly one value per `BenefitId`, each within `[0, cap]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    used: [Amount; BENEFIT_COUNT],
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: BenefitId) -> Amount {
        self.used[id.index()]
    }

    #[cfg(test)]
    pub fn get_named(&self, name: &str) -> Result<Amount, LedgerError> {
        Ok(self.get(name.parse()?))
    }

    /// Overwrite the amount used, rejecting anything above the cap
    pub fn set(&mut self, id: BenefitId, amount: Amount) -> Result<(), LedgerError> {
        let cap = id.cap();
        if amount > cap {
            return Err(LedgerError::OutOfRange { id, amount, cap });
        }
        tracing::debug!(benefit = id.key(), %amount, "ledger write");
        self.used[id.index()] = amount;
        Ok(())
    }

    #[cfg(test)]
    pub fn set_named(&mut self, name: &str, amount: Amount) -> Result<(), LedgerError> {
        self.set(name.parse()?, amount)
    }

    /// Checkbox semantics: either the full unit value or nothing
    pub fn toggle(&mut self, id: BenefitId, on: bool) {
        let amount = if on { id.unit() } else { Amount::ZERO };
        tracing::debug!(benefit = id.key(), on, "ledger toggle");
        self.used[id.index()] = amount;
    }

    pub fn is_used(&self, id: BenefitId) -> bool {
        self.get(id).nonzero()
    }

    pub fn reset(&mut self) {
        tracing::debug!("ledger reset");
        self.used = [Amount::ZERO; BENEFIT_COUNT];
    }

    /// All values in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (BenefitId, Amount)> + '_ {
        BenefitId::all().map(move |id| (id, self.get(id)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::benefit::BenefitId::*;

    #[test]
    fn starts_empty() {
        let ledger = Ledger::new();
        assert_eq!(ledger.iter().count(), BENEFIT_COUNT);
        assert!(ledger.iter().all(|(_, a)| a == Amount::ZERO));
    }

    #[test]
    fn set_then_get() {
        let mut ledger = Ledger::new();
        for id in BenefitId::all() {
            for amount in [0, 1, id.cap().0 / 2, id.cap().0] {
                ledger.set(id, Amount(amount)).unwrap();
                assert_eq!(ledger.get(id), Amount(amount));
            }
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.set(CsrTravel, Amount(120)).unwrap();
        let before = ledger.clone();
        assert_eq!(
            ledger.set(CsrTravel, Amount(301)),
            Err(LedgerError::OutOfRange { id: CsrTravel, amount: Amount(301), cap: Amount(300) }),
        );
        assert_eq!(ledger.set(AmexDunkin, Amount(8)).unwrap_err(), LedgerError::OutOfRange {
            id: AmexDunkin,
            amount: Amount(8),
            cap: Amount(7),
        });
        assert_eq!(ledger, before);
    }

    #[test]
    fn overwrite_not_accumulate() {
        let mut ledger = Ledger::new();
        ledger.set(AmexResy, Amount(10)).unwrap();
        ledger.set(AmexResy, Amount(5)).unwrap();
        assert_eq!(ledger.get(AmexResy), Amount(5));
    }

    #[test]
    fn named_access() {
        let mut ledger = Ledger::new();
        ledger.set_named("csr_edit_hotel", Amount(100)).unwrap();
        assert_eq!(ledger.get_named("csr_edit_hotel"), Ok(Amount(100)));
        assert_eq!(ledger.get_named("nope"), Err(LedgerError::UnknownBenefit("nope".to_string())));
        let before = ledger.clone();
        assert_eq!(ledger.set_named("nope", Amount(1)), Err(LedgerError::UnknownBenefit("nope".to_string())));
        assert_eq!(ledger, before);
    }

    #[test]
    fn toggles() {
        let mut ledger = Ledger::new();
        ledger.toggle(AmexDunkin, true);
        assert_eq!(ledger.get(AmexDunkin), Amount(7));
        assert!(ledger.is_used(AmexDunkin));
        ledger.toggle(CsrDoordashNc, true);
        assert_eq!(ledger.get(CsrDoordashNc), Amount(20));
        ledger.toggle(AmexDunkin, false);
        assert_eq!(ledger.get(AmexDunkin), Amount::ZERO);
        assert!(!ledger.is_used(AmexDunkin));
    }

    #[test]
    fn reset_clears_everything() {
        let mut ledger = Ledger::new();
        for id in BenefitId::all() {
            ledger.toggle(id, true);
        }
        ledger.reset();
        for id in BenefitId::all() {
            assert_eq!(ledger.get(id), Amount::ZERO);
        }
    }

    #[test]
    fn error_messages() {
        let err = LedgerError::OutOfRange { id: AmexResy, amount: Amount(60), cap: Amount(50) };
        assert_eq!(format!("{}", err), "amex_resy cannot be marked as used for $60, it is capped at $50");
        assert_eq!(format!("{}", LedgerError::UnknownBenefit("x".into())), "'x' is not a tracked benefit");
        assert_eq!(format!("{}", LedgerError::NoInput(AmexHotel)), "amex_hotel is tracked but cannot be marked as used");
    }
}
