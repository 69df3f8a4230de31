//! Totals derived from a ledger snapshot
//!
//! Nothing is cached: a `Summary` is rebuilt from the ledger after every change.

use crate::lib::{
    benefit::{Amount, BenefitId, Card, TOTAL_POSSIBLE},
    ledger::Ledger,
};

/// Value extracted from one card, over the credits that have an input
pub fn card_subtotal(ledger: &Ledger, card: Card) -> Amount {
    card.claimable().map(|id| ledger.get(id)).sum()
}

/// Unweighted sum of every value, as currently entered
pub fn current_period_total(ledger: &Ledger) -> Amount {
    ledger.iter().map(|(_, a)| a).sum()
}

/// Every entered value repeated over all its occurrences in the year
///
/// Treats the current value as representative of the remaining periods,
/// it is an estimate and not a history.
pub fn projected_annual_total(ledger: &Ledger) -> Amount {
    ledger.iter().map(|(id, a)| annualized(id, a)).sum()
}

pub fn annualized(id: BenefitId, amount: Amount) -> Amount {
    amount * id.cadence().factor()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    cards: [Amount; Card::COUNT],
    current: Amount,
    projected: Amount,
}

impl Summary {
    pub fn of(ledger: &Ledger) -> Self {
        let mut cards = [Amount::ZERO; Card::COUNT];
        for card in Card::all() {
            cards[card as usize] = card_subtotal(ledger, card);
        }
        Self {
            cards,
            current: current_period_total(ledger),
            projected: projected_annual_total(ledger),
        }
    }

    pub fn card(&self, card: Card) -> Amount {
        self.cards[card as usize]
    }

    pub fn current(&self) -> Amount {
        self.current
    }

    pub fn projected(&self) -> Amount {
        self.projected
    }

    pub fn possible(&self) -> Amount {
        TOTAL_POSSIBLE
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::benefit::BenefitId::*;

    macro_rules! ledger {
        ( $( $id:ident = $v:expr ),* ) => {{
            let mut l = Ledger::new();
            $( l.set($id, Amount($v)).unwrap(); )*
            l
        }}
    }

    #[test]
    fn current_is_plain_sum() {
        let l = ledger!(AmexDining = 10, AmexUber = 10, AmexDunkin = 7);
        assert_eq!(current_period_total(&l), Amount(27));
        assert_eq!(current_period_total(&Ledger::new()), Amount::ZERO);
    }

    #[test]
    fn projection_weights() {
        let l = ledger!(AmexDining = 10, CsrTravel = 300, CsrEditHotel = 100);
        assert_eq!(projected_annual_total(&l), Amount(620));
        let l = ledger!(AmexResy = 50, CsrDoordashNc = 20, CitiHotel = 100);
        assert_eq!(projected_annual_total(&l), Amount(100 + 240 + 100));
    }

    #[test]
    fn cards_add_up() {
        let l = ledger!(AmexDining = 10, AmexResy = 25, CsrTravel = 120, CsrDiningTables = 75, CitiHotel = 100);
        let s = Summary::of(&l);
        assert_eq!(s.card(Card::AmexGold), Amount(35));
        assert_eq!(s.card(Card::SapphireReserve), Amount(195));
        assert_eq!(s.card(Card::StrataPremier), Amount(100));
        assert_eq!(Card::all().map(|c| s.card(c)).sum::<Amount>(), s.current());
        assert_eq!(s.possible(), Amount(1864));
    }

    #[test]
    fn amex_subtotal_leaves_out_hotel_collection() {
        let mut l = ledger!(AmexDining = 10);
        l.toggle(AmexHotel, true);
        assert_eq!(card_subtotal(&l, Card::AmexGold), Amount(10));
        assert_eq!(current_period_total(&l), Amount(110));
    }

    #[test]
    fn everything_at_cap() {
        let mut l = Ledger::new();
        for id in BenefitId::all() {
            l.toggle(id, true);
        }
        let s = Summary::of(&l);
        assert_eq!(s.card(Card::AmexGold), Amount(10 + 10 + 7 + 50));
        assert_eq!(s.current(), Amount(10 + 10 + 7 + 50 + 100 + 300 + 150 + 20 + 250 + 100));
        // the hotel collection is tracked but not part of the reference total
        assert_eq!(s.projected(), s.possible() + Amount(100));
    }
}
