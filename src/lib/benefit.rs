//! The fixed catalog of tracked statement credits

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;
use std::iter::Sum;
use std::ops;
use std::str::FromStr;

use crate::lib::{ledger::LedgerError, period::Cadence};

/// A dollar amount, in whole dollars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(pub u32);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn nonzero(self) -> bool {
        self.0 != 0
    }

    /// Fraction of `total` this amount represents, in `0.0..=1.0`
    pub fn ratio(self, total: Amount) -> f64 {
        if total.0 == 0 {
            0.0
        } else {
            (self.0 as f64 / total.0 as f64).min(1.0)
        }
    }
}

impl From<u32> for Amount {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl ops::Add for Amount {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl ops::Sub for Amount {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl ops::Mul<u32> for Amount {
    type Output = Self;
    fn mul(self, factor: u32) -> Self {
        Self(self.0 * factor)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

/// Cards whose credits are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Card {
    AmexGold = 0,
    SapphireReserve,
    StrataPremier,
}

impl Card {
    pub const COUNT: usize = 3;

    pub fn all() -> impl Iterator<Item = Card> {
        (0..Self::COUNT).filter_map(Card::from_usize)
    }

    pub fn name(self) -> &'static str {
        match self {
            Card::AmexGold => "American Express Gold",
            Card::SapphireReserve => "Chase Sapphire Reserve",
            Card::StrataPremier => "Citi Strata Premier",
        }
    }

    /// Prefix used in checklist items
    pub fn short(self) -> &'static str {
        match self {
            Card::AmexGold => "Amex Gold",
            Card::SapphireReserve => "CSR",
            Card::StrataPremier => "Citi",
        }
    }

    /// Only the fee of the Amex Gold is known
    pub fn annual_fee(self) -> Option<Amount> {
        match self {
            Card::AmexGold => Some(Amount(325)),
            _ => None,
        }
    }

    pub fn benefits(self) -> impl Iterator<Item = BenefitId> {
        BenefitId::all().filter(move |id| id.card() == self)
    }

    /// Benefits of this card that the user can mark as used
    pub fn claimable(self) -> impl Iterator<Item = BenefitId> {
        self.benefits().filter(|id| id.control().is_some())
    }
}

/// How the user marks a credit as used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// used or unused, worth exactly the cap when used
    Toggle,
    /// any amount between 0 and the cap
    Range,
}

/// The ten tracked credits
///
/// The declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BenefitId {
    AmexDining = 0,
    AmexUber,
    AmexDunkin,
    AmexResy,
    AmexHotel,
    CsrTravel,
    CsrDiningTables,
    CsrDoordashNc,
    CsrEditHotel,
    CitiHotel,
}

pub const BENEFIT_COUNT: usize = 10;

/// Display reference of the yearly value of all credits, never checked
/// against the per-credit caps
pub const TOTAL_POSSIBLE: Amount = Amount((120 + 120 + 84 + 100) + (300 + 500 + 300 + 240) + 100);

impl BenefitId {
    pub fn all() -> impl Iterator<Item = BenefitId> {
        (0..BENEFIT_COUNT).filter_map(BenefitId::from_usize)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable textual identifier
    pub fn key(self) -> &'static str {
        use BenefitId::*;
        match self {
            AmexDining => "amex_dining",
            AmexUber => "amex_uber",
            AmexDunkin => "amex_dunkin",
            AmexResy => "amex_resy",
            AmexHotel => "amex_hotel",
            CsrTravel => "csr_travel",
            CsrDiningTables => "csr_dining_tables",
            CsrDoordashNc => "csr_doordash_nc",
            CsrEditHotel => "csr_edit_hotel",
            CitiHotel => "citi_hotel",
        }
    }

    pub fn label(self) -> &'static str {
        use BenefitId::*;
        match self {
            AmexDining => "Dining Credit",
            AmexUber => "Uber Cash",
            AmexDunkin => "Dunkin' Credit",
            AmexResy => "Resy Credit",
            AmexHotel => "The Hotel Collection",
            CsrTravel => "Annual Travel Credit",
            CsrDiningTables => "Exclusive Tables Dining Credit",
            CsrDoordashNc => "DoorDash Non-Food",
            CsrEditHotel => "'The Edit' Hotel Credit",
            CitiHotel => "Annual Hotel Benefit",
        }
    }

    pub fn card(self) -> Card {
        use BenefitId::*;
        match self {
            AmexDining | AmexUber | AmexDunkin | AmexResy | AmexHotel => Card::AmexGold,
            CsrTravel | CsrDiningTables | CsrDoordashNc | CsrEditHotel => Card::SapphireReserve,
            CitiHotel => Card::StrataPremier,
        }
    }

    /// Maximum claimable per reset window
    pub fn cap(self) -> Amount {
        use BenefitId::*;
        Amount(match self {
            AmexDining | AmexUber => 10,
            AmexDunkin => 7,
            AmexResy => 50,
            AmexHotel | CitiHotel => 100,
            CsrTravel => 300,
            CsrDiningTables => 150,
            CsrDoordashNc => 20,
            CsrEditHotel => 250,
        })
    }

    /// Value recorded when the credit is checked
    pub fn unit(self) -> Amount {
        self.cap()
    }

    pub fn cadence(self) -> Cadence {
        use BenefitId::*;
        match self {
            AmexDining | AmexUber | AmexDunkin | CsrDoordashNc => Cadence::Monthly,
            AmexResy | CsrDiningTables | CsrEditHotel => Cadence::SemiAnnual,
            AmexHotel | CsrTravel | CitiHotel => Cadence::Annual,
        }
    }

    /// `None` for credits that are tracked but have no input,
    /// their value stays at 0 for the whole session
    pub fn control(self) -> Option<Control> {
        use BenefitId::*;
        match self {
            AmexDining | AmexUber | AmexDunkin | CsrDoordashNc | CitiHotel => Some(Control::Toggle),
            AmexResy | CsrTravel | CsrDiningTables | CsrEditHotel => Some(Control::Range),
            AmexHotel => None,
        }
    }
}

impl fmt::Display for BenefitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for BenefitId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BenefitId::all()
            .find(|id| id.key() == s)
            .ok_or_else(|| LedgerError::UnknownBenefit(s.to_string()))
    }
}
