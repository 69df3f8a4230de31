//! Text rendering of a session
//!
//! Every number shown is recomputed from the ledger when the page is
//! formatted, the page holds nothing but a borrow of the session.

use std::fmt;

use crate::cli::session::Session;
use crate::lib::{
    benefit::{BenefitId, Card, Control},
    period::{current_half, days_remaining_in_month, Cadence},
    rollover::Policy,
};

pub struct Page<'s> {
    session: &'s Session,
}

impl<'s> Page<'s> {
    pub fn from(session: &'s Session) -> Self {
        Self { session }
    }

    fn checklist(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let today = self.session.today();
        let ledger = self.session.ledger();
        writeln!(f, "-- {} {} Checklist --", today.month().name(), today.year())?;
        writeln!(f, "You have {} days left in the month!", days_remaining_in_month(today))?;
        writeln!(f, "Monthly Use-it-or-Lose-it")?;
        for id in BenefitId::all().filter(|id| id.cadence() == Cadence::Monthly) {
            let mark = if ledger.is_used(id) { "x" } else { " " };
            writeln!(f, "  [{}] {}: {} ({})", mark, id.card().short(), id.label(), id.cap())?;
        }
        Ok(())
    }

    fn card(&self, f: &mut fmt::Formatter, card: Card) -> fmt::Result {
        writeln!(f, "-- {} --", card.name())?;
        if let Some(caption) = caption(card) {
            writeln!(f, "  ({})", caption)?;
        }
        if let Some(fee) = card.annual_fee() {
            writeln!(f, "  Annual Fee: {}", fee)?;
        }
        writeln!(f, "  Value Extracted (This Month/Period): {}", self.session.summary().card(card))?;
        for cadence in [Cadence::Monthly, Cadence::SemiAnnual, Cadence::Annual] {
            let mut ids = card.claimable().filter(|id| id.cadence() == cadence).peekable();
            if ids.peek().is_none() {
                continue;
            }
            writeln!(f, "  {}", match cadence {
                Cadence::Monthly => "Monthly Credits",
                Cadence::SemiAnnual => "Semi-Annual Credits",
                Cadence::Annual => "Annual Credits",
            })?;
            for id in ids {
                self.benefit(f, id)?;
            }
        }
        if card == Card::StrataPremier {
            writeln!(f, "  Earning Multipliers Reminder")?;
            writeln!(f, "    10x: Hotels/Car Rentals/Attractions (via Citi Travel)")?;
            writeln!(f, "    3x: Air Travel, Dining, Supermarkets, Gas/EV")?;
        }
        Ok(())
    }

    fn benefit(&self, f: &mut fmt::Formatter, id: BenefitId) -> fmt::Result {
        let used = self.session.ledger().get(id);
        if let Some(tip) = tip(id) {
            writeln!(f, "    Tip: {}", tip)?;
        }
        match id.control() {
            None => (),
            Some(Control::Toggle) => {
                let status = if used.nonzero() { "Used" } else { "Unused" };
                writeln!(f, "    {} ({}): {}", id.label(), id.cap(), status)?;
                if id == BenefitId::CitiHotel {
                    if used.nonzero() {
                        writeln!(f, "      Benefit Utilized! You saved {}.", used)?;
                    } else {
                        writeln!(f, "      Not yet used. Plan a trip!")?;
                    }
                }
            }
            Some(Control::Range) => {
                let window = match id.cadence() {
                    Cadence::Monthly => self.session.today().month().name().to_string(),
                    Cadence::SemiAnnual => current_half(self.session.today()).to_string(),
                    Cadence::Annual => self.session.today().year().to_string(),
                };
                writeln!(
                    f,
                    "    {}: used {} of {} available for {}",
                    id.label(), used, id.cap(), window,
                )?;
                writeln!(f, "      {} {} remaining", bar(used.ratio(id.cap())), id.cap() - used)?;
            }
        }
        Ok(())
    }

    fn totals(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let summary = self.session.summary();
        writeln!(f, "-- Total {} Value Realized --", self.session.today().year())?;
        writeln!(f, "  Total Value Marked as Used (Current Period): {}", summary.current())?;
        writeln!(
            f,
            "  Projected Annual Value: {} of {} possible",
            summary.projected(), summary.possible(),
        )?;
        writeln!(f, "  {}", bar(summary.projected().ratio(summary.possible())))?;
        match self.session.policy() {
            Policy::Manual => writeln!(f, "  Note: this tracker resets when the session ends, ended windows are never cleared."),
            Policy::Automatic => writeln!(f, "  Note: this tracker resets when the session ends, ended windows are cleared automatically."),
        }
    }
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let year = self.session.today().year();
        writeln!(f, "=== {} Credit Card Optimizer ===", year)?;
        writeln!(
            f,
            "Track your Amex Gold, Chase Sapphire Reserve, and Citi Strata Premier benefits for {}.",
            year,
        )?;
        writeln!(f)?;
        self.checklist(f)?;
        for card in Card::all() {
            writeln!(f)?;
            self.card(f, card)?;
        }
        writeln!(f)?;
        self.totals(f)
    }
}

/// One-line recap printed after every change
pub struct StatusLine<'s> {
    session: &'s Session,
}

impl<'s> StatusLine<'s> {
    pub fn from(session: &'s Session) -> Self {
        Self { session }
    }
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let summary = self.session.summary();
        write!(f, "[{}]", self.session.today())?;
        for card in Card::all() {
            write!(f, " {} {}", card.short(), summary.card(card))?;
        }
        write!(
            f,
            " | current {} | projected {} / {}",
            summary.current(), summary.projected(), summary.possible(),
        )
    }
}

pub const HELP: &str = "\
Commands:
  check <benefit>          mark a credit as used
  uncheck <benefit>        mark a credit as unused
  set <benefit> <amount>   record a partial amount in whole dollars
  clear <benefit>          same as 'set <benefit> 0'
  reset                    forget every value
  show                     print the full page
  date <YYYY-Mmm-DD>       look at the tracker on another day
  rollover                 list (or clear, with --auto-reset) values from ended windows
  help                     this message
  quit                     leave the session";

fn caption(card: Card) -> Option<&'static str> {
    match card {
        Card::SapphireReserve => Some("Includes 'The Edit' and 'Exclusive Tables' benefits new for 2025/26."),
        Card::StrataPremier => Some("Formerly Citi Premier"),
        Card::AmexGold => None,
    }
}

fn tip(id: BenefitId) -> Option<&'static str> {
    use BenefitId::*;
    match id {
        AmexUber => Some("Use Uber Cash for pickup orders to avoid fees."),
        CsrTravel => Some("Travel purchases are credited automatically."),
        CsrEditHotel => Some("$250 credit for Jan-Jun, and another $250 for Jul-Dec."),
        CsrDiningTables => Some("$150 credit for Jan-Jun, $150 for Jul-Dec at specific restaurants."),
        CitiHotel => Some("$100 off a single hotel stay of $500+ (excluding taxes/fees) booked via Citi Travel."),
        _ => None,
    }
}

fn bar(ratio: f64) -> String {
    let width = 20;
    let full = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(full.min(width)), "-".repeat(width - full.min(width)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        benefit::{Amount, BenefitId::*},
        date::{Date, Month::*},
    };
    use crate::load::parse::Command;

    fn session() -> Session {
        Session::new(Date::from(2026, Oct, 18).unwrap(), Policy::Manual)
    }

    #[test]
    fn progress_bars() {
        assert_eq!(bar(0.0), "[--------------------]");
        assert_eq!(bar(0.5), "[##########----------]");
        assert_eq!(bar(1.0), "[####################]");
    }

    #[test]
    fn empty_page() {
        let s = session();
        let page = format!("{}", Page::from(&s));
        assert!(page.contains("=== 2026 Credit Card Optimizer ==="));
        assert!(page.contains("-- October 2026 Checklist --"));
        assert!(page.contains("You have 13 days left in the month!"));
        assert!(page.contains("  [ ] Amex Gold: Dining Credit ($10)"));
        assert!(page.contains("  [ ] CSR: DoorDash Non-Food ($20)"));
        assert!(page.contains("Annual Fee: $325"));
        assert!(page.contains("Not yet used. Plan a trip!"));
        assert!(!page.contains("The Hotel Collection"));
        assert!(page.contains("Total Value Marked as Used (Current Period): $0"));
        assert!(page.contains("Projected Annual Value: $0 of $1864 possible"));
    }

    #[test]
    fn page_follows_ledger() {
        let mut s = session();
        for cmd in [
            Command::Check(AmexDining),
            Command::Set(AmexResy, Amount(25)),
            Command::Set(CsrTravel, Amount(120)),
            Command::Check(CitiHotel),
        ] {
            s.apply(cmd).unwrap();
        }
        let page = format!("{}", Page::from(&s));
        assert!(page.contains("  [x] Amex Gold: Dining Credit ($10)"));
        assert!(page.contains("Dining Credit ($10): Used"));
        assert!(page.contains("Resy Credit: used $25 of $50 available for Second Half"));
        assert!(page.contains("[##########----------] $25 remaining"));
        assert!(page.contains("Annual Travel Credit: used $120 of $300 available for 2026"));
        assert!(page.contains("$180 remaining"));
        assert!(page.contains("Benefit Utilized! You saved $100."));
        assert!(page.contains("Total Value Marked as Used (Current Period): $255"));
        assert!(page.contains("Projected Annual Value: $390 of $1864 possible"));
    }

    #[test]
    fn status_line() {
        let mut s = session();
        s.apply(Command::Check(AmexUber)).unwrap();
        assert_eq!(
            format!("{}", StatusLine::from(&s)),
            "[2026-Oct-18] Amex Gold $10 CSR $0 Citi $0 | current $10 | projected $120 / $1864",
        );
    }
}
