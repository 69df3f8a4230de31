//! Replies to commands, for scripts and interactive sessions alike
//!
//! Everything is written to a generic `io::Write` so that the exact
//! output of a script can be checked without a terminal.

use std::io::{self, Write};

use crate::cli::{
    page::{Page, StatusLine, HELP},
    session::{Reply, Session},
    table::Table,
};
use crate::lib::{benefit::Card, ledger::LedgerError};
use crate::load::{
    error::{Error, Record},
    parse::Command,
};

/// Apply every command of a script in order
///
/// Rejected commands are reported as warnings once the whole script has run,
/// followed by the final page unless `quiet` is set or the last command
/// already printed it.
pub fn run<W: Write>(session: &mut Session, commands: Vec<Command>, quiet: bool, out: &mut W) -> io::Result<()> {
    let mut errs = Record::new();
    let mut shown = false;
    for command in commands {
        match session.apply(command) {
            Ok(Reply::Quit) => break,
            Ok(reply) => {
                shown = reply == Reply::Show;
                respond(session, reply, false, out)?;
            }
            Err(e) => {
                shown = false;
                rejection(command, &e).register(&mut errs);
            }
        }
    }
    if !errs.is_empty() {
        write!(out, "{}", errs)?;
    }
    if !quiet && !shown {
        show(session, out)?;
    }
    Ok(())
}

/// Print whatever the front-end owes the user after a command
pub fn respond<W: Write>(session: &Session, reply: Reply, interactive: bool, out: &mut W) -> io::Result<()> {
    match reply {
        Reply::Updated => {
            if interactive {
                writeln!(out, "{}", StatusLine::from(session))?;
            }
        }
        Reply::Moved(expired) => {
            for id in expired {
                writeln!(out, "{} was cleared, its {} ended", id, id.cadence())?;
            }
            if interactive {
                writeln!(out, "{}", StatusLine::from(session))?;
            }
        }
        Reply::Stale { ids, cleared } => {
            if ids.is_empty() && interactive {
                writeln!(out, "Every value belongs to the current window")?;
            }
            for id in ids {
                if cleared {
                    writeln!(out, "{} was cleared, its {} ended", id, id.cadence())?;
                } else {
                    writeln!(out, "{} still holds {} from an ended {}", id, session.ledger().get(id), id.cadence())?;
                }
            }
        }
        Reply::Show => show(session, out)?,
        Reply::Help => writeln!(out, "{}", HELP)?,
        Reply::Quit => (),
    }
    Ok(())
}

pub fn show<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", Page::from(session))?;
    writeln!(out, "{}", Table::from(session.ledger()).with_title("Benefits"))
}

/// Warning for a command the ledger refused
pub fn rejection(command: Command, err: &LedgerError) -> Error {
    tracing::warn!(?command, %err, "command rejected");
    let report = Error::new("Command rejected")
        .nonfatal()
        .with_text(err)
        .with_text("the ledger was left unchanged");
    match err {
        LedgerError::OutOfRange { id, cap, .. } => {
            report.with_hint(format!("{} accepts amounts from $0 to {}", id, cap))
        }
        LedgerError::UnknownBenefit(_) | LedgerError::NoInput(_) => report.with_hint(format!(
            "benefits that can be marked as used are {}",
            Card::all().flat_map(Card::claimable).map(|id| id.key()).collect::<Vec<_>>().join(", "),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        benefit::{Amount, BenefitId::*},
        date::{Date, Month::*},
        rollover::Policy,
    };

    const TITLE: &str = "=== 2026 Credit Card Optimizer ===";

    macro_rules! output {
        ( $quiet:expr, $( $cmd:expr ),* ) => {{
            let mut session = Session::new(Date::from(2026, Oct, 18).unwrap(), Policy::Manual);
            let mut out = Vec::new();
            run(&mut session, vec![ $( $cmd ),* ], $quiet, &mut out).unwrap();
            String::from_utf8(out).unwrap()
        }}
    }

    #[test]
    fn final_page_once() {
        let text = output!(false, Command::Check(AmexDining));
        assert_eq!(text.matches(TITLE).count(), 1);
        assert!(text.contains("[x] Amex Gold: Dining Credit ($10)"));
    }

    #[test]
    fn trailing_show_is_not_repeated() {
        let text = output!(false, Command::Check(AmexDining), Command::Show);
        assert_eq!(text.matches(TITLE).count(), 1);
        let text = output!(false, Command::Show, Command::Check(AmexUber));
        assert_eq!(text.matches(TITLE).count(), 2);
        let text = output!(false, Command::Show, Command::Quit);
        assert_eq!(text.matches(TITLE).count(), 1);
    }

    #[test]
    fn rejections_come_before_the_page() {
        let text = output!(false, Command::Set(CsrTravel, Amount(301)), Command::Check(AmexDining));
        let warning = text.find("Command rejected").unwrap();
        let page = text.find(TITLE).unwrap();
        assert!(warning < page);
        assert!(text.contains("csr_travel accepts amounts from $0 to $300"));
    }

    #[test]
    fn quiet_scripts_still_report() {
        let text = output!(true, Command::Check(AmexHotel));
        assert!(!text.contains(TITLE));
        assert!(text.contains("amex_hotel is tracked but cannot be marked as used"));
    }

    #[test]
    fn stale_listing() {
        let mut session = Session::new(Date::from(2026, Jun, 20).unwrap(), Policy::Manual);
        session.apply(Command::Set(AmexResy, Amount(50))).unwrap();
        session.apply(Command::Date(Date::from(2026, Jul, 1).unwrap())).unwrap();
        let mut out = Vec::new();
        let reply = session.apply(Command::Rollover).unwrap();
        respond(&session, reply, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "amex_resy still holds $50 from an ended half\n");
    }
}
