//! Implementations that are useful accross the whole project
//!
//! Benefit catalog, date management, the ledger and its aggregation

pub mod benefit;
pub mod date;
pub mod ledger;
pub mod period;
pub mod rollover;
pub mod summary;
