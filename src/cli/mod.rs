//! Terminal front-end: the session adapter and its renderings

pub mod page;
pub mod plot;
pub mod script;
pub mod session;
pub mod table;
