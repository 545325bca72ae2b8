//! Waitlist handlers.

pub(crate) mod count;
pub(crate) mod errors;
pub(crate) mod join;
