//! Waitline Domain Concerns

pub mod waitlist;
