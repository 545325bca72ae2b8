//! Waitlist signups

pub mod data;
pub mod email;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::WaitlistServiceError;
pub use service::*;
