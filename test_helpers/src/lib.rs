//! Test helpers shared across crates.
//!
//! [`figment`] wraps `figment::Jail` so environment-driven option tests can
//! run in isolation, and [`text`] converts literals written in behavioural
//! step text into JSON values.

pub mod figment;
pub mod text;
