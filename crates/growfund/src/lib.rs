//! Savings-linked microloans for small business owners.
//!
//! Members commit to a weekly or monthly savings plan; consistent saving
//! raises a behavioral score and unlocks Boost and Ascend loans whose ceilings
//! scale with the amount saved. Members can also issue invoices to their own
//! clients.

pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod lending;
pub mod members;
pub mod money;
pub mod repository;
pub mod savings;
pub mod telemetry;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;
