//! Core business logic for crowdstock.
//!
//! The rule engine of the marketplace: daily upload quotas, the strike/ban
//! engine, percentile badge tiering, deletion-penalty economics, review
//! aggregation, the XP rollup, withdrawals, contests, and referrals. Each
//! concern is a service composed from `crowdstock-db` repositories; the
//! external request layer wires them up and calls in.

pub mod services;

pub use services::*;
