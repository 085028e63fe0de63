//! Testing utilities and fixtures
//!
//! This module provides fixture builders and a mock finance backend for
//! testing dashboard logic without a network.

pub mod fixtures;
pub mod logs;
pub mod mocks;

pub use fixtures::{org_context, private_org_context, AccountBuilder, PledgeBuilder};
pub use logs::LogCapture;
pub use mocks::{MockFinanceApi, MockFinanceApiBuilder};
