//! Abstraction layers for external dependencies
//!
//! This module provides the trait-based seam to the finance backend and
//! payout provider, so the dashboard logic can be tested with a mock
//! and run against the real HTTP API.

pub mod finance_api;
pub mod http;

pub use finance_api::{validate_pledges, FinanceApi, PayoutLink, PledgeRecord};
pub use http::RealFinanceApi;
