//! Mock implementations for testing
//!
//! This module provides mock implementations for external dependencies.

pub mod finance_api;

pub use finance_api::{
    MockCalls, MockFinanceApi, MockFinanceApiBuilder, MOCK_DASHBOARD_URL, MOCK_ONBOARDING_URL,
};
