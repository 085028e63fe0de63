//! Test fixtures and data builders
//!
//! This module provides test data builders and common fixtures for testing.

pub mod builders;

pub use builders::{AccountBuilder, PledgeBuilder};

use crate::core::context::{OrganizationContext, Visibility};
use crate::core::pledges::{Pledge, PledgeState};

/// Organization with one public and one private repository
pub fn org_context() -> OrganizationContext {
    OrganizationContext::new("acme", "github")
        .with_repository("widgets", Visibility::Public)
        .with_repository("internal", Visibility::Private)
}

/// Organization whose repositories are all private
pub fn private_org_context() -> OrganizationContext {
    OrganizationContext::new("stealth", "github").with_repository("core", Visibility::Private)
}

/// One pledge per known state, amounts 100, 200, ... in declaration order
pub fn pledge_per_state() -> Vec<Pledge> {
    [
        PledgeState::Pending,
        PledgeState::ConfirmationPending,
        PledgeState::Disputed,
        PledgeState::Paid,
        PledgeState::Refunded,
        PledgeState::ChargeDisputed,
    ]
    .into_iter()
    .zip(1u64..)
    .map(|(state, n)| {
        PledgeBuilder::new()
            .amount(n * 100)
            .issue_number(n)
            .state(state)
            .build()
    })
    .collect()
}
