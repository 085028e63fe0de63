//! Test data builders for pledges and payout accounts

use crate::abstractions::PledgeRecord;
use crate::core::accounts::PayoutAccount;
use crate::core::pledges::{IssueRef, Pledge, PledgeState};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Builder for creating test pledges
///
/// Defaults to a 10.00 `pending` pledge on `acme/widgets#1`.
pub struct PledgeBuilder {
    id: Uuid,
    amount: i64,
    state: PledgeState,
    issue: IssueRef,
    created_at: Option<DateTime<Utc>>,
}

impl Default for PledgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PledgeBuilder {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: 1_000,
            state: PledgeState::Pending,
            issue: IssueRef {
                organization: "acme".to_string(),
                repository: "widgets".to_string(),
                number: 1,
            },
            created_at: None,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn amount(mut self, cents: u64) -> Self {
        self.amount = i64::try_from(cents).unwrap_or(i64::MAX);
        self
    }

    /// Raw wire amount, allowing negative values for boundary tests
    pub fn raw_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn state(mut self, state: PledgeState) -> Self {
        self.state = state;
        self
    }

    pub fn issue_number(mut self, number: u64) -> Self {
        self.issue.number = number;
        self
    }

    pub fn repository(mut self, repository: &str) -> Self {
        self.issue.repository = repository.to_string();
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Build a validated pledge; panics on a negative raw amount
    pub fn build(self) -> Pledge {
        Pledge::try_from(self.build_record()).unwrap()
    }

    /// Build the unvalidated wire record
    pub fn build_record(self) -> PledgeRecord {
        PledgeRecord {
            id: self.id,
            amount: self.amount,
            state: self.state,
            issue: self.issue,
            created_at: self.created_at,
        }
    }
}

/// Builder for creating test payout accounts
///
/// Defaults to an admin-managed account that has not finished onboarding.
pub struct AccountBuilder {
    account: PayoutAccount,
}

impl Default for AccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountBuilder {
    pub fn new() -> Self {
        Self {
            account: PayoutAccount {
                id: Uuid::new_v4(),
                stripe_id: "acct_test".to_string(),
                is_details_submitted: false,
                is_admin: true,
                balance: None,
            },
        }
    }

    pub fn stripe_id(mut self, stripe_id: &str) -> Self {
        self.account.stripe_id = stripe_id.to_string();
        self
    }

    pub fn details_submitted(mut self, submitted: bool) -> Self {
        self.account.is_details_submitted = submitted;
        self
    }

    pub fn admin(mut self, is_admin: bool) -> Self {
        self.account.is_admin = is_admin;
        self
    }

    pub fn balance(mut self, cents: u64) -> Self {
        self.account.balance = Some(cents);
        self
    }

    pub fn build(self) -> PayoutAccount {
        self.account
    }
}
