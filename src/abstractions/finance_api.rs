//! Finance backend abstraction layer
//!
//! Provides the trait describing the pledge-listing, account-listing and
//! payout-link collaborators, plus the wire shape of a pledge and its
//! boundary validation.

use crate::core::accounts::PayoutAccount;
use crate::core::context::OrganizationContext;
use crate::core::pledges::{IssueRef, Pledge, PledgeState};
use crate::error::{ErrorCode, FinanceError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Pledge as delivered by the backend, before validation
///
/// `amount` is signed so a negative value can be reported as a
/// validation error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeRecord {
    pub id: Uuid,
    pub amount: i64,
    pub state: PledgeState,
    pub issue: IssueRef,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<PledgeRecord> for Pledge {
    type Error = FinanceError;

    fn try_from(record: PledgeRecord) -> Result<Self> {
        let amount = u64::try_from(record.amount).map_err(|_| {
            FinanceError::validation_with_code(
                ErrorCode::VALIDATION_NEGATIVE_AMOUNT,
                format!("pledge {} has negative amount {}", record.id, record.amount),
                Some("amount".to_string()),
            )
        })?;

        Ok(Pledge {
            id: record.id,
            amount,
            state: record.state,
            issue_ref: record.issue,
            created_at: record.created_at,
        })
    }
}

/// Validate a whole snapshot; the first invalid record fails it
pub fn validate_pledges(records: Vec<PledgeRecord>) -> Result<Vec<Pledge>> {
    records.into_iter().map(Pledge::try_from).collect()
}

/// Redirect target issued by the payout provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutLink {
    pub url: Url,
}

/// Trait for finance backend operations providing testable abstraction
///
/// Link requests are single-shot: implementations must not retry, and a
/// failed request surfaces as [`FinanceError::PayoutLinkUnavailable`].
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Pledges made to the organization's issues
    async fn list_pledges(&self, org: &OrganizationContext) -> Result<Vec<PledgeRecord>>;

    /// Payout accounts attached to the organization
    async fn list_accounts(&self, org: &OrganizationContext) -> Result<Vec<PayoutAccount>>;

    /// Provider-hosted onboarding link
    ///
    /// With `account == None` a payout account is created first and the
    /// link is issued for the new account.
    async fn onboarding_link(
        &self,
        org: &OrganizationContext,
        account: Option<&PayoutAccount>,
    ) -> Result<PayoutLink>;

    /// Provider-hosted dashboard link for a fully onboarded account
    async fn dashboard_link(
        &self,
        org: &OrganizationContext,
        account: &PayoutAccount,
    ) -> Result<PayoutLink>;
}
