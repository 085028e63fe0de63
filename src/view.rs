//! Finance view loading
//!
//! Imperative shell around the pure core: fetch a snapshot, validate it at
//! the boundary, then hand it to the classifier and account state logic.

use crate::abstractions::{validate_pledges, FinanceApi};
use crate::core::accounts::{banner_state, primary_account, AccountState, PayoutAccount};
use crate::core::context::OrganizationContext;
use crate::core::pledges::{classify, summarize, Classification, FinanceSummary, Pledge, ViewMode};
use crate::error::Result;
use tracing::debug;

/// Everything the finance dashboard renders for one organization
#[derive(Debug, Clone)]
pub struct FinanceView {
    pub org: OrganizationContext,
    pub mode: ViewMode,
    pub pledges: Vec<Pledge>,
    pub accounts: Vec<PayoutAccount>,
    pub summary: FinanceSummary,
    /// `None` when the payout banner is suppressed
    pub banner: Option<AccountState>,
}

impl FinanceView {
    /// Build a view from an already validated snapshot
    pub fn from_snapshot(
        org: OrganizationContext,
        mode: ViewMode,
        pledges: Vec<Pledge>,
        accounts: Vec<PayoutAccount>,
    ) -> Self {
        let summary = summarize(&pledges);
        let banner = banner_state(&org, &accounts);
        Self {
            org,
            mode,
            pledges,
            accounts,
            summary,
            banner,
        }
    }

    /// Buckets for the active mode, recomputed on each call
    pub fn classification(&self) -> Classification<'_> {
        classify(&self.pledges, self.mode)
    }

    /// Same snapshot viewed under another tab
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn primary_account(&self) -> Option<&PayoutAccount> {
        primary_account(&self.accounts)
    }
}

/// Fetch pledges and accounts for `org` and assemble a [`FinanceView`]
///
/// A pledge with a negative amount fails the whole load with a
/// validation error rather than being skipped.
pub async fn load_finance_view(
    api: &dyn FinanceApi,
    org: &OrganizationContext,
    mode: ViewMode,
) -> Result<FinanceView> {
    debug!(org = %org.name, %mode, "Loading finance view");

    let (records, accounts) = tokio::try_join!(api.list_pledges(org), api.list_accounts(org))?;
    let pledges = validate_pledges(records)?;

    debug!(
        org = %org.name,
        pledges = pledges.len(),
        accounts = accounts.len(),
        "Finance snapshot fetched"
    );

    Ok(FinanceView::from_snapshot(
        org.clone(),
        mode,
        pledges,
        accounts,
    ))
}
