//! Payout account state
//!
//! The account state is never stored. It is re-derived from the latest
//! account snapshot on every call, so it cannot drift from what the payout
//! provider reports.

mod topbar;

pub use topbar::{topbar_badge, TopbarBadge};

use super::context::OrganizationContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use uuid::Uuid;

/// A maintainer's connected payout destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutAccount {
    pub id: Uuid,
    /// Identifier at the payout provider
    pub stripe_id: String,
    /// True once provider onboarding is complete
    pub is_details_submitted: bool,
    /// Whether the current viewer may manage this account
    pub is_admin: bool,
    /// Available balance in cents, when the provider reports one
    #[serde(default)]
    pub balance: Option<u64>,
}

/// Which call-to-action the payout banner shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountState {
    NoAccount,
    OnboardingIncomplete,
    Ready,
}

/// Side-effecting action permitted in an [`AccountState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    StartOnboarding,
    ContinueOnboarding,
    OpenDashboard,
}

impl AccountState {
    pub fn action(self) -> AccountAction {
        match self {
            AccountState::NoAccount => AccountAction::StartOnboarding,
            AccountState::OnboardingIncomplete => AccountAction::ContinueOnboarding,
            AccountState::Ready => AccountAction::OpenDashboard,
        }
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountState::NoAccount => write!(f, "NoAccount"),
            AccountState::OnboardingIncomplete => write!(f, "OnboardingIncomplete"),
            AccountState::Ready => write!(f, "Ready"),
        }
    }
}

impl AccountAction {
    /// Onboarding actions request an onboarding link, the rest a dashboard link
    pub fn requests_onboarding_link(self) -> bool {
        matches!(
            self,
            AccountAction::StartOnboarding | AccountAction::ContinueOnboarding
        )
    }

    /// Lowercase phrase for user-facing messages
    pub fn describe(self) -> &'static str {
        match self {
            AccountAction::StartOnboarding => "start payout onboarding",
            AccountAction::ContinueOnboarding => "continue payout onboarding",
            AccountAction::OpenDashboard => "open the payout dashboard",
        }
    }
}

impl fmt::Display for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountAction::StartOnboarding => write!(f, "start_onboarding"),
            AccountAction::ContinueOnboarding => write!(f, "continue_onboarding"),
            AccountAction::OpenDashboard => write!(f, "open_dashboard"),
        }
    }
}

/// Account whose state drives the banner
///
/// Uses the first account. Organizations are expected to have a single
/// payout account; a warning is logged when that does not hold.
pub fn primary_account(accounts: &[PayoutAccount]) -> Option<&PayoutAccount> {
    if accounts.len() > 1 {
        warn!(
            count = accounts.len(),
            stripe_id = %accounts[0].stripe_id,
            "Multiple payout accounts found, using the first one"
        );
    }
    accounts.first()
}

/// Pure: derive the banner state from an account snapshot
pub fn derive_account_state(accounts: &[PayoutAccount]) -> AccountState {
    account_state(primary_account(accounts))
}

/// Pure: banner state for an already selected account
pub fn account_state(account: Option<&PayoutAccount>) -> AccountState {
    match account {
        None => AccountState::NoAccount,
        Some(account) if !account.is_details_submitted => AccountState::OnboardingIncomplete,
        Some(_) => AccountState::Ready,
    }
}

/// Pure: banner state, or `None` when the banner is suppressed
///
/// Organizations without public repositories cannot receive pledges, so
/// they never see the payout banner regardless of account state.
pub fn banner_state(org: &OrganizationContext, accounts: &[PayoutAccount]) -> Option<AccountState> {
    if !org.has_public_repositories() {
        return None;
    }
    Some(derive_account_state(accounts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Visibility;
    use crate::testing::fixtures::AccountBuilder;
    use crate::testing::LogCapture;

    #[test]
    fn test_derive_account_state() {
        assert_eq!(derive_account_state(&[]), AccountState::NoAccount);
        assert_eq!(
            derive_account_state(&[AccountBuilder::new().details_submitted(false).build()]),
            AccountState::OnboardingIncomplete
        );
        assert_eq!(
            derive_account_state(&[AccountBuilder::new().details_submitted(true).build()]),
            AccountState::Ready
        );
    }

    #[test]
    fn test_first_account_decides() {
        let accounts = vec![
            AccountBuilder::new().stripe_id("acct_1").details_submitted(false).build(),
            AccountBuilder::new().stripe_id("acct_2").details_submitted(true).build(),
        ];
        assert_eq!(
            derive_account_state(&accounts),
            AccountState::OnboardingIncomplete
        );
        assert_eq!(primary_account(&accounts).unwrap().stripe_id, "acct_1");
    }

    #[test]
    fn test_multiple_accounts_are_logged_once() {
        let logs = LogCapture::new();
        let _guard = logs.set_default();

        let single = [AccountBuilder::new().build()];
        derive_account_state(&single);
        assert_eq!(logs.count("Multiple payout accounts"), 0);

        let accounts = [
            AccountBuilder::new().stripe_id("acct_1").build(),
            AccountBuilder::new().stripe_id("acct_2").build(),
        ];
        derive_account_state(&accounts);
        assert_eq!(logs.count("Multiple payout accounts"), 1);
        assert!(logs.contents().contains("acct_1"));
    }

    #[test]
    fn test_account_state_for_selected_account() {
        assert_eq!(account_state(None), AccountState::NoAccount);
        let ready = AccountBuilder::new().details_submitted(true).build();
        assert_eq!(account_state(Some(&ready)), AccountState::Ready);
    }

    #[test]
    fn test_actions_per_state() {
        assert_eq!(AccountState::NoAccount.action(), AccountAction::StartOnboarding);
        assert_eq!(
            AccountState::OnboardingIncomplete.action(),
            AccountAction::ContinueOnboarding
        );
        assert_eq!(AccountState::Ready.action(), AccountAction::OpenDashboard);

        assert!(AccountAction::StartOnboarding.requests_onboarding_link());
        assert!(AccountAction::ContinueOnboarding.requests_onboarding_link());
        assert!(!AccountAction::OpenDashboard.requests_onboarding_link());
    }

    #[test]
    fn test_banner_suppressed_without_public_repos() {
        let private_org = OrganizationContext::new("acme", "github")
            .with_repository("secret", Visibility::Private);
        assert_eq!(banner_state(&private_org, &[]), None);
        assert_eq!(
            banner_state(&private_org, &[AccountBuilder::new().build()]),
            None
        );

        let public_org = private_org.with_repository("widgets", Visibility::Public);
        assert_eq!(
            banner_state(&public_org, &[]),
            Some(AccountState::NoAccount)
        );
    }
}
