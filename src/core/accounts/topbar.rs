//! Account badge in the dashboard topbar

use super::PayoutAccount;
use crate::core::context::OrganizationContext;

/// What the topbar shows for the organization's payout account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopbarBadge<'a> {
    /// Accounts are still being fetched
    Loading,
    /// Prompt to set up payouts; `stripe_id` is set when an unfinished
    /// account already exists
    Onboarding { stripe_id: Option<&'a str> },
    /// Payouts are set up, or the viewer cannot manage the account
    Balance(&'a PayoutAccount),
    Hidden,
}

/// Pure: decide the topbar badge
///
/// `accounts` is `None` while the account list is loading.
pub fn topbar_badge<'a>(
    org: &OrganizationContext,
    accounts: Option<&'a [PayoutAccount]>,
) -> TopbarBadge<'a> {
    let has_public_repos = org.has_public_repositories();

    match accounts {
        None if has_public_repos => TopbarBadge::Loading,
        Some([account]) => {
            if !account.is_details_submitted && account.is_admin {
                TopbarBadge::Onboarding {
                    stripe_id: Some(account.stripe_id.as_str()),
                }
            } else {
                TopbarBadge::Balance(account)
            }
        }
        _ if has_public_repos => TopbarBadge::Onboarding { stripe_id: None },
        _ => TopbarBadge::Hidden,
    }
}
