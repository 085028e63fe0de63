//! Payout account actions
//!
//! The only side-effecting part of the dashboard logic: asking the payout
//! provider for an onboarding or dashboard link. Each call is single-shot,
//! never retried, and tied to the lifetime of the view that triggered it.

use crate::abstractions::FinanceApi;
use crate::core::accounts::{
    account_state, primary_account, AccountAction, AccountState, PayoutAccount,
};
use crate::core::context::OrganizationContext;
use crate::error::{ErrorCode, FinanceError, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};
use url::Url;

/// Owned by the view that triggers actions; dropping it cancels them
pub struct ViewGuard {
    tx: watch::Sender<bool>,
}

impl ViewGuard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Handle passed to in-flight requests
    pub fn lifetime(&self) -> ViewLifetime {
        ViewLifetime {
            rx: self.tx.subscribe(),
            _keepalive: None,
        }
    }

    /// Cancel everything started under this guard
    pub fn close(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for ViewGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation side of a [`ViewGuard`]
#[derive(Clone)]
pub struct ViewLifetime {
    rx: watch::Receiver<bool>,
    _keepalive: Option<Arc<watch::Sender<bool>>>,
}

impl ViewLifetime {
    /// A lifetime that is never cancelled
    pub fn detached() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            _keepalive: Some(Arc::new(tx)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the owning view is closed or dropped
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Request the redirect URL for the action `state` permits
///
/// `account` must be present for `OnboardingIncomplete` and `Ready`; it is
/// ignored for `NoAccount`, where onboarding creates the account. Any
/// provider failure comes back as [`FinanceError::PayoutLinkUnavailable`].
/// If `lifetime` ends first the result is [`FinanceError::Cancelled`] and
/// no URL is returned.
pub async fn perform_account_action(
    api: &dyn FinanceApi,
    org: &OrganizationContext,
    state: AccountState,
    account: Option<&PayoutAccount>,
    lifetime: &ViewLifetime,
) -> Result<Url> {
    let action = state.action();
    let account = match (action, account) {
        (AccountAction::StartOnboarding, _) => None,
        (_, Some(account)) => Some(account),
        (_, None) => {
            return Err(FinanceError::validation_with_code(
                ErrorCode::VALIDATION_MISSING_ACCOUNT,
                format!("state {} requires a payout account", state),
                Some("account".to_string()),
            ))
        }
    };

    if lifetime.is_cancelled() {
        return Err(FinanceError::cancelled(format!(
            "view closed before {} started",
            action
        )));
    }

    debug!(org = %org.name, %state, %action, "Performing payout account action");

    let request = match (action, account) {
        (AccountAction::OpenDashboard, Some(account)) => api.dashboard_link(org, account),
        (_, account) => api.onboarding_link(org, account),
    };

    let result = tokio::select! {
        biased;
        _ = lifetime.cancelled() => {
            info!(org = %org.name, %action, "View closed, dropping payout link request");
            return Err(FinanceError::cancelled(format!("view closed during {}", action)));
        }
        result = request => result,
    };

    match result {
        Ok(link) => {
            info!(org = %org.name, %action, "Payout link ready");
            Ok(link.url)
        }
        Err(e) => {
            let err = into_link_error(action, e);
            error!(org = %org.name, %action, error = %err, "Payout link unavailable");
            Err(err)
        }
    }
}

/// Derive the state from a fresh snapshot and perform its action
pub async fn perform_banner_action(
    api: &dyn FinanceApi,
    org: &OrganizationContext,
    accounts: &[PayoutAccount],
    lifetime: &ViewLifetime,
) -> Result<Url> {
    let account = primary_account(accounts);
    perform_account_action(api, org, account_state(account), account, lifetime).await
}

fn into_link_error(action: AccountAction, err: FinanceError) -> FinanceError {
    match err {
        FinanceError::PayoutLinkUnavailable { .. } | FinanceError::Cancelled { .. } => err,
        other => FinanceError::payout_link(
            ErrorCode::PAYOUT_LINK_GENERIC,
            action,
            other.to_string(),
        )
        .with_source(other),
    }
}
