//! Mock finance backend for testing

use crate::abstractions::{FinanceApi, PayoutLink, PledgeRecord};
use crate::core::accounts::{AccountAction, PayoutAccount};
use crate::core::context::OrganizationContext;
use crate::error::{ErrorCode, FinanceError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const MOCK_ONBOARDING_URL: &str = "https://connect.stripe.com/setup/mock";
pub const MOCK_DASHBOARD_URL: &str = "https://dashboard.stripe.com/mock";

/// Calls observed by a [`MockFinanceApi`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub list_pledges: usize,
    pub list_accounts: usize,
    pub onboarding_links: usize,
    pub dashboard_links: usize,
    /// Onboarding requests made without an existing account
    pub accounts_created: usize,
    /// Stripe id of the account named in the latest link request
    pub last_stripe_id: Option<String>,
}

/// Builder for creating configured mock finance backends
pub struct MockFinanceApiBuilder {
    pledges: Vec<PledgeRecord>,
    accounts: Vec<PayoutAccount>,
    onboarding_url: Url,
    dashboard_url: Url,
    link_error: Option<String>,
    listing_error: Option<String>,
    link_delay: Option<Duration>,
}

impl Default for MockFinanceApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFinanceApiBuilder {
    pub fn new() -> Self {
        Self {
            pledges: Vec::new(),
            accounts: Vec::new(),
            onboarding_url: Url::parse(MOCK_ONBOARDING_URL).unwrap(),
            dashboard_url: Url::parse(MOCK_DASHBOARD_URL).unwrap(),
            link_error: None,
            listing_error: None,
            link_delay: None,
        }
    }

    pub fn with_pledges(mut self, pledges: Vec<PledgeRecord>) -> Self {
        self.pledges = pledges;
        self
    }

    pub fn with_accounts(mut self, accounts: Vec<PayoutAccount>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_onboarding_url(mut self, url: &str) -> Self {
        self.onboarding_url = Url::parse(url).unwrap();
        self
    }

    pub fn with_dashboard_url(mut self, url: &str) -> Self {
        self.dashboard_url = Url::parse(url).unwrap();
        self
    }

    /// Every link request fails with this message
    pub fn failing_links(mut self, message: &str) -> Self {
        self.link_error = Some(message.to_string());
        self
    }

    /// Pledge and account listing fail with this message
    pub fn failing_listing(mut self, message: &str) -> Self {
        self.listing_error = Some(message.to_string());
        self
    }

    /// Delay each link response, for cancellation tests
    pub fn with_link_delay(mut self, delay: Duration) -> Self {
        self.link_delay = Some(delay);
        self
    }

    pub fn build(self) -> MockFinanceApi {
        MockFinanceApi {
            pledges: self.pledges,
            accounts: self.accounts,
            onboarding_url: self.onboarding_url,
            dashboard_url: self.dashboard_url,
            link_error: self.link_error,
            listing_error: self.listing_error,
            link_delay: self.link_delay,
            calls: Arc::new(Mutex::new(MockCalls::default())),
        }
    }
}

/// Mock implementation of FinanceApi for testing
pub struct MockFinanceApi {
    pledges: Vec<PledgeRecord>,
    accounts: Vec<PayoutAccount>,
    onboarding_url: Url,
    dashboard_url: Url,
    link_error: Option<String>,
    listing_error: Option<String>,
    link_delay: Option<Duration>,
    calls: Arc<Mutex<MockCalls>>,
}

impl Default for MockFinanceApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFinanceApi {
    pub fn new() -> Self {
        MockFinanceApiBuilder::new().build()
    }

    pub fn builder() -> MockFinanceApiBuilder {
        MockFinanceApiBuilder::new()
    }

    pub fn calls(&self) -> MockCalls {
        self.calls.lock().unwrap().clone()
    }

    fn listing_result<T: Clone>(&self, items: &[T]) -> Result<Vec<T>> {
        match &self.listing_error {
            Some(message) => Err(FinanceError::api_with_status(
                ErrorCode::API_BAD_STATUS,
                message.clone(),
                Some(503),
            )),
            None => Ok(items.to_vec()),
        }
    }

    async fn link(&self, action: AccountAction, url: &Url) -> Result<PayoutLink> {
        if let Some(delay) = self.link_delay {
            tokio::time::sleep(delay).await;
        }

        match &self.link_error {
            Some(message) => Err(FinanceError::payout_link(
                ErrorCode::PAYOUT_LINK_REQUEST_FAILED,
                action,
                message.clone(),
            )),
            None => Ok(PayoutLink { url: url.clone() }),
        }
    }
}

#[async_trait]
impl FinanceApi for MockFinanceApi {
    async fn list_pledges(&self, _org: &OrganizationContext) -> Result<Vec<PledgeRecord>> {
        self.calls.lock().unwrap().list_pledges += 1;
        self.listing_result(&self.pledges)
    }

    async fn list_accounts(&self, _org: &OrganizationContext) -> Result<Vec<PayoutAccount>> {
        self.calls.lock().unwrap().list_accounts += 1;
        self.listing_result(&self.accounts)
    }

    async fn onboarding_link(
        &self,
        _org: &OrganizationContext,
        account: Option<&PayoutAccount>,
    ) -> Result<PayoutLink> {
        let action = {
            let mut calls = self.calls.lock().unwrap();
            calls.onboarding_links += 1;
            calls.last_stripe_id = account.map(|a| a.stripe_id.clone());
            if account.is_none() {
                calls.accounts_created += 1;
                AccountAction::StartOnboarding
            } else {
                AccountAction::ContinueOnboarding
            }
        };

        self.link(action, &self.onboarding_url).await
    }

    async fn dashboard_link(
        &self,
        _org: &OrganizationContext,
        account: &PayoutAccount,
    ) -> Result<PayoutLink> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.dashboard_links += 1;
            calls.last_stripe_id = Some(account.stripe_id.clone());
        }

        self.link(AccountAction::OpenDashboard, &self.dashboard_url)
            .await
    }
}
