//! HTTP implementation of the finance backend

use super::finance_api::{FinanceApi, PayoutLink, PledgeRecord};
use crate::config::FinanceConfig;
use crate::core::accounts::{AccountAction, PayoutAccount};
use crate::core::context::OrganizationContext;
use crate::error::{ErrorCode, FinanceError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

#[derive(Debug, Serialize)]
struct CreateAccountRequest<'a> {
    account_type: &'a str,
}

/// Link response body; the URL is validated after decoding
#[derive(Debug, Deserialize)]
struct LinkResponse {
    url: String,
}

/// Finance backend client over JSON/HTTP
pub struct RealFinanceApi {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl RealFinanceApi {
    /// Create a new client from validated configuration
    pub fn new(config: &FinanceConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                FinanceError::config_with_code(
                    ErrorCode::CONFIG_HTTP_CLIENT,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            api_token: config.api_token.clone(),
        })
    }

    /// `{base}/api/v1/{platform}/{org}/{segments...}`, each segment encoded
    fn endpoint(&self, org: &OrganizationContext, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FinanceError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("api_base_url '{}' cannot be used as a base", self.base_url),
                )
            })?
            .pop_if_empty()
            .extend(["api", "v1", org.platform.as_str(), org.name.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.authorize(self.client.get(url)).send().await?;
        Self::decode(response).await
    }

    /// Map non-success statuses to API errors, then decode the body
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        match status {
            s if s.is_success() => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FinanceError::api_with_status(
                ErrorCode::API_UNAUTHORIZED,
                "Finance API rejected the credentials",
                Some(status.as_u16()),
            )),
            _ => {
                let error_text = response.text().await.unwrap_or_default();
                Err(FinanceError::api_with_status(
                    ErrorCode::API_BAD_STATUS,
                    format!("API error {}: {}", status, error_text),
                    Some(status.as_u16()),
                ))
            }
        }
    }

    /// POST to a link endpoint and validate the returned URL
    async fn request_link(&self, url: Url, action: AccountAction) -> Result<PayoutLink> {
        debug!(%url, %action, "Requesting payout link");

        let response = self
            .authorize(self.client.post(url))
            .send()
            .await
            .map_err(|e| {
                FinanceError::payout_link(
                    ErrorCode::PAYOUT_LINK_REQUEST_FAILED,
                    action,
                    format!("request failed: {}", e),
                )
                .with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, %action, "Payout provider rejected link request");
            return Err(FinanceError::payout_link(
                ErrorCode::PAYOUT_LINK_REJECTED,
                action,
                format!("provider returned {}: {}", status, error_text),
            ));
        }

        let body: LinkResponse = response.json().await.map_err(|e| {
            FinanceError::payout_link(
                ErrorCode::PAYOUT_LINK_INVALID_URL,
                action,
                "response did not contain a link",
            )
            .with_source(e)
        })?;

        let url = Url::parse(&body.url).map_err(|e| {
            FinanceError::payout_link(
                ErrorCode::PAYOUT_LINK_INVALID_URL,
                action,
                format!("'{}' is not a valid URL", body.url),
            )
            .with_source(e)
        })?;

        info!(%action, host = url.host_str().unwrap_or_default(), "Payout link issued");
        Ok(PayoutLink { url })
    }

    async fn create_account(&self, org: &OrganizationContext) -> Result<PayoutAccount> {
        let url = self.endpoint(org, &["accounts"])?;
        info!(org = %org.name, "Creating payout account");

        let sent = self
            .authorize(self.client.post(url))
            .json(&CreateAccountRequest {
                account_type: "stripe",
            })
            .send()
            .await;
        let created = match sent {
            Ok(response) => Self::decode::<PayoutAccount>(response).await,
            Err(e) => Err(FinanceError::from(e)),
        };

        created.map_err(|e| {
            FinanceError::payout_link(
                ErrorCode::PAYOUT_ACCOUNT_CREATE_FAILED,
                AccountAction::StartOnboarding,
                "could not create payout account",
            )
            .with_source(e)
        })
    }
}

#[async_trait]
impl FinanceApi for RealFinanceApi {
    async fn list_pledges(&self, org: &OrganizationContext) -> Result<Vec<PledgeRecord>> {
        let url = self.endpoint(org, &["pledges"])?;
        self.get_json(url).await
    }

    async fn list_accounts(&self, org: &OrganizationContext) -> Result<Vec<PayoutAccount>> {
        let url = self.endpoint(org, &["accounts"])?;
        self.get_json(url).await
    }

    async fn onboarding_link(
        &self,
        org: &OrganizationContext,
        account: Option<&PayoutAccount>,
    ) -> Result<PayoutLink> {
        let (stripe_id, action) = match account {
            Some(account) => (account.stripe_id.clone(), AccountAction::ContinueOnboarding),
            None => (
                self.create_account(org).await?.stripe_id,
                AccountAction::StartOnboarding,
            ),
        };

        let url = self.endpoint(org, &["accounts", &stripe_id, "onboarding_link"])?;
        self.request_link(url, action).await
    }

    async fn dashboard_link(
        &self,
        org: &OrganizationContext,
        account: &PayoutAccount,
    ) -> Result<PayoutLink> {
        let url = self.endpoint(org, &["accounts", &account.stripe_id, "dashboard_link"])?;
        self.request_link(url, AccountAction::OpenDashboard).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RealFinanceApi {
        let config = FinanceConfig {
            api_base_url: base.to_string(),
            ..FinanceConfig::default()
        };
        RealFinanceApi::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_layout() {
        let api = client("https://api.example.com");
        let org = OrganizationContext::new("acme", "github");
        let url = api
            .endpoint(&org, &["accounts", "acct_1", "dashboard_link"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/v1/github/acme/accounts/acct_1/dashboard_link"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_segments() {
        let api = client("https://example.com/backend/");
        let org = OrganizationContext::new("my org", "github");
        let url = api.endpoint(&org, &["pledges"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/backend/api/v1/github/my%20org/pledges"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = FinanceConfig {
            request_timeout_secs: 0,
            ..FinanceConfig::default()
        };
        assert!(RealFinanceApi::new(&config).is_err());
    }
}
