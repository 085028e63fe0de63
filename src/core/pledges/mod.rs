//! Pledge lifecycle classification
//!
//! Pure functions that filter pledges by view mode, partition them into
//! display buckets and aggregate their amounts. Pledge state is owned by
//! the backend; nothing here mutates it.
//!
//! - `buckets`: bucket names, partition rule and [`classify`]
//! - `summary`: header totals shown above the bucket lists

mod buckets;
mod summary;

pub use buckets::{classify, Bucket, BucketName, Classification, DateColumn};
pub use summary::{summarize, FinanceSummary};

use crate::error::{ErrorCode, FinanceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Backend-owned lifecycle state of a pledge
///
/// Values the crate does not know are kept verbatim in `Unknown` so a
/// newer backend never makes a pledge disappear from the dashboard.
/// `Unknown` can only be built by parsing, so it never holds a known value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PledgeState {
    Pending,
    ConfirmationPending,
    Disputed,
    Paid,
    Refunded,
    ChargeDisputed,
    Unknown(UnknownState),
}

/// Raw wire value of a state this crate does not recognize
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownState(String);

impl UnknownState {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PledgeState {
    pub fn as_str(&self) -> &str {
        match self {
            PledgeState::Pending => "pending",
            PledgeState::ConfirmationPending => "confirmation_pending",
            PledgeState::Disputed => "disputed",
            PledgeState::Paid => "paid",
            PledgeState::Refunded => "refunded",
            PledgeState::ChargeDisputed => "charge_disputed",
            PledgeState::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PledgeState::Unknown(_))
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PledgeState::Paid)
    }

    /// Refunded or charged back
    pub fn is_refunded(&self) -> bool {
        matches!(self, PledgeState::Refunded | PledgeState::ChargeDisputed)
    }

    /// Waiting on confirmation, dispute resolution or payout review
    pub fn is_in_review(&self) -> bool {
        matches!(
            self,
            PledgeState::ConfirmationPending | PledgeState::Disputed | PledgeState::Pending
        )
    }
}

impl From<String> for PledgeState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => PledgeState::Pending,
            "confirmation_pending" => PledgeState::ConfirmationPending,
            "disputed" => PledgeState::Disputed,
            "paid" => PledgeState::Paid,
            "refunded" => PledgeState::Refunded,
            "charge_disputed" => PledgeState::ChargeDisputed,
            _ => PledgeState::Unknown(UnknownState(raw)),
        }
    }
}

impl From<&str> for PledgeState {
    fn from(raw: &str) -> Self {
        PledgeState::from(raw.to_string())
    }
}

impl From<PledgeState> for String {
    fn from(state: PledgeState) -> Self {
        match state {
            PledgeState::Unknown(raw) => raw.0,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for PledgeState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PledgeState::from(s.to_string()))
    }
}

impl fmt::Display for PledgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The issue a pledge funds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    pub organization: String,
    pub repository: String,
    pub number: u64,
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.organization, self.repository, self.number)
    }
}

/// A validated monetary commitment against an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    pub id: Uuid,
    /// Minor currency units (cents)
    pub amount: u64,
    pub state: PledgeState,
    pub issue_ref: IssueRef,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Which tab of the finance dashboard is being viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Everything not yet paid out
    #[default]
    Current,
    /// Only pledges already paid out
    Rewarded,
}

impl ViewMode {
    /// Pure: whether a pledge in `state` is visible under this mode
    pub fn includes(self, state: &PledgeState) -> bool {
        match self {
            ViewMode::Current => !state.is_paid(),
            ViewMode::Rewarded => state.is_paid(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Current => "current",
            ViewMode::Rewarded => "rewarded",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(ViewMode::Current),
            "rewarded" => Ok(ViewMode::Rewarded),
            other => Err(FinanceError::validation_with_code(
                ErrorCode::VALIDATION_UNKNOWN_VIEW_MODE,
                format!("unknown view mode '{}', expected 'current' or 'rewarded'", other),
                Some("mode".to_string()),
            )),
        }
    }
}
