//! Bucket partitioning for the finance dashboard
//!
//! Every visible pledge lands in exactly one bucket. Precedence:
//! 1. refunded states (`refunded`, `charge_disputed`) -> `Refunded`
//! 2. review states (`confirmation_pending`, `disputed`, `pending`) -> `InReview`
//! 3. `paid` -> `Paid`
//! 4. anything else, including unknown states -> `Open`

use super::{Pledge, PledgeState, ViewMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Display category of a pledge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketName {
    Open,
    InReview,
    Paid,
    Refunded,
}

/// Date shown next to each pledge in a bucket listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateColumn {
    None,
    EstimatedPayoutDate,
    PaidOutDate,
    RefundedDate,
}

impl BucketName {
    /// Canonical order; `classify` reports buckets in this order
    pub const ALL: [BucketName; 4] = [
        BucketName::Open,
        BucketName::InReview,
        BucketName::Paid,
        BucketName::Refunded,
    ];

    /// Pure: bucket for a pledge state
    pub fn for_state(state: &PledgeState) -> BucketName {
        if state.is_refunded() {
            BucketName::Refunded
        } else if state.is_in_review() {
            BucketName::InReview
        } else if state.is_paid() {
            BucketName::Paid
        } else {
            BucketName::Open
        }
    }

    /// Order the dashboard lists buckets in
    pub fn render_order() -> [BucketName; 4] {
        [
            BucketName::Paid,
            BucketName::InReview,
            BucketName::Open,
            BucketName::Refunded,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BucketName::Open => "open",
            BucketName::InReview => "in_review",
            BucketName::Paid => "paid",
            BucketName::Refunded => "refunded",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BucketName::Open => "Pledges on open issues",
            BucketName::InReview => "In review",
            BucketName::Paid => "Paid out",
            BucketName::Refunded => "Refunds",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            BucketName::Open | BucketName::Refunded => "Issue",
            BucketName::InReview | BucketName::Paid => "Issue solved",
        }
    }

    pub fn date_column(self) -> DateColumn {
        match self {
            BucketName::Open => DateColumn::None,
            BucketName::InReview => DateColumn::EstimatedPayoutDate,
            BucketName::Paid => DateColumn::PaidOutDate,
            BucketName::Refunded => DateColumn::RefundedDate,
        }
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named group of pledges with its aggregate amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub name: BucketName,
    pub pledges: Vec<&'a Pledge>,
    /// Sum of member amounts in cents, saturating at `u64::MAX`
    pub total_amount: u64,
}

impl<'a> Bucket<'a> {
    fn empty(name: BucketName) -> Self {
        Self {
            name,
            pledges: Vec::new(),
            total_amount: 0,
        }
    }

    fn push(&mut self, pledge: &'a Pledge) {
        self.total_amount = self.total_amount.saturating_add(pledge.amount);
        self.pledges.push(pledge);
    }

    pub fn is_empty(&self) -> bool {
        self.pledges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pledges.len()
    }
}

/// Result of classifying a pledge snapshot under one view mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub mode: ViewMode,
    /// All four buckets, in [`BucketName::ALL`] order, empty ones included
    pub buckets: Vec<Bucket<'a>>,
    pub totals_by_bucket: BTreeMap<BucketName, u64>,
}

impl<'a> Classification<'a> {
    pub fn bucket(&self, name: BucketName) -> &Bucket<'a> {
        // classify always emits every bucket in ALL order
        &self.buckets[name as usize]
    }

    pub fn total(&self, name: BucketName) -> u64 {
        self.totals_by_bucket.get(&name).copied().unwrap_or(0)
    }

    /// Sum over every bucket
    pub fn grand_total(&self) -> u64 {
        self.totals_by_bucket
            .values()
            .fold(0, |total, amount| total.saturating_add(*amount))
    }

    /// Number of pledges that passed the mode filter
    pub fn pledge_count(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// Non-empty buckets in dashboard render order
    pub fn renderable(&self) -> impl Iterator<Item = &Bucket<'a>> + '_ {
        BucketName::render_order()
            .into_iter()
            .map(move |name| self.bucket(name))
            .filter(|bucket| !bucket.is_empty())
    }
}

/// Pure: filter `pledges` by `mode` and partition them into buckets
///
/// Never fails. Member order within a bucket follows input order and
/// totals saturate at `u64::MAX`.
///
/// # Example
///
/// ```
/// use pledge_finance::core::pledges::{classify, BucketName, ViewMode};
///
/// let classification = classify(&[], ViewMode::Current);
/// assert_eq!(classification.buckets.len(), 4);
/// assert_eq!(classification.total(BucketName::Open), 0);
/// ```
pub fn classify(pledges: &[Pledge], mode: ViewMode) -> Classification<'_> {
    let mut buckets: Vec<Bucket<'_>> = BucketName::ALL.into_iter().map(Bucket::empty).collect();

    for pledge in pledges.iter().filter(|p| mode.includes(&p.state)) {
        let name = BucketName::for_state(&pledge.state);
        buckets[name as usize].push(pledge);
    }

    let totals_by_bucket = buckets.iter().map(|b| (b.name, b.total_amount)).collect();

    Classification {
        mode,
        buckets,
        totals_by_bucket,
    }
}
