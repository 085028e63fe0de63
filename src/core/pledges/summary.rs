//! Header totals for the finance dashboard tabs

use super::Pledge;
use serde::{Deserialize, Serialize};

/// Amounts shown on the "current" and "rewarded" tab headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinanceSummary {
    /// Unpaid pledges, refunds and chargebacks excluded
    pub current_amount: u64,
    /// Pledges already paid out
    pub rewarded_amount: u64,
}

/// Pure: compute both tab totals from the unfiltered snapshot
///
/// Independent of the active view mode; both headers are always shown.
pub fn summarize(pledges: &[Pledge]) -> FinanceSummary {
    pledges
        .iter()
        .fold(FinanceSummary::default(), |mut summary, pledge| {
            if pledge.state.is_paid() {
                summary.rewarded_amount =
                    summary.rewarded_amount.saturating_add(pledge.amount);
            } else if !pledge.state.is_refunded() {
                summary.current_amount =
                    summary.current_amount.saturating_add(pledge.amount);
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pledges::PledgeState;
    use crate::testing::fixtures::PledgeBuilder;

    #[test]
    fn test_summarize_excludes_refunds_from_current() {
        let pledges = vec![
            PledgeBuilder::new().amount(500).state(PledgeState::Pending).build(),
            PledgeBuilder::new().amount(1200).state(PledgeState::Paid).build(),
            PledgeBuilder::new().amount(300).state(PledgeState::Refunded).build(),
            PledgeBuilder::new()
                .amount(50)
                .state(PledgeState::ChargeDisputed)
                .build(),
            PledgeBuilder::new()
                .amount(25)
                .state(PledgeState::from("created"))
                .build(),
        ];

        let summary = summarize(&pledges);
        assert_eq!(summary.current_amount, 525);
        assert_eq!(summary.rewarded_amount, 1200);
    }

    #[test]
    fn test_summarize_saturates_instead_of_overflowing() {
        let huge = |state| Pledge {
            amount: u64::MAX,
            ..PledgeBuilder::new().state(state).build()
        };
        let pledges = vec![
            huge(PledgeState::Pending),
            PledgeBuilder::new().amount(1).build(),
            huge(PledgeState::Paid),
            PledgeBuilder::new().amount(1).state(PledgeState::Paid).build(),
        ];

        let summary = summarize(&pledges);
        assert_eq!(summary.current_amount, u64::MAX);
        assert_eq!(summary.rewarded_amount, u64::MAX);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), FinanceSummary::default());
    }
}
