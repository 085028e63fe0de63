//! End-to-end dashboard flows over the mock finance backend

use pledge_finance::core::accounts::{topbar_badge, AccountState, TopbarBadge};
use pledge_finance::core::pledges::{BucketName, PledgeState, ViewMode};
use pledge_finance::money::{format_cents, format_cents_compact};
use pledge_finance::testing::mocks::{MockFinanceApi, MOCK_DASHBOARD_URL, MOCK_ONBOARDING_URL};
use pledge_finance::testing::{org_context, AccountBuilder, PledgeBuilder};
use pledge_finance::{load_finance_view, perform_banner_action, ViewGuard};

#[tokio::test]
async fn test_maintainer_connects_then_opens_dashboard() {
    let org = org_context();
    let guard = ViewGuard::new();

    // No account yet: the banner offers setup and onboarding creates one.
    let api = MockFinanceApi::builder()
        .with_pledges(vec![
            PledgeBuilder::new().amount(500).build_record(),
            PledgeBuilder::new()
                .amount(1200)
                .state(PledgeState::Paid)
                .issue_number(2)
                .build_record(),
            PledgeBuilder::new()
                .amount(300)
                .state(PledgeState::Refunded)
                .issue_number(3)
                .build_record(),
        ])
        .build();
    let view = load_finance_view(&api, &org, ViewMode::Current).await.unwrap();
    assert_eq!(view.banner, Some(AccountState::NoAccount));
    assert_eq!(
        topbar_badge(&org, Some(&view.accounts[..])),
        TopbarBadge::Onboarding { stripe_id: None }
    );

    let url = perform_banner_action(&api, &org, &view.accounts, &guard.lifetime())
        .await
        .unwrap();
    assert_eq!(url.as_str(), MOCK_ONBOARDING_URL);
    assert_eq!(api.calls().accounts_created, 1);

    // Onboarding finished: the same flow now lands on the dashboard.
    let ready = AccountBuilder::new()
        .stripe_id("acct_ready")
        .details_submitted(true)
        .balance(123_400)
        .build();
    let api = MockFinanceApi::builder()
        .with_accounts(vec![ready.clone()])
        .build();
    let view = load_finance_view(&api, &org, ViewMode::Current).await.unwrap();
    assert_eq!(view.banner, Some(AccountState::Ready));
    assert_eq!(
        topbar_badge(&org, Some(&view.accounts[..])),
        TopbarBadge::Balance(&ready)
    );

    let url = perform_banner_action(&api, &org, &view.accounts, &guard.lifetime())
        .await
        .unwrap();
    assert_eq!(url.as_str(), MOCK_DASHBOARD_URL);
    let calls = api.calls();
    assert_eq!(calls.dashboard_links, 1);
    assert_eq!(calls.last_stripe_id.as_deref(), Some("acct_ready"));
}

#[tokio::test]
async fn test_tabs_render_buckets_and_totals() {
    let api = MockFinanceApi::builder()
        .with_pledges(vec![
            PledgeBuilder::new().amount(250).build_record(),
            PledgeBuilder::new()
                .amount(5)
                .state(PledgeState::from("pending_payout"))
                .issue_number(2)
                .build_record(),
            PledgeBuilder::new()
                .amount(1_000_000)
                .state(PledgeState::Paid)
                .issue_number(3)
                .build_record(),
            PledgeBuilder::new()
                .amount(700)
                .state(PledgeState::ChargeDisputed)
                .issue_number(4)
                .build_record(),
        ])
        .build();

    let view = load_finance_view(&api, &org_context(), ViewMode::Current)
        .await
        .unwrap();
    let current = view.classification();
    let rendered: Vec<_> = current
        .renderable()
        .map(|b| (b.name, format_cents(b.total_amount)))
        .collect();
    assert_eq!(
        rendered,
        vec![
            (BucketName::InReview, "2.50".to_string()),
            (BucketName::Open, "0.05".to_string()),
            (BucketName::Refunded, "7.00".to_string()),
        ]
    );
    assert_eq!(format_cents(view.summary.current_amount), "2.55");

    let rewarded = view.with_mode(ViewMode::Rewarded);
    let classification = rewarded.classification();
    assert_eq!(classification.pledge_count(), 1);
    assert_eq!(format_cents_compact(classification.total(BucketName::Paid)), "10,000");
}

#[tokio::test]
async fn test_closed_view_skips_banner_action() {
    let api = MockFinanceApi::new();
    let guard = ViewGuard::new();
    let lifetime = guard.lifetime();
    drop(guard);

    let err = perform_banner_action(&api, &org_context(), &[], &lifetime)
        .await
        .unwrap_err();
    assert!(err.to_string().to_lowercase().contains("cancel"));
    assert_eq!(api.calls().onboarding_links, 0);
}
