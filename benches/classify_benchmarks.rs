//! Benchmarks for pledge classification and header totals
//! Dashboards for large organizations render thousands of pledges per tab switch

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pledge_finance::core::pledges::{classify, summarize, Pledge, PledgeState, ViewMode};
use pledge_finance::money::format_cents;
use pledge_finance::testing::PledgeBuilder;
use std::hint::black_box;

fn pledges(size: u64) -> Vec<Pledge> {
    let states = [
        PledgeState::Pending,
        PledgeState::ConfirmationPending,
        PledgeState::Disputed,
        PledgeState::Paid,
        PledgeState::Refunded,
        PledgeState::ChargeDisputed,
        PledgeState::from("pending_payout"),
    ];
    (0..size)
        .map(|i| {
            PledgeBuilder::new()
                .amount(100 + i * 37)
                .state(states[(i as usize) % states.len()].clone())
                .issue_number(i)
                .build()
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for size in [10, 100, 1000, 10000] {
        let input = pledges(size);

        group.bench_with_input(BenchmarkId::new("current", size), &input, |b, input| {
            b.iter(|| black_box(classify(black_box(input), ViewMode::Current)));
        });

        group.bench_with_input(BenchmarkId::new("rewarded", size), &input, |b, input| {
            b.iter(|| black_box(classify(black_box(input), ViewMode::Rewarded)));
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for size in [100, 10000] {
        let input = pledges(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| black_box(summarize(black_box(input))));
        });
    }

    group.finish();
}

fn bench_format_cents(c: &mut Criterion) {
    c.bench_function("format_cents", |b| {
        b.iter(|| black_box(format_cents(black_box(123_456_789))));
    });
}

criterion_group!(benches, bench_classify, bench_summary, bench_format_cents);
criterion_main!(benches);
