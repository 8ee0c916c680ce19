//! Property-based tests for the summary and alignment invariants.
//!
//! Trade lists are generated deterministically from a seed so failures
//! reproduce exactly.

use chrono::{Duration, NaiveDate};
use inveskit_lib::{align, summarize, PricePoint, Trade, TradeType};
use rust_decimal::Decimal;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

const STOCKS: [&str; 8] = [
    "삼성전자",
    "SK하이닉스",
    "카카오",
    "네이버",
    "현대차",
    "LG에너지솔루션",
    "셀트리온",
    "POSCO홀딩스",
];

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn generate_trades(n: usize, seed: u64) -> Vec<Trade> {
    (0..n)
        .map(|i| {
            let hash = simple_hash(seed, i as u64);
            Trade {
                id: i as i64,
                stock_name: STOCKS[hash as usize % STOCKS.len()].to_string(),
                trade_type: if hash % 3 == 0 {
                    TradeType::Sell
                } else {
                    TradeType::Buy
                },
                date: base_date() + Duration::days((hash % 90) as i64),
                // Prices with two decimal places, 0.00 .. 999999.99
                price: Decimal::new((hash % 100_000_000) as i64, 2),
                quantity: 1 + (hash % 500) as i64,
            }
        })
        .collect()
}

/// Weekday-only closes over the first 60 days, so some trades never match.
fn generate_prices(seed: u64) -> Vec<PricePoint> {
    (0..60)
        .map(|d| base_date() + Duration::days(d))
        .filter(|date| {
            use chrono::Datelike;
            date.weekday().number_from_monday() <= 5
        })
        .enumerate()
        .map(|(i, date)| {
            let close = Decimal::from(50_000 + (simple_hash(seed, i as u64) % 10_000) as i64);
            PricePoint::new(date, close)
        })
        .collect()
}

// =============================================================================
// SUMMARY PROPERTIES
// =============================================================================

#[test]
fn property_totals_non_negative_and_profit_exact() {
    for seed in 0..10 {
        for size in [0, 1, 5, 25, 100] {
            let summary = summarize(&generate_trades(size, seed)).unwrap();

            assert!(summary.total_investment >= Decimal::ZERO);
            assert!(summary.total_sales >= Decimal::ZERO);
            assert_eq!(
                summary.profit_loss,
                summary.total_sales - summary.total_investment,
                "seed={} size={}",
                seed,
                size
            );
        }
    }
}

#[test]
fn property_counts_are_consistent() {
    for seed in 0..10 {
        for size in [0, 1, 5, 25, 100] {
            let summary = summarize(&generate_trades(size, seed)).unwrap();

            let per_stock_total: usize = summary.per_stock.values().map(|s| s.total_count).sum();
            assert_eq!(per_stock_total, summary.trade_count);
            assert_eq!(summary.trade_count, size);
            assert_eq!(summary.buy_count + summary.sell_count, summary.trade_count);
            assert_eq!(summary.distribution_total(), summary.trade_count);
            for stats in summary.per_stock.values() {
                assert_eq!(stats.buy_count + stats.sell_count, stats.total_count);
            }
        }
    }
}

#[test]
fn property_top_stocks_sorted_with_first_seen_ties() {
    for seed in 0..10 {
        for size in [0, 1, 5, 25, 100] {
            let summary = summarize(&generate_trades(size, seed)).unwrap();

            assert_eq!(summary.top_stocks.len(), summary.per_stock.len().min(5));

            for pair in summary.top_stocks.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(a.stats.total_count >= b.stats.total_count);
                if a.stats.total_count == b.stats.total_count {
                    let pos_a = summary.per_stock.get_index_of(&a.stock_name).unwrap();
                    let pos_b = summary.per_stock.get_index_of(&b.stock_name).unwrap();
                    assert!(pos_a < pos_b, "tie not in first-seen order (seed={})", seed);
                }
            }
        }
    }
}

#[test]
fn property_distribution_follows_per_stock_order() {
    for seed in 0..10 {
        let summary = summarize(&generate_trades(50, seed)).unwrap();
        let dist_names: Vec<&String> = summary.distribution.iter().map(|s| &s.stock_name).collect();
        let per_stock_names: Vec<&String> = summary.per_stock.keys().collect();
        assert_eq!(dist_names, per_stock_names);
    }
}

// =============================================================================
// ALIGNMENT PROPERTIES
// =============================================================================

#[test]
fn property_every_trade_accounted_once() {
    for seed in 0..10 {
        for size in [0, 1, 5, 25, 100] {
            let trades = generate_trades(size, seed);
            let series = align(&generate_prices(seed), &trades).unwrap();

            assert_eq!(series.matched_count() + series.unmatched_count(), trades.len());

            let mut seen: Vec<i64> = series
                .points
                .iter()
                .flat_map(|p| p.trades.iter().map(|t| t.id))
                .chain(series.unmatched_trades.iter().map(|t| t.id))
                .collect();
            seen.sort_unstable();
            let mut expected: Vec<i64> = trades.iter().map(|t| t.id).collect();
            expected.sort_unstable();
            assert_eq!(seen, expected);
        }
    }
}

#[test]
fn property_attached_trades_share_point_date() {
    for seed in 0..10 {
        let trades = generate_trades(100, seed);
        let prices = generate_prices(seed);
        let series = align(&prices, &trades).unwrap();

        for point in &series.points {
            for trade in &point.trades {
                assert_eq!(trade.date, point.price_point.date);
            }
        }
        for trade in &series.unmatched_trades {
            assert!(prices.iter().all(|p| p.date != trade.date));
        }
    }
}

#[test]
fn property_align_idempotent() {
    for seed in 0..10 {
        let trades = generate_trades(40, seed);
        let prices = generate_prices(seed);
        assert_eq!(align(&prices, &trades).unwrap(), align(&prices, &trades).unwrap());
    }
}
