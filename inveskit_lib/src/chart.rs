//! Picks which stock and date window the price chart should show.

use chrono::{Duration, NaiveDate};
use inveskit_types::{PricePoint, Trade};
use serde::{Deserialize, Serialize};

/// Length of the price window requested from the price source.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 60;

/// The stock and window to fetch prices for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartTarget {
    pub stock_name: String,
    /// Latest trade date; the window ends here.
    pub end_date: NaiveDate,
    pub lookback_days: u32,
}

impl ChartTarget {
    /// First calendar day of the window (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        let span = i64::from(self.lookback_days.saturating_sub(1));
        self.end_date - Duration::days(span)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date
    }

    /// The price points that fall inside the window, in input order.
    pub fn window_prices(&self, prices: &[PricePoint]) -> Vec<PricePoint> {
        prices
            .iter()
            .filter(|p| self.contains(p.date))
            .cloned()
            .collect()
    }
}

/// The chart follows the first logged trade's stock and ends on the most
/// recent trade date across all trades. Returns `None` with no trades.
pub fn chart_target(trades: &[Trade]) -> Option<ChartTarget> {
    let first = trades.first()?;
    let end_date = trades.iter().map(|t| t.date).max()?;
    Some(ChartTarget {
        stock_name: first.stock_name.clone(),
        end_date,
        lookback_days: DEFAULT_LOOKBACK_DAYS,
    })
}

/// Trades for one stock, in input order.
pub fn trades_for_stock(trades: &[Trade], stock_name: &str) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| t.stock_name == stock_name)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inveskit_types::TradeType;
    use rust_decimal_macros::dec;

    fn trade(id: i64, name: &str, date: &str) -> Trade {
        Trade {
            id,
            stock_name: name.to_string(),
            trade_type: TradeType::Buy,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            price: dec!(100),
            quantity: 1,
        }
    }

    #[test]
    fn test_no_trades_no_target() {
        assert!(chart_target(&[]).is_none());
    }

    #[test]
    fn test_first_stock_latest_date() {
        let trades = vec![
            trade(1, "삼성전자", "2024-02-01"),
            trade(2, "카카오", "2024-03-15"),
            trade(3, "삼성전자", "2024-01-10"),
        ];
        let target = chart_target(&trades).unwrap();

        assert_eq!(target.stock_name, "삼성전자");
        assert_eq!(target.end_date.to_string(), "2024-03-15");
        assert_eq!(target.lookback_days, DEFAULT_LOOKBACK_DAYS);
    }

    #[test]
    fn test_window_bounds() {
        let target = ChartTarget {
            stock_name: "A".to_string(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            lookback_days: 60,
        };
        // 2024 is a leap year: 59 days before March 1st is January 2nd.
        assert_eq!(target.start_date().to_string(), "2024-01-02");
        assert!(target.contains(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
        assert!(!target.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!target.contains(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()));
    }

    #[test]
    fn test_window_prices_drops_outside_dates() {
        let target = ChartTarget {
            stock_name: "A".to_string(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            lookback_days: 5,
        };
        let prices: Vec<PricePoint> = ["2024-01-05", "2024-01-06", "2024-01-10", "2024-01-11"]
            .iter()
            .map(|d| PricePoint::new(NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(), dec!(1)))
            .collect();

        let kept: Vec<String> = target
            .window_prices(&prices)
            .iter()
            .map(|p| p.date.to_string())
            .collect();
        assert_eq!(kept, vec!["2024-01-06", "2024-01-10"]);
    }

    #[test]
    fn test_zero_lookback_is_single_day() {
        let target = ChartTarget {
            stock_name: "A".to_string(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            lookback_days: 0,
        };
        assert_eq!(target.start_date(), target.end_date);
    }

    #[test]
    fn test_trades_for_stock_keeps_order() {
        let trades = vec![
            trade(1, "A", "2024-01-03"),
            trade(2, "B", "2024-01-01"),
            trade(3, "A", "2024-01-02"),
        ];
        let ids: Vec<i64> = trades_for_stock(&trades, "A").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(trades_for_stock(&trades, "Z").is_empty());
    }
}
