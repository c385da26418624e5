//! Quote normalization
//!
//! Turns raw chain rows into clean (id, strike, T, price) tuples:
//! computes time-to-expiry, derives the mid price with last-price
//! fallback, and drops rows that fail the caller's sanity filters.
//! Nothing reaches the solver without a usable positive price.

use chrono::NaiveDate;
use tracing::debug;

use crate::core::{ChainRow, NormalizedQuote, QuoteFilter};

/// Filter and normalize raw chain rows
///
/// Drops rows with strikes outside the filter window, time-to-expiry
/// below the liquidity threshold, or a non-finite/non-positive price.
/// Deterministic for a fixed input set; output order follows input order.
pub fn normalize_quotes(
    rows: &[ChainRow],
    filter: &QuoteFilter,
    today: NaiveDate,
) -> Vec<NormalizedQuote> {
    let quotes: Vec<NormalizedQuote> = rows
        .iter()
        .filter(|row| row.strike >= filter.min_strike && row.strike <= filter.max_strike)
        .filter_map(|row| {
            let time_to_expiry = row.time_to_expiry(today);
            if time_to_expiry < filter.min_time_to_expiry {
                return None;
            }

            let mid_price = row.mid_price();
            if !mid_price.is_finite() || mid_price <= 0.0 {
                return None;
            }

            Some(NormalizedQuote {
                id: row.contract_symbol.clone(),
                strike: row.strike,
                time_to_expiry,
                mid_price,
            })
        })
        .collect();

    debug!(
        raw = rows.len(),
        kept = quotes.len(),
        dropped = rows.len() - quotes.len(),
        "normalized chain rows"
    );

    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(strike: f64, expiration: &str, bid: f64, ask: f64, last: f64) -> ChainRow {
        ChainRow {
            contract_symbol: format!("TEST-{strike}-{expiration}"),
            strike,
            expiration: NaiveDate::parse_from_str(expiration, "%Y-%m-%d").unwrap(),
            bid,
            ask,
            last_price: last,
        }
    }

    fn filter() -> QuoteFilter {
        QuoteFilter {
            min_strike: 70.0,
            max_strike: 130.0,
            min_time_to_expiry: 0.07,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_mid_with_two_sided_book() {
        let rows = vec![row(100.0, "2025-06-20", 4.0, 4.4, 9.9)];
        let quotes = normalize_quotes(&rows, &filter(), today());
        assert_eq!(quotes.len(), 1);
        assert!((quotes[0].mid_price - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_last_price_fallback() {
        // bid=0, ask=0, last=5.0 -> mid is 5.0
        let rows = vec![row(100.0, "2025-06-20", 0.0, 0.0, 5.0)];
        let quotes = normalize_quotes(&rows, &filter(), today());
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].mid_price, 5.0);
    }

    #[test]
    fn test_drops_near_expiry() {
        // ~4 days out: T ~= 0.01 < 0.07
        let rows = vec![row(100.0, "2025-01-06", 4.0, 4.4, 0.0)];
        assert!(normalize_quotes(&rows, &filter(), today()).is_empty());
    }

    #[test]
    fn test_drops_strikes_outside_window() {
        let rows = vec![
            row(50.0, "2025-06-20", 4.0, 4.4, 0.0),
            row(100.0, "2025-06-20", 4.0, 4.4, 0.0),
            row(200.0, "2025-06-20", 4.0, 4.4, 0.0),
        ];
        let quotes = normalize_quotes(&rows, &filter(), today());
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].strike, 100.0);
    }

    #[test]
    fn test_drops_unusable_prices() {
        let rows = vec![
            // No book and no last trade
            row(100.0, "2025-06-20", 0.0, 0.0, 0.0),
            // No book and a garbage last
            row(105.0, "2025-06-20", 0.0, 0.0, f64::NAN),
        ];
        assert!(normalize_quotes(&rows, &filter(), today()).is_empty());
    }

    #[test]
    fn test_time_to_expiry_computed() {
        let rows = vec![row(100.0, "2026-01-02", 4.0, 4.4, 0.0)];
        let quotes = normalize_quotes(&rows, &filter(), today());
        assert!((quotes[0].time_to_expiry - 1.0).abs() < 0.01);
    }
}
