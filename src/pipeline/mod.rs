//! Quote-to-IV pipeline
//!
//! Raw chain rows -> normalized quotes -> per-quote IV solves. Every
//! stage is a pure transformation over immutable inputs; the solved
//! point collection feeds [`crate::surface::build_surface`].

pub mod normalize;
pub mod solve;

pub use normalize::normalize_quotes;
pub use solve::{iv_points, solve_quotes, QuoteOutcome};

use chrono::NaiveDate;

use crate::core::{ChainRow, IvPoint, MarketParams, OptionType, QuoteFilter};
use crate::models::implied_vol::SolverParams;

/// Run the full extraction: filter, normalize, and solve every row
///
/// Quotes that fail the filters or the solver are dropped; the result
/// holds one point per quote that converged.
pub fn extract_iv_points(
    rows: &[ChainRow],
    market: &MarketParams,
    filter: &QuoteFilter,
    option_type: OptionType,
    solver: &SolverParams,
    today: NaiveDate,
) -> Vec<IvPoint> {
    let quotes = normalize_quotes(rows, filter, today);
    let outcomes = solve_quotes(&quotes, market, option_type, solver);
    iv_points(&outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StrikeAxis, SurfaceError, VolUnits};
    use crate::models::black_scholes::price;
    use crate::surface::{build_surface, surface_points};

    fn synthetic_chain(
        market: &MarketParams,
        today: NaiveDate,
        vol: f64,
    ) -> Vec<ChainRow> {
        let mut rows = Vec::new();
        for expiration in ["2025-07-02", "2026-01-02"] {
            for &strike in &[80.0, 90.0, 100.0, 110.0, 120.0] {
                let mut row = ChainRow {
                    contract_symbol: format!("SYN-{strike}-{expiration}"),
                    strike,
                    expiration: NaiveDate::parse_from_str(expiration, "%Y-%m-%d").unwrap(),
                    bid: 0.0,
                    ask: 0.0,
                    last_price: 0.0,
                };
                // Price at the exact tenor the pipeline will compute
                let mid = price(
                    market.spot,
                    strike,
                    market.risk_free_rate,
                    market.dividend_yield,
                    vol,
                    row.time_to_expiry(today),
                    OptionType::Call,
                );
                row.bid = mid - 0.01;
                row.ask = mid + 0.01;
                rows.push(row);
            }
        }
        rows
    }

    #[test]
    fn test_end_to_end_flat_surface() {
        let market = MarketParams::new(100.0, 0.01, 0.0).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let rows = synthetic_chain(&market, today, 0.20);

        let filter = QuoteFilter::strike_window(market.spot, 70.0, 130.0, 0.07);
        let points = extract_iv_points(
            &rows,
            &market,
            &filter,
            OptionType::Call,
            &SolverParams::default(),
            today,
        );

        // Every synthetic quote sits strictly inside the bounds
        assert_eq!(points.len(), rows.len());
        for p in &points {
            assert!(
                (p.implied_vol - 0.20).abs() < 1e-3,
                "{}: recovered {} instead of 0.20",
                p.id,
                p.implied_vol
            );
        }

        // A flat chain makes a flat grid
        let scatter = surface_points(&points, &market, StrikeAxis::Strike, VolUnits::Fraction);
        let grid = build_surface(&scatter, 15, StrikeAxis::Strike, VolUnits::Fraction).unwrap();
        for v in grid.values.iter() {
            assert!((v - 0.20).abs() < 1e-3);
        }
    }

    #[test]
    fn test_everything_filtered_leads_to_empty_input() {
        let market = MarketParams::new(100.0, 0.01, 0.0).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let rows = synthetic_chain(&market, today, 0.20);

        // Window excludes every strike in the chain
        let filter = QuoteFilter::strike_window(market.spot, 300.0, 400.0, 0.07);
        let points = extract_iv_points(
            &rows,
            &market,
            &filter,
            OptionType::Call,
            &SolverParams::default(),
            today,
        );
        assert!(points.is_empty());

        let scatter = surface_points(&points, &market, StrikeAxis::Strike, VolUnits::Fraction);
        let result = build_surface(&scatter, 15, StrikeAxis::Strike, VolUnits::Fraction);
        assert!(matches!(result, Err(SurfaceError::EmptyInput)));
    }
}
