//! Per-quote IV extraction
//!
//! Maps normalized quotes through the Brent solver. Solves are
//! independent, so the map runs data-parallel with rayon; results are
//! collected as explicit per-quote outcomes so a dropped quote is
//! distinguishable from an absent one.

use rayon::prelude::*;
use tracing::debug;

use crate::core::{IvPoint, MarketParams, NormalizedQuote, OptionType};
use crate::models::implied_vol::{implied_volatility, NotComputable, SolverParams};

/// Outcome of one implied-volatility solve
#[derive(Debug, Clone)]
pub struct QuoteOutcome {
    pub id: String,
    pub strike: f64,
    pub time_to_expiry: f64,
    pub result: Result<f64, NotComputable>,
}

/// Solve every quote against the shared market parameters
///
/// Output order matches input order regardless of the parallel schedule.
pub fn solve_quotes(
    quotes: &[NormalizedQuote],
    market: &MarketParams,
    option_type: OptionType,
    params: &SolverParams,
) -> Vec<QuoteOutcome> {
    let outcomes: Vec<QuoteOutcome> = quotes
        .par_iter()
        .map(|quote| {
            let result = implied_volatility(
                quote.mid_price,
                market.spot,
                quote.strike,
                market.risk_free_rate,
                market.dividend_yield,
                quote.time_to_expiry,
                option_type,
                params,
            );

            QuoteOutcome {
                id: quote.id.clone(),
                strike: quote.strike,
                time_to_expiry: quote.time_to_expiry,
                result,
            }
        })
        .collect();

    let solved = outcomes.iter().filter(|o| o.result.is_ok()).count();
    debug!(
        quotes = quotes.len(),
        solved,
        dropped = quotes.len() - solved,
        "implied volatility solves complete"
    );

    outcomes
}

/// Keep the converged solves as surface input points
pub fn iv_points(outcomes: &[QuoteOutcome]) -> Vec<IvPoint> {
    outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.result.ok().map(|implied_vol| IvPoint {
                id: outcome.id.clone(),
                strike: outcome.strike,
                time_to_expiry: outcome.time_to_expiry,
                implied_vol,
            })
        })
        .collect()
}
