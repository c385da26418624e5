//! Implied volatility solver
//!
//! Inverts the Black-Scholes formula with Brent's method. The bracketed,
//! derivative-free search is a hard requirement: vega collapses for deep
//! ITM/OTM and near-expiry contracts, which makes Newton-style iteration
//! unstable exactly where market chains are noisiest.

use roots::{find_root_brent, SimpleConvergency};

use super::black_scholes::{price, price_bounds};
use crate::core::OptionType;

/// Why a quote could not be inverted to a volatility
///
/// Recovered locally by dropping the quote; never fatal to a run.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NotComputable {
    #[error("non-positive spot, strike, or time to expiry")]
    InvalidInputs,

    #[error("price {price} outside no-arbitrage bounds [{lower}, {upper}]")]
    OutOfBounds { price: f64, lower: f64, upper: f64 },

    #[error("no volatility in the search bracket reproduces the price")]
    NoSolution,

    #[error("root collapsed to the search floor")]
    Degenerate,
}

/// Bracketed-search configuration
#[derive(Debug, Clone, Copy)]
pub struct SolverParams {
    /// Lower bracket endpoint
    pub search_low: f64,
    /// Upper bracket endpoint
    pub search_high: f64,
    /// Convergence tolerance on the root
    pub tolerance: f64,
    /// Iteration budget for the search
    pub max_iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            search_low: 1e-6,
            search_high: 5.0,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

/// Solve for the volatility that reproduces `observed_price`
///
/// Rejects degenerate inputs and prices outside the no-arbitrage bounds
/// up front, then runs Brent's method on
/// `f(v) = price(v) - observed_price` over the bracket.
///
/// A root at or below the tolerance is reported as [`NotComputable::Degenerate`]
/// rather than as a tiny volatility: the observed price sits at the
/// intrinsic-value floor and carries no information about vol.
pub fn implied_volatility(
    observed_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    time: f64,
    option_type: OptionType,
    params: &SolverParams,
) -> Result<f64, NotComputable> {
    if time <= 0.0 || spot <= 0.0 || strike <= 0.0 || !observed_price.is_finite() {
        return Err(NotComputable::InvalidInputs);
    }

    let (lower, upper) = price_bounds(spot, strike, rate, div, time, option_type);
    if observed_price < lower || observed_price > upper {
        return Err(NotComputable::OutOfBounds {
            price: observed_price,
            lower,
            upper,
        });
    }

    let f = |vol: f64| price(spot, strike, rate, div, vol, time, option_type) - observed_price;
    let mut convergency = SimpleConvergency {
        eps: params.tolerance,
        max_iter: params.max_iter,
    };

    match find_root_brent(params.search_low, params.search_high, &f, &mut convergency) {
        Ok(vol) if vol <= params.tolerance => Err(NotComputable::Degenerate),
        Ok(vol) => Ok(vol),
        Err(_) => Err(NotComputable::NoSolution),
    }
}
