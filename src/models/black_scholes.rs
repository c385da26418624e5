//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing with continuous dividend yield
//! - Model-independent no-arbitrage price bounds
//!
//! Prices convert to implied volatilities in [`crate::models::implied_vol`];
//! the bounds reject quotes no non-negative volatility can explain before
//! the root search is attempted.

use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

use crate::core::OptionType;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate - div + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, div, vol, time) - vol * time.sqrt()
}

/// Black-Scholes European option price
///
/// Edge cases are explicit branches rather than NaN/Inf fallout:
/// - non-positive spot or strike is not computable and returns NaN
/// - at or past expiry the option is a deterministic payoff (intrinsic)
/// - at zero volatility the price is the discounted forward intrinsic,
///   the correct limit of the formula as vol -> 0
pub fn price(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> f64 {
    if spot <= 0.0 || strike <= 0.0 {
        return f64::NAN;
    }

    if time <= 0.0 {
        return option_type.intrinsic(spot, strike);
    }

    if vol <= 0.0 {
        let carry_spot = spot * (-div * time).exp();
        let disc_strike = strike * (-rate * time).exp();
        return match option_type {
            OptionType::Call => (carry_spot - disc_strike).max(0.0),
            OptionType::Put => (disc_strike - carry_spot).max(0.0),
        };
    }

    let d1 = d1(spot, strike, rate, div, vol, time);
    let d2 = d2(spot, strike, rate, div, vol, time);
    let carry_spot = spot * (-div * time).exp();
    let disc_strike = strike * (-rate * time).exp();

    match option_type {
        OptionType::Call => carry_spot * norm_cdf(d1) - disc_strike * norm_cdf(d2),
        OptionType::Put => disc_strike * norm_cdf(-d2) - carry_spot * norm_cdf(-d1),
    }
}

/// No-arbitrage price interval for a European option
///
/// Call: [max(S*e^(-qT) - X*e^(-rT), 0), S*e^(-qT)]
/// Put:  [max(X*e^(-rT) - S*e^(-qT), 0), X*e^(-rT)]
///
/// A price outside this interval cannot correspond to any non-negative
/// volatility, so inverting it would be ill-posed.
pub fn price_bounds(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    time: f64,
    option_type: OptionType,
) -> (f64, f64) {
    let carry_spot = spot * (-div * time).exp();
    let disc_strike = strike * (-rate * time).exp();

    match option_type {
        OptionType::Call => ((carry_spot - disc_strike).max(0.0), carry_spot),
        OptionType::Put => ((disc_strike - carry_spot).max(0.0), disc_strike),
    }
}
