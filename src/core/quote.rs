//! Option chain quote data
//!
//! Raw chain rows as handed over by an external data provider, the
//! market parameters shared by a computation run, and the cleaned
//! solver inputs derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{SurfaceError, SurfaceResult};

/// Days per year used to convert calendar distance to year fractions
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Market parameters shared read-only across all quotes in a run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketParams {
    /// Underlying spot price
    pub spot: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
    /// Continuous dividend yield
    pub dividend_yield: f64,
}

impl MarketParams {
    pub fn new(spot: f64, risk_free_rate: f64, dividend_yield: f64) -> SurfaceResult<Self> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(SurfaceError::invalid_input(format!(
                "Spot must be positive, got {spot}"
            )));
        }
        if !dividend_yield.is_finite() || dividend_yield < 0.0 {
            return Err(SurfaceError::invalid_input(format!(
                "Dividend yield must be non-negative, got {dividend_yield}"
            )));
        }
        if !risk_free_rate.is_finite() {
            return Err(SurfaceError::invalid_input("Risk-free rate must be finite"));
        }

        Ok(Self {
            spot,
            risk_free_rate,
            dividend_yield,
        })
    }

    /// Forward price at time t: F = S * exp((r - q) * t)
    pub fn forward(&self, time: f64) -> f64 {
        self.spot * ((self.risk_free_rate - self.dividend_yield) * time).exp()
    }
}

/// Raw option-chain row for a single contract
///
/// Never mutated; the normalizer only filters rows and derives clean
/// tuples from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRow {
    /// Unique contract identifier
    pub contract_symbol: String,
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Bid price
    pub bid: f64,
    /// Ask price
    pub ask: f64,
    /// Last traded price
    pub last_price: f64,
}

impl ChainRow {
    /// Mid price from bid/ask, falling back to last when either side is empty
    pub fn mid_price(&self) -> f64 {
        if self.bid > 0.0 && self.ask > 0.0 {
            (self.bid + self.ask) / 2.0
        } else {
            self.last_price
        }
    }

    /// Time to expiration in years from `today`, floored at zero
    pub fn time_to_expiry(&self, today: NaiveDate) -> f64 {
        let days = (self.expiration - today).num_days() as f64;
        (days / DAYS_PER_YEAR).max(0.0)
    }
}

/// Parse an expiration date string in `YYYY-MM-DD` format
pub fn parse_expiration(date_str: &str) -> SurfaceResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| SurfaceError::data(format!("Bad expiration date '{date_str}': {e}")))
}

/// Chain snapshot handed over by the external data-fetch collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Spot price at snapshot time
    pub spot: f64,
    /// Raw rows across all expirations
    pub rows: Vec<ChainRow>,
}

/// Filter policy applied during normalization
///
/// The thresholds are caller-supplied; typical usage is a percentage
/// band around spot plus a near-expiry cutoff of 0.02-0.07 years.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuoteFilter {
    /// Lowest strike kept
    pub min_strike: f64,
    /// Highest strike kept
    pub max_strike: f64,
    /// Shortest time-to-expiry kept, in years
    pub min_time_to_expiry: f64,
}

impl QuoteFilter {
    /// Build a strike window as percentages of spot (e.g. 70.0 to 130.0)
    pub fn strike_window(
        spot: f64,
        min_pct: f64,
        max_pct: f64,
        min_time_to_expiry: f64,
    ) -> Self {
        Self {
            min_strike: spot * min_pct / 100.0,
            max_strike: spot * max_pct / 100.0,
            min_time_to_expiry,
        }
    }
}

/// Clean solver input derived from a surviving chain row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedQuote {
    /// Contract identifier carried through from the raw row
    pub id: String,
    /// Strike price
    pub strike: f64,
    /// Time to expiration in years
    pub time_to_expiry: f64,
    /// Positive, finite observed price
    pub mid_price: f64,
}

/// One solved implied volatility, one-to-one with a quote that converged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IvPoint {
    pub id: String,
    pub strike: f64,
    pub time_to_expiry: f64,
    /// Implied volatility as a raw fraction
    pub implied_vol: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid_price_fallback() {
        let mut row = ChainRow {
            contract_symbol: "SPY240621C00500000".into(),
            strike: 500.0,
            expiration: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            bid: 10.0,
            ask: 10.5,
            last_price: 5.0,
        };
        assert!((row.mid_price() - 10.25).abs() < 1e-12);

        // One-sided or empty book falls back to last
        row.bid = 0.0;
        assert_eq!(row.mid_price(), 5.0);
        row.bid = 10.0;
        row.ask = 0.0;
        assert_eq!(row.mid_price(), 5.0);
    }

    #[test]
    fn test_time_to_expiry_floor() {
        let row = ChainRow {
            contract_symbol: "X".into(),
            strike: 100.0,
            expiration: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            bid: 1.0,
            ask: 1.0,
            last_price: 1.0,
        };

        let before = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let tte = row.time_to_expiry(before);
        assert!(tte > 0.5 && tte < 0.51);

        // Expired contract never goes negative
        let after = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(row.time_to_expiry(after), 0.0);
    }

    #[test]
    fn test_parse_expiration() {
        let d = parse_expiration("2025-06-20").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());
        assert!(parse_expiration("06/20/2025").is_err());
    }

    #[test]
    fn test_market_params_validation() {
        assert!(MarketParams::new(100.0, 0.05, 0.01).is_ok());
        assert!(MarketParams::new(0.0, 0.05, 0.01).is_err());
        assert!(MarketParams::new(100.0, 0.05, -0.01).is_err());

        let m = MarketParams::new(100.0, 0.04, 0.0).unwrap();
        assert!((m.forward(0.5) - 100.0 * (0.02f64).exp()).abs() < 1e-10);
    }

    #[test]
    fn test_strike_window() {
        let f = QuoteFilter::strike_window(200.0, 70.0, 130.0, 0.07);
        assert!((f.min_strike - 140.0).abs() < 1e-12);
        assert!((f.max_strike - 260.0).abs() < 1e-12);
    }
}
