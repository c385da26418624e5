//! # IV Surface
//!
//! Implied-volatility surface extraction from option chain quotes.
//!
//! ## Overview
//!
//! Given a snapshot of raw option quotes (strike, expiry, bid/ask/last)
//! and market parameters (spot, risk-free rate, dividend yield), the
//! pipeline inverts Black-Scholes per quote to recover implied
//! volatility, validates every observed price against no-arbitrage
//! bounds, and assembles the surviving point cloud into a dense grid
//! over (time-to-expiry, strike-or-log-moneyness) ready for rendering
//! or downstream risk use.
//!
//! ## Key Components
//!
//! - **Pricer**: closed-form Black-Scholes with continuous dividend yield
//! - **Bounds Checker**: model-independent no-arbitrage price interval
//! - **IV Solver**: bracketed root search (Brent's method)
//! - **Quote Normalizer**: chain rows to clean (S, X, r, T, price) tuples
//! - **Surface Builder**: scattered interpolation with nearest-neighbor
//!   fallback outside the quote cloud's convex hull
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use iv_surface::prelude::*;
//!
//! // Chain rows come from an external data provider
//! let rows: Vec<ChainRow> = Vec::new();
//!
//! let market = MarketParams::new(450.0, 0.01, 0.001)?;
//! let filter = QuoteFilter::strike_window(market.spot, 70.0, 130.0, 0.07);
//! let today = Utc::now().date_naive();
//!
//! let points = extract_iv_points(
//!     &rows,
//!     &market,
//!     &filter,
//!     OptionType::Call,
//!     &SolverParams::default(),
//!     today,
//! );
//!
//! let scatter = surface_points(&points, &market, StrikeAxis::Strike, VolUnits::Percent);
//! let grid = build_surface(&scatter, 30, StrikeAxis::Strike, VolUnits::Percent)?;
//! println!("{} x {} grid", grid.x_axis.len(), grid.y_axis.len());
//! # Ok::<(), iv_surface::SurfaceError>(())
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Fetch market data (the chain snapshot is handed in)
//! - American exercise or exotic payoffs
//! - Joint calibration across the surface; each quote solves alone

pub mod core;
pub mod models;
pub mod pipeline;
pub mod surface;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        parse_expiration, ChainRow, ChainSnapshot, IvPoint, MarketParams, NormalizedQuote,
        OptionType, QuoteFilter, StrikeAxis, SurfaceError, SurfaceResult, VolGrid, VolUnits,
    };

    // Numerics
    pub use crate::models::{
        implied_volatility, norm_cdf, norm_pdf, price as bs_price, price_bounds, NotComputable,
        SolverParams,
    };

    // Pipeline
    pub use crate::pipeline::{
        extract_iv_points, iv_points, normalize_quotes, solve_quotes, QuoteOutcome,
    };

    // Surface
    pub use crate::surface::{build_surface, surface_points, ScatterPoint, ScatteredInterp};
}

// Re-export main types at crate root
pub use crate::core::{SurfaceError, SurfaceResult};
