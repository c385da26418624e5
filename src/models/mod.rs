//! Pricing and inversion numerics
//!
//! - black_scholes: closed-form pricer and no-arbitrage bounds
//! - implied_vol: bracketed (Brent) volatility solver

pub mod black_scholes;
pub mod implied_vol;

pub use black_scholes::{norm_cdf, norm_pdf, price, price_bounds};
pub use implied_vol::{implied_volatility, NotComputable, SolverParams};
