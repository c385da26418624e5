//! Core data types for the IV surface pipeline
//!
//! Defines fundamental types:
//! - ChainRow / NormalizedQuote: raw and cleaned option quotes
//! - MarketParams: spot, rate, dividend yield shared across a run
//! - IvPoint: one solved implied volatility
//! - VolGrid: dense output surface

pub mod error;
pub mod grid;
pub mod option;
pub mod quote;

pub use error::*;
pub use grid::*;
pub use option::*;
pub use quote::*;
