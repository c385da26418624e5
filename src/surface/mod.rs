//! Surface assembly
//!
//! - interp: Delaunay/barycentric scattered-data interpolation
//! - builder: axis mapping and dense grid construction

pub mod builder;
pub mod interp;

pub use builder::{build_surface, surface_points};
pub use interp::{ScatterPoint, ScatteredInterp};
