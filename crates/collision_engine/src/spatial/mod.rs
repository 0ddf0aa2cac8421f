//! Spatial partitioning data structures
//!
//! Provides the broad-phase index used to find collision candidates on the
//! horizontal (x, z) plane.

pub mod spatial_query;
mod uniform_grid;

pub use spatial_query::SpatialQuery;
pub use uniform_grid::{CellCoord, UniformGrid};
