//! Coastal wave-field construction.
//!
//! Drives the per-timestep pipeline that turns a raster grid and a vector
//! coastline into a wave field: shore-normal profile solves, shadow-zone
//! detection, and scattered-to-grid interpolation. See [`timestep::run_timestep`]
//! for the entry point.

pub mod cell;
pub mod coast;
pub mod constants;
pub mod dda;
pub mod error;
pub mod grid;
pub mod interpolate;
pub mod profile;
pub mod shadow;
pub mod solver;
pub mod stages;
pub mod timestep;
