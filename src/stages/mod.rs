//! The per-timestep wave-field construction pipeline, one module per stage.
//!
//! [`crate::timestep::run_timestep`] drives these in a fixed S0-S7 order,
//! each stage reading the previous stage's outputs.

pub mod coast_interp;
pub mod energy;
pub mod hole_fill;
pub mod profile_waves;
pub mod reset;
pub mod scatter_to_grid;
pub mod tangent;
pub mod wave_angle;
