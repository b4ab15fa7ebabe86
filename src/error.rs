//! Error types for the wave-field construction pipeline.

use thiserror::Error;

/// Fatal or structurally-invalid conditions that abort the current timestep.
///
/// Per-candidate shadow-zone rejections and per-profile solver "offshore" outcomes
/// are *not* represented here: they are local recoveries handled with `Option`/early
/// returns inside a stage, never surfaced as an `Err`.
#[derive(Debug, Error)]
pub enum WaveFieldError {
    /// A shadow-zone boundary cell, or its flood-fill seed, fell outside the grid.
    #[error("coast {coast}, shadow zone {zone}: flood-fill seed lies outside the grid")]
    FloodFillNoGrid { coast: usize, zone: usize },

    /// No valid flood-fill seed was found within the weight/offset search, and the
    /// boundary line is long enough that the zone cannot simply be discarded.
    #[error(
        "coast {coast}, shadow zone {zone}: no flood-fill seed found (boundary length {boundary_len:.2})"
    )]
    FloodFillNoSeed {
        coast: usize,
        zone: usize,
        boundary_len: f64,
    },

    /// A profile point sits over a cell with no non-zero sediment/basement layer.
    #[error("profile point ({x}, {y}) has no top layer")]
    NoTopLayer { x: usize, y: usize },

    /// An internal invariant was violated; these should not occur in normal operation.
    #[error("internal geometry error: {0}")]
    Geometry(String),
}

pub type Result<T> = std::result::Result<T, WaveFieldError>;
