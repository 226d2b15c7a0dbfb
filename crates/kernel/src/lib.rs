//! Geometry and connectivity for double-helix toroidal tensegrity lattices.
//!
//! The pipeline is `LatticeParameters` -> [`lattice::generate`] ->
//! [`emit::GeometryEmitter::emit`] -> [`tensegrity_types::LatticeDescription`],
//! which a backend consumes through [`traits::PrimitiveSink`].

pub mod emit;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod traits;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use emit::{build_lattice, BarProfile, EmitterConfig, GeometryEmitter};
pub use error::LatticeError;
pub use lattice::{generate, Lattice, LatticeParameters, Node};
pub use traits::{fold_into, PrimitiveSink};
pub use validation::{audit_lattice, LatticeAudit};

/// Tolerances for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Points closer than this are considered coincident.
    pub coincidence: f64,
    /// Below this `|Z x normal|`, a member frame uses the X reference axis.
    pub frame_fallback: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            frame_fallback: 1e-4,
        }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.is_nan() || length.abs() < self.coincidence
    }
}
