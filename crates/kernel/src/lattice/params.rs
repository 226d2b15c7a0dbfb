use serde::{Deserialize, Serialize};

use crate::error::LatticeError;

/// Largest cell count per axis; node angles compute `2 * index + 1` in `i64`.
const MAX_AXIS_CELLS: i64 = i64::MAX / 2;

fn axis_fits(cells: usize) -> bool {
    i64::try_from(cells).map_or(false, |c| c <= MAX_AXIS_CELLS)
}

/// Immutable lattice configuration.
///
/// Only constructible through validation: `p, q >= 2`, every derived count
/// fits in `usize`, and `0 < r < R`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct LatticeParameters {
    p: usize,
    q: usize,
    major_radius: f64,
    minor_radius: f64,
    cutaway: bool,
}

/// Unchecked wire form of [`LatticeParameters`].
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawParameters {
    p: usize,
    q: usize,
    major_radius: f64,
    minor_radius: f64,
    #[serde(default)]
    cutaway: bool,
}

impl TryFrom<RawParameters> for LatticeParameters {
    type Error = LatticeError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.p, raw.q, raw.major_radius, raw.minor_radius)?.with_cutaway(raw.cutaway))
    }
}

impl LatticeParameters {
    /// Validate and build parameters.
    ///
    /// * `p` - unit cells around the tube.
    /// * `q` - unit cells along the centerline.
    /// * `major_radius` - centerline radius `R`.
    /// * `minor_radius` - tube radius `r`.
    pub fn new(p: usize, q: usize, major_radius: f64, minor_radius: f64) -> Result<Self, LatticeError> {
        if p < 2 {
            return Err(LatticeError::invalid("p", format!("need at least 2 tube cells, got {p}")));
        }
        if q < 2 {
            return Err(LatticeError::invalid("q", format!("need at least 2 centerline cells, got {q}")));
        }
        if !axis_fits(p) {
            return Err(LatticeError::invalid("p", format!("too many tube cells: {p}")));
        }
        if !axis_fits(q) {
            return Err(LatticeError::invalid("q", format!("too many centerline cells: {q}")));
        }
        // 10 members per cell is the largest derived count.
        if p.checked_mul(q).and_then(|cells| cells.checked_mul(10)).is_none() {
            return Err(LatticeError::invalid(
                "q",
                format!("{p} x {q} cells overflow the member count"),
            ));
        }
        if !major_radius.is_finite() || major_radius <= 0.0 {
            return Err(LatticeError::invalid(
                "major_radius",
                format!("must be finite and positive, got {major_radius}"),
            ));
        }
        if !minor_radius.is_finite() || minor_radius <= 0.0 {
            return Err(LatticeError::invalid(
                "minor_radius",
                format!("must be finite and positive, got {minor_radius}"),
            ));
        }
        if minor_radius >= major_radius {
            return Err(LatticeError::invalid(
                "minor_radius",
                format!("tube radius {minor_radius} must be below centerline radius {major_radius}"),
            ));
        }

        Ok(Self {
            p,
            q,
            major_radius,
            minor_radius,
            cutaway: false,
        })
    }

    /// The reference habitat torus: 12 tube cells, 30 centerline cells, `R = 10`, `r = 5`.
    pub fn island_one() -> Self {
        Self {
            p: 12,
            q: 30,
            major_radius: 10.0,
            minor_radius: 5.0,
            cutaway: false,
        }
    }

    /// Parse and validate parameters from JSON.
    pub fn from_json(json: &str) -> Result<Self, LatticeError> {
        let raw: RawParameters = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn with_cutaway(mut self, cutaway: bool) -> Self {
        self.cutaway = cutaway;
        self
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn q(&self) -> usize {
        self.q
    }

    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    pub fn cutaway(&self) -> bool {
        self.cutaway
    }

    pub fn cell_count(&self) -> usize {
        self.p * self.q
    }

    pub fn node_count(&self) -> usize {
        2 * self.cell_count()
    }

    pub fn bar_count(&self) -> usize {
        2 * self.cell_count()
    }

    pub fn string_count(&self) -> usize {
        8 * self.cell_count()
    }

    pub fn edge_count(&self) -> usize {
        self.bar_count() + self.string_count()
    }
}
