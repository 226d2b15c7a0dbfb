use tensegrity_types::{SubNode, UnitCellIndex};

use crate::lattice::{node_angles, LatticeParameters};
use crate::Tolerance;

/// Restricts emission to cells whose centerline angle lies in `[0, span)`.
///
/// Only the rendered span changes; every kept cell still contributes its
/// full two nodes and ten members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutawayFilter {
    params: LatticeParameters,
    span: f64,
    angle_tolerance: f64,
}

impl CutawayFilter {
    /// A ring sitting on the span boundary, within `tol.coincidence`, is excluded.
    pub fn new(params: LatticeParameters, span: f64, tol: &Tolerance) -> Self {
        Self {
            params,
            span,
            angle_tolerance: tol.coincidence,
        }
    }

    pub fn contains(&self, cell: UnitCellIndex) -> bool {
        let (phi, _) = node_angles(&self.params, cell.i as i64, 0, SubNode::One);
        phi < self.span - self.angle_tolerance
    }

    /// Number of centerline rings inside the span.
    pub fn ring_count(&self) -> usize {
        (0..self.params.q())
            .filter(|&i| self.contains(UnitCellIndex::new(i, 0)))
            .count()
    }
}
