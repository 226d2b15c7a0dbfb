//! Placement of lattice nodes on the torus.
//!
//! Sub-node `l` of cell `(i, k)` sits at
//!
//! ```text
//! phi   = (2i + l - 1) * PI / q
//! theta = (2k + l)     * PI / p
//! pos   = R (cos phi, sin phi, 0) + r (cos theta cos phi, cos theta sin phi, -sin theta)
//! ```
//!
//! so the `l = 1` and `l = 2` nodes trace two interleaved helices around the tube.

use std::f64::consts::PI;

use tensegrity_types::{NodeId, SubNode};

use super::params::LatticeParameters;
use super::topology::wrap;
use crate::geometry::Point3d;

/// Centerline angle `phi` and tube angle `theta` of a node.
///
/// Indices need not be wrapped; they are reduced into the lattice first.
pub fn node_angles(params: &LatticeParameters, i: i64, k: i64, l: SubNode) -> (f64, f64) {
    let (i, k) = (wrap(i, params.q()) as i64, wrap(k, params.p()) as i64);
    let phi = (2 * i + i64::from(l.offset())) as f64 * (PI / params.q() as f64);
    let theta = (2 * k + i64::from(l.label())) as f64 * (PI / params.p() as f64);
    (phi, theta)
}

/// Position of sub-node `l` of cell `(i, k)`.
pub fn node_position(params: &LatticeParameters, i: i64, k: i64, l: SubNode) -> Point3d {
    let (phi, theta) = node_angles(params, i, k, l);
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let big_r = params.major_radius();
    let small_r = params.minor_radius();

    Point3d::new(
        big_r * cos_phi + small_r * cos_theta * cos_phi,
        big_r * sin_phi + small_r * cos_theta * sin_phi,
        -small_r * sin_theta,
    )
}

/// Position of an in-range node.
pub fn position_of(params: &LatticeParameters, node: NodeId) -> Point3d {
    node_position(params, node.cell.i as i64, node.cell.k as i64, node.l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_same_point(a: Point3d, b: Point3d) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn test_first_node_by_substitution() {
        let params = LatticeParameters::island_one();
        let pos = node_position(&params, 0, 0, SubNode::One);
        // phi = 0, theta = PI / 12
        let theta = PI / 12.0;
        assert_same_point(pos, Point3d::new(10.0 + 5.0 * theta.cos(), 0.0, -5.0 * theta.sin()));
    }

    #[test]
    fn test_second_sub_node_is_half_step_along_centerline() {
        let params = LatticeParameters::island_one();
        let (phi1, theta1) = node_angles(&params, 3, 4, SubNode::One);
        let (phi2, theta2) = node_angles(&params, 3, 4, SubNode::Two);
        assert_abs_diff_eq!(phi2 - phi1, PI / 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(theta2 - theta1, PI / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nodes_lie_on_torus_surface() {
        let params = LatticeParameters::new(5, 7, 3.0, 1.25).unwrap();
        for i in 0..7 {
            for k in 0..5 {
                for l in SubNode::ALL {
                    let pos = node_position(&params, i, k, l);
                    let radial = (pos.x * pos.x + pos.y * pos.y).sqrt();
                    let tube = ((radial - 3.0).powi(2) + pos.z * pos.z).sqrt();
                    assert_abs_diff_eq!(tube, 1.25, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_periodic_in_both_indices() {
        let params = LatticeParameters::new(4, 6, 10.0, 2.0).unwrap();
        for l in SubNode::ALL {
            let base = node_position(&params, 2, 1, l);
            assert_same_point(node_position(&params, 2 + 6, 1, l), base);
            assert_same_point(node_position(&params, 2, 1 + 4, l), base);
            assert_same_point(node_position(&params, 2 - 6, 1 - 4, l), base);
        }
    }

    #[test]
    fn test_extreme_indices_stay_finite() {
        let params = LatticeParameters::new(4, 6, 10.0, 2.0).unwrap();
        for l in SubNode::ALL {
            for (i, k) in [(i64::MAX, i64::MIN), (i64::MIN, i64::MAX)] {
                let pos = node_position(&params, i, k, l);
                assert!(pos.x.is_finite() && pos.y.is_finite() && pos.z.is_finite());
                let expected = node_position(&params, i.rem_euclid(6), k.rem_euclid(4), l);
                assert_same_point(pos, expected);
            }
        }
    }

    #[test]
    fn test_position_of_matches_raw_indices() {
        let params = LatticeParameters::island_one();
        let node = NodeId::new(tensegrity_types::UnitCellIndex::new(29, 11), SubNode::Two);
        assert_eq!(position_of(&params, node), node_position(&params, 29, 11, SubNode::Two));
    }
}
