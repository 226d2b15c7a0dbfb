//! Conversion of lattice nodes and edges into backend primitives.

pub mod config;
pub mod cutaway;

pub use config::{BarProfile, EmitterConfig};
pub use cutaway::CutawayFilter;

use tensegrity_types::{
    BeamFrame, CrossSection, Edge, EdgePrimitive, LatticeDescription, MemberKind, NodePrimitive,
};
use tracing::{debug, info, instrument};

use crate::error::LatticeError;
use crate::geometry::OrientationFrame;
use crate::lattice::{generate, position_of, Lattice, LatticeParameters, Node};

/// Turns a [`Lattice`] into a [`LatticeDescription`].
#[derive(Debug, Clone)]
pub struct GeometryEmitter {
    config: EmitterConfig,
}

impl GeometryEmitter {
    pub fn new(config: EmitterConfig) -> Result<Self, LatticeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn node_radius(&self, params: &LatticeParameters) -> f64 {
        params.minor_radius() * self.config.node_radius_ratio
    }

    pub fn cross_section(&self, params: &LatticeParameters, kind: MemberKind) -> CrossSection {
        let r = params.minor_radius();
        match kind {
            MemberKind::Bar => {
                let side = r * self.config.bar_profile.side_ratio();
                CrossSection::Rectangle {
                    width: side,
                    height: side,
                }
            }
            MemberKind::String => CrossSection::Circle {
                radius: r * self.config.string_radius_ratio,
            },
        }
    }

    pub fn emit_node(&self, params: &LatticeParameters, node: &Node) -> NodePrimitive {
        NodePrimitive {
            node: node.id,
            position: node.position.to_array(),
            radius: self.node_radius(params),
            shape: self.config.node_shape,
        }
    }

    /// Emit one member. Fails on coincident endpoints.
    pub fn emit_edge(&self, params: &LatticeParameters, edge: &Edge) -> Result<EdgePrimitive, LatticeError> {
        let start = position_of(params, edge.from);
        let end = position_of(params, edge.to);
        let direction = end - start;
        let length = direction.length();

        let degenerate = || LatticeError::DegenerateGeometry {
            kind: edge.kind,
            from: edge.from,
            to: edge.to,
            length,
        };
        if self.config.tolerance.is_zero_length(length) {
            return Err(degenerate());
        }
        let frame = OrientationFrame::from_direction(direction, &self.config.tolerance).ok_or_else(degenerate)?;

        Ok(EdgePrimitive {
            kind: edge.kind,
            from: edge.from,
            to: edge.to,
            start: start.to_array(),
            end: end.to_array(),
            direction: direction.to_array(),
            length,
            cross_section: self.cross_section(params, edge.kind),
            frame: BeamFrame {
                x_dir: frame.x_dir.to_array(),
                y_dir: frame.y_dir.to_array(),
                normal: frame.normal.to_array(),
                rotation: frame.rotation_wxyz(),
            },
        })
    }

    /// Emit every node and member of `lattice`, in lattice order.
    ///
    /// A cutaway lattice keeps only cells inside `cutaway_span`. Any
    /// degenerate member fails the whole emission.
    #[instrument(skip_all, fields(p = lattice.params().p(), q = lattice.params().q(), cutaway = lattice.params().cutaway()))]
    pub fn emit(&self, lattice: &Lattice) -> Result<LatticeDescription, LatticeError> {
        let params = lattice.params();
        let cutaway = params
            .cutaway()
            .then(|| CutawayFilter::new(*params, self.config.cutaway_span, &self.config.tolerance));
        if let Some(filter) = &cutaway {
            debug!(rings = filter.ring_count(), span = self.config.cutaway_span, "applying cutaway");
        }
        let keep = |cell| cutaway.as_ref().map_or(true, |f| f.contains(cell));

        let nodes: Vec<NodePrimitive> = lattice
            .nodes()
            .iter()
            .filter(|n| keep(n.id.cell))
            .map(|n| self.emit_node(params, n))
            .collect();

        let kept: Vec<&Edge> = lattice.edges().iter().filter(|e| keep(e.from.cell)).collect();
        let edges = self.emit_edges(params, &kept)?;

        let description = LatticeDescription { nodes, edges };
        info!(
            nodes = description.nodes.len(),
            bars = description.bar_count(),
            strings = description.string_count(),
            "emitted lattice primitives"
        );
        Ok(description)
    }

    #[cfg(feature = "parallel")]
    fn emit_edges(&self, params: &LatticeParameters, edges: &[&Edge]) -> Result<Vec<EdgePrimitive>, LatticeError> {
        use rayon::prelude::*;

        edges.par_iter().map(|e| self.emit_edge(params, e)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn emit_edges(&self, params: &LatticeParameters, edges: &[&Edge]) -> Result<Vec<EdgePrimitive>, LatticeError> {
        edges.iter().map(|e| self.emit_edge(params, e)).collect()
    }
}

/// Generate and emit in one step.
pub fn build_lattice(params: &LatticeParameters, config: EmitterConfig) -> Result<LatticeDescription, LatticeError> {
    let emitter = GeometryEmitter::new(config)?;
    emitter.emit(&generate(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensegrity_types::{NodeId, NodeShape, SubNode, UnitCellIndex};

    fn id(i: usize, k: usize, l: SubNode) -> NodeId {
        NodeId::new(UnitCellIndex::new(i, k), l)
    }

    fn assert_square_side(section: CrossSection, expected: f64) {
        match section {
            CrossSection::Rectangle { width, height } => {
                assert!((width - expected).abs() < 1e-12);
                assert!((height - expected).abs() < 1e-12);
            }
            other => panic!("expected a rectangular profile, got {other:?}"),
        }
    }

    #[test]
    fn test_sizes_follow_tube_radius() {
        let params = LatticeParameters::island_one();
        let emitter = GeometryEmitter::new(EmitterConfig::default()).unwrap();
        assert!((emitter.node_radius(&params) - 0.1).abs() < 1e-12);
        assert_square_side(emitter.cross_section(&params, MemberKind::Bar), 0.5);
        match emitter.cross_section(&params, MemberKind::String) {
            CrossSection::Circle { radius } => assert!((radius - 0.05).abs() < 1e-12),
            other => panic!("expected a circular profile, got {other:?}"),
        }

        let slender = GeometryEmitter::new(EmitterConfig::slender()).unwrap();
        assert_square_side(slender.cross_section(&params, MemberKind::Bar), 0.1);
    }

    #[test]
    fn test_edge_primitive_geometry() {
        let params = LatticeParameters::island_one();
        let emitter = GeometryEmitter::new(EmitterConfig::default()).unwrap();
        let edge = Edge::new(MemberKind::Bar, id(0, 0, SubNode::One), id(1, 1, SubNode::One));
        let primitive = emitter.emit_edge(&params, &edge).unwrap();

        let start = position_of(&params, edge.from);
        let end = position_of(&params, edge.to);
        assert_eq!(primitive.start, start.to_array());
        assert_eq!(primitive.end, end.to_array());
        assert!((primitive.length - start.distance_to(&end)).abs() < 1e-12);
        for axis in 0..3 {
            assert!((primitive.direction[axis] - (end.to_array()[axis] - start.to_array()[axis])).abs() < 1e-12);
            assert!((primitive.frame.normal[axis] * primitive.length - primitive.direction[axis]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_coincident_endpoints_are_rejected() {
        let params = LatticeParameters::island_one();
        let emitter = GeometryEmitter::new(EmitterConfig::default()).unwrap();
        let node = id(3, 4, SubNode::Two);
        let edge = Edge::new(MemberKind::String, node, node);
        match emitter.emit_edge(&params, &edge) {
            Err(LatticeError::DegenerateGeometry { kind, length, .. }) => {
                assert_eq!(kind, MemberKind::String);
                assert_eq!(length, 0.0);
            }
            other => panic!("expected DegenerateGeometry, got {other:?}"),
        }
    }

    #[test]
    fn test_node_shape_is_forwarded() {
        let params = LatticeParameters::new(2, 2, 2.0, 1.0).unwrap();
        let description = build_lattice(&params, EmitterConfig::simplified()).unwrap();
        assert!(description.nodes.iter().all(|n| n.shape == NodeShape::Cube));
        assert!(description.nodes.iter().all(|n| (n.radius - 0.02).abs() < 1e-12));
    }

    #[test]
    fn test_cutaway_restricts_span_not_density() {
        let params = LatticeParameters::island_one().with_cutaway(true);
        let description = build_lattice(&params, EmitterConfig::default()).unwrap();
        // 15 of 30 rings, each ring 12 cells.
        assert_eq!(description.nodes.len(), 2 * 12 * 15);
        assert_eq!(description.bar_count(), 2 * 12 * 15);
        assert_eq!(description.string_count(), 8 * 12 * 15);
        assert!(description.nodes.iter().all(|n| n.node.cell.i < 15));
        assert!(description.edges.iter().all(|e| e.from.cell.i < 15));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_emission() {
        let config = EmitterConfig {
            node_radius_ratio: f64::INFINITY,
            ..EmitterConfig::default()
        };
        let params = LatticeParameters::island_one();
        assert!(matches!(
            build_lattice(&params, config),
            Err(LatticeError::InvalidParameters { parameter: "node_radius_ratio", .. })
        ));
    }
}
