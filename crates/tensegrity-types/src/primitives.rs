//! Primitive descriptors handed to a solid-modeling or rendering backend.
//!
//! Coordinates are plain `[x, y, z]` arrays so that a backend can consume
//! them without depending on the lattice kernel.

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;
use crate::member::MemberKind;

/// Solid used to materialize a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeShape {
    /// Sphere of the node radius.
    #[default]
    Sphere,
    /// Axis-aligned cube with side `2 * radius`. Cheaper to mesh.
    Cube,
}

/// Profile swept along a member's direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CrossSection {
    /// Rectangular profile (bars). `width` runs along the frame's `x_dir`.
    Rectangle { width: f64, height: f64 },
    /// Circular profile (strings).
    Circle { radius: f64 },
}

impl CrossSection {
    pub fn area(&self) -> f64 {
        match *self {
            CrossSection::Rectangle { width, height } => width * height,
            CrossSection::Circle { radius } => std::f64::consts::PI * radius * radius,
        }
    }
}

/// Right-handed orthonormal frame at a member's start point.
///
/// `normal` points from start to end; the profile lies in the plane
/// spanned by `x_dir` and `y_dir`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamFrame {
    pub x_dir: [f64; 3],
    pub y_dir: [f64; 3],
    pub normal: [f64; 3],
    /// Unit quaternion `[w, x, y, z]` rotating the global axes onto this frame.
    pub rotation: [f64; 4],
}

/// A node ready for materialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePrimitive {
    pub node: NodeId,
    pub position: [f64; 3],
    pub radius: f64,
    pub shape: NodeShape,
}

/// A bar or string ready for extrusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgePrimitive {
    pub kind: MemberKind,
    pub from: NodeId,
    pub to: NodeId,
    pub start: [f64; 3],
    pub end: [f64; 3],
    /// `end - start`.
    pub direction: [f64; 3],
    pub length: f64,
    pub cross_section: CrossSection,
    pub frame: BeamFrame,
}

/// The complete emitted lattice, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatticeDescription {
    pub nodes: Vec<NodePrimitive>,
    pub edges: Vec<EdgePrimitive>,
}

impl LatticeDescription {
    pub fn bar_count(&self) -> usize {
        self.edges.iter().filter(|e| e.kind == MemberKind::Bar).count()
    }

    pub fn string_count(&self) -> usize {
        self.edges.iter().filter(|e| e.kind == MemberKind::String).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{SubNode, UnitCellIndex};

    #[test]
    fn test_cross_section_area() {
        let rect = CrossSection::Rectangle { width: 0.5, height: 0.5 };
        assert!((rect.area() - 0.25).abs() < 1e-12);
        let circle = CrossSection::Circle { radius: 1.0 };
        assert!((circle.area() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_cross_section_tagged_json() {
        let json = serde_json::to_string(&CrossSection::Circle { radius: 0.05 }).unwrap();
        assert_eq!(json, r#"{"type":"Circle","radius":0.05}"#);
    }

    #[test]
    fn test_description_counts() {
        let node = NodeId::new(UnitCellIndex::new(0, 0), SubNode::One);
        let other = NodeId::new(UnitCellIndex::new(0, 0), SubNode::Two);
        let frame = BeamFrame {
            x_dir: [1.0, 0.0, 0.0],
            y_dir: [0.0, 1.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            rotation: [1.0, 0.0, 0.0, 0.0],
        };
        let edge = |kind| EdgePrimitive {
            kind,
            from: node,
            to: other,
            start: [0.0; 3],
            end: [0.0, 0.0, 1.0],
            direction: [0.0, 0.0, 1.0],
            length: 1.0,
            cross_section: CrossSection::Circle { radius: 0.1 },
            frame,
        };
        let description = LatticeDescription {
            nodes: vec![],
            edges: vec![edge(MemberKind::Bar), edge(MemberKind::String), edge(MemberKind::String)],
        };
        assert_eq!(description.bar_count(), 1);
        assert_eq!(description.string_count(), 2);
        assert!(!description.is_empty());
        assert!(LatticeDescription::default().is_empty());
    }
}
