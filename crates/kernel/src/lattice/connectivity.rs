use serde::Serialize;
use tensegrity_types::{Edge, MemberKind, NodeId, SubNode, UnitCellIndex};
use tracing::{debug, info, instrument};

use super::params::LatticeParameters;
use super::position::position_of;
use super::topology::CellNeighborhood;
use crate::geometry::Point3d;

/// One member of the unit-cell template. The source is always a sub-node
/// of the owning cell; the target is addressed by a cell offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberSpec {
    pub kind: MemberKind,
    pub from: SubNode,
    pub di: i8,
    pub dk: i8,
    pub to: SubNode,
}

const fn member(kind: MemberKind, from: SubNode, di: i8, dk: i8, to: SubNode) -> MemberSpec {
    MemberSpec { kind, from, di, dk, to }
}

/// Members emitted by every unit cell: two bars, then eight strings.
pub const UNIT_CELL_TEMPLATE: [MemberSpec; 10] = [
    member(MemberKind::Bar, SubNode::One, 1, 1, SubNode::One),
    member(MemberKind::Bar, SubNode::Two, 1, -1, SubNode::Two),
    member(MemberKind::String, SubNode::One, 0, 0, SubNode::Two),
    member(MemberKind::String, SubNode::Two, 1, 0, SubNode::One),
    member(MemberKind::String, SubNode::One, -1, -1, SubNode::Two),
    member(MemberKind::String, SubNode::Two, 0, 1, SubNode::One),
    member(MemberKind::String, SubNode::Two, 0, 1, SubNode::Two),
    member(MemberKind::String, SubNode::One, 1, 0, SubNode::One),
    member(MemberKind::String, SubNode::One, 0, 1, SubNode::One),
    member(MemberKind::String, SubNode::Two, 1, 0, SubNode::Two),
];

/// A placed lattice node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Point3d,
}

/// Everything a single unit cell contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMembers {
    pub nodes: [Node; 2],
    pub edges: [Edge; 10],
}

/// Apply the template to one cell.
pub fn resolve_cell(params: &LatticeParameters, cell: UnitCellIndex) -> CellMembers {
    let neighborhood = CellNeighborhood::resolve(params, cell);

    let nodes = SubNode::ALL.map(|l| {
        let id = NodeId::new(cell, l);
        Node {
            id,
            position: position_of(params, id),
        }
    });

    let edges = UNIT_CELL_TEMPLATE.map(|spec| {
        Edge::new(
            spec.kind,
            NodeId::new(cell, spec.from),
            NodeId::new(neighborhood.resolve_offset(spec.di, spec.dk), spec.to),
        )
    });

    CellMembers { nodes, edges }
}

/// Immutable node/edge snapshot of a whole lattice.
///
/// Nodes are ordered by `i`, then `k`, then `l`; edges by owning cell, then
/// template order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lattice {
    pub(crate) params: LatticeParameters,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

impl Lattice {
    pub fn params(&self) -> &LatticeParameters {
        &self.params
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn bars(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.kind == MemberKind::Bar)
    }

    pub fn strings(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.kind == MemberKind::String)
    }

    /// Look up a node; `None` when its cell is outside the lattice.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if !id.cell.in_range(self.params.p(), self.params.q()) {
            return None;
        }
        self.nodes.get(id.dense_index(self.params.p()))
    }

    pub fn position(&self, id: NodeId) -> Option<Point3d> {
        self.node(id).map(|n| n.position)
    }
}

/// Nodes and edges of all cells sharing one centerline index `i`.
#[derive(Debug)]
struct Ring {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

fn resolve_ring(params: &LatticeParameters, i: usize) -> Ring {
    let mut ring = Ring {
        nodes: Vec::with_capacity(2 * params.p()),
        edges: Vec::with_capacity(UNIT_CELL_TEMPLATE.len() * params.p()),
    };
    for k in 0..params.p() {
        let members = resolve_cell(params, UnitCellIndex::new(i, k));
        ring.nodes.extend(members.nodes);
        ring.edges.extend(members.edges);
    }
    debug!(i, nodes = ring.nodes.len(), edges = ring.edges.len(), "resolved ring");
    ring
}

#[cfg(feature = "parallel")]
fn resolve_rings(params: &LatticeParameters) -> Vec<Ring> {
    use rayon::prelude::*;

    (0..params.q())
        .into_par_iter()
        .map(|i| resolve_ring(params, i))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn resolve_rings(params: &LatticeParameters) -> Vec<Ring> {
    (0..params.q()).map(|i| resolve_ring(params, i)).collect()
}

/// Generate the full lattice for `params`.
#[instrument(skip(params), fields(p = params.p(), q = params.q()))]
pub fn generate(params: &LatticeParameters) -> Lattice {
    let mut nodes = Vec::with_capacity(params.node_count());
    let mut edges = Vec::with_capacity(params.edge_count());

    for ring in resolve_rings(params) {
        nodes.extend(ring.nodes);
        edges.extend(ring.edges);
    }

    info!(nodes = nodes.len(), edges = edges.len(), "generated tensegrity lattice");

    Lattice {
        params: *params,
        nodes,
        edges,
    }
}
