use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// Structural role of a lattice member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Rigid compression member.
    Bar,
    /// Tension member.
    String,
}

/// A directed connection between two lattice nodes.
///
/// `from` always belongs to the unit cell that emitted the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub kind: MemberKind,
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub const fn new(kind: MemberKind, from: NodeId, to: NodeId) -> Self {
        Self { kind, from, to }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
