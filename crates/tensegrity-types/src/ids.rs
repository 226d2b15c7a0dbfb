use std::fmt;

use serde::{Deserialize, Serialize};

/// One repeating cell of the lattice, addressed by its circumferential
/// index `i` (`0 <= i < q`) and tube index `k` (`0 <= k < p`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitCellIndex {
    pub i: usize,
    pub k: usize,
}

impl UnitCellIndex {
    pub const fn new(i: usize, k: usize) -> Self {
        Self { i, k }
    }

    /// Whether the cell lies inside a `q` x `p` lattice.
    pub fn in_range(&self, p: usize, q: usize) -> bool {
        self.i < q && self.k < p
    }
}

impl fmt::Display for UnitCellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.k)
    }
}

/// Which of the two nodes owned by a unit cell.
///
/// Serialized as the integer `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SubNode {
    One,
    Two,
}

impl SubNode {
    pub const ALL: [SubNode; 2] = [SubNode::One, SubNode::Two];

    /// The 1-based label `l`.
    pub const fn label(self) -> u8 {
        match self {
            SubNode::One => 1,
            SubNode::Two => 2,
        }
    }

    /// Half-step offset `l - 1` used in the angular parametrization.
    pub const fn offset(self) -> u8 {
        self.label() - 1
    }
}

/// Rejected sub-node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSubNode(pub u8);

impl fmt::Display for InvalidSubNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-node label must be 1 or 2, got {}", self.0)
    }
}

impl std::error::Error for InvalidSubNode {}

impl TryFrom<u8> for SubNode {
    type Error = InvalidSubNode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SubNode::One),
            2 => Ok(SubNode::Two),
            other => Err(InvalidSubNode(other)),
        }
    }
}

impl From<SubNode> for u8 {
    fn from(l: SubNode) -> Self {
        l.label()
    }
}

/// A lattice node: sub-node `l` of cell `(i, k)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub cell: UnitCellIndex,
    pub l: SubNode,
}

impl NodeId {
    pub const fn new(cell: UnitCellIndex, l: SubNode) -> Self {
        Self { cell, l }
    }

    /// Dense index in `0..2pq`, ordered by `i`, then `k`, then `l`.
    pub fn dense_index(&self, p: usize) -> usize {
        (self.cell.i * p + self.cell.k) * 2 + self.l.offset() as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.cell.i, self.cell.k, self.l.label())
    }
}
