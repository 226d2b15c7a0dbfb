use std::collections::HashSet;
use std::fmt;

use tensegrity_types::{Edge, MemberKind};
use tracing::{info, instrument, warn};

use crate::lattice::Lattice;

/// A structural defect found in a generated lattice.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditError {
    /// A member kind or the node set has the wrong size.
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An endpoint names a cell outside `[0, q) x [0, p)`.
    OutOfRange(Edge),
    /// A member starts and ends on the same node.
    SelfLoop(Edge),
    /// The same `(kind, from, to)` triple appears more than once.
    Duplicate(Edge),
    /// A bar joins two different sub-nodes.
    BarChangesSubNode(Edge),
    /// The member graph falls apart into several pieces.
    Disconnected { components: usize },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { what, expected, actual } => {
                write!(f, "expected {expected} {what}, found {actual}")
            }
            Self::OutOfRange(e) => write!(f, "{:?} {} -> {} leaves the lattice", e.kind, e.from, e.to),
            Self::SelfLoop(e) => write!(f, "{:?} {} loops onto itself", e.kind, e.from),
            Self::Duplicate(e) => write!(f, "{:?} {} -> {} emitted twice", e.kind, e.from, e.to),
            Self::BarChangesSubNode(e) => write!(f, "bar {} -> {} changes sub-node", e.from, e.to),
            Self::Disconnected { components } => write!(f, "lattice splits into {components} components"),
        }
    }
}

/// Result of [`audit_lattice`].
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeAudit {
    pub node_count: usize,
    pub bar_count: usize,
    pub string_count: usize,
    /// Connected components of the node/member graph.
    pub components: usize,
    pub errors: Vec<AuditError>,
}

impl LatticeAudit {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Disjoint-set forest over dense node indices.
struct UnionFind {
    parent: Vec<usize>,
    sets: usize,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            sets: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
            self.sets -= 1;
        }
    }
}

/// Check a lattice against the closed double-helix invariants: `2pq` nodes,
/// `2pq` bars, `8pq` strings, all endpoints in range, no self-loops or
/// repeated members, bars preserving their sub-node, one connected piece.
#[instrument(skip_all, fields(p = lattice.params().p(), q = lattice.params().q()))]
pub fn audit_lattice(lattice: &Lattice) -> LatticeAudit {
    let params = lattice.params();
    let (p, q) = (params.p(), params.q());
    let mut errors = Vec::new();

    let node_count = lattice.nodes().len();
    let bar_count = lattice.bars().count();
    let string_count = lattice.strings().count();
    for (what, expected, actual) in [
        ("nodes", params.node_count(), node_count),
        ("bars", params.bar_count(), bar_count),
        ("strings", params.string_count(), string_count),
    ] {
        if expected != actual {
            errors.push(AuditError::CountMismatch { what, expected, actual });
        }
    }

    let mut seen = HashSet::with_capacity(lattice.edges().len());
    let mut components = UnionFind::new(params.node_count());
    for edge in lattice.edges() {
        if !edge.from.cell.in_range(p, q) || !edge.to.cell.in_range(p, q) {
            errors.push(AuditError::OutOfRange(*edge));
            continue;
        }
        if edge.is_self_loop() {
            errors.push(AuditError::SelfLoop(*edge));
        }
        if !seen.insert(*edge) {
            errors.push(AuditError::Duplicate(*edge));
        }
        if edge.kind == MemberKind::Bar && edge.from.l != edge.to.l {
            errors.push(AuditError::BarChangesSubNode(*edge));
        }
        components.union(edge.from.dense_index(p), edge.to.dense_index(p));
    }

    if components.sets != 1 {
        errors.push(AuditError::Disconnected {
            components: components.sets,
        });
    }

    let audit = LatticeAudit {
        node_count,
        bar_count,
        string_count,
        components: components.sets,
        errors,
    };

    if audit.is_valid() {
        info!(nodes = node_count, bars = bar_count, strings = string_count, "lattice audit passed");
    } else {
        warn!(error_count = audit.errors.len(), first = %audit.errors[0], "lattice audit failed");
    }
    audit
}
