//! Seam between the lattice kernel and a solid-modeling backend.
//!
//! The kernel hands over plain primitive descriptors and never sees how the
//! backend builds or stores solids.

use tensegrity_types::{EdgePrimitive, LatticeDescription, NodePrimitive};
use tracing::{debug, instrument};

/// Consumer of emitted primitives, e.g. an assembly builder that turns
/// nodes into spheres and members into extruded profiles.
pub trait PrimitiveSink {
    type Error;

    /// Materialize one node.
    fn add_node(&mut self, node: &NodePrimitive) -> Result<(), Self::Error>;

    /// Materialize one bar or string.
    fn add_edge(&mut self, edge: &EdgePrimitive) -> Result<(), Self::Error>;
}

/// Feed a description into `sink`: nodes first, then members, each in
/// emission order. Stops at the first sink error.
#[instrument(skip_all, fields(nodes = description.nodes.len(), edges = description.edges.len()))]
pub fn fold_into<S: PrimitiveSink>(description: &LatticeDescription, sink: &mut S) -> Result<(), S::Error> {
    for node in &description.nodes {
        sink.add_node(node)?;
    }
    for edge in &description.edges {
        sink.add_edge(edge)?;
    }
    debug!("description folded into sink");
    Ok(())
}

/// Sink that collects primitives into vectors.
impl PrimitiveSink for LatticeDescription {
    type Error = std::convert::Infallible;

    fn add_node(&mut self, node: &NodePrimitive) -> Result<(), Self::Error> {
        self.nodes.push(*node);
        Ok(())
    }

    fn add_edge(&mut self, edge: &EdgePrimitive) -> Result<(), Self::Error> {
        self.edges.push(*edge);
        Ok(())
    }
}
