//! Node placement and unit-cell connectivity of the lattice.

pub mod connectivity;
pub mod params;
pub mod position;
pub mod topology;

pub use connectivity::{generate, resolve_cell, CellMembers, Lattice, MemberSpec, Node, UNIT_CELL_TEMPLATE};
pub use params::LatticeParameters;
pub use position::{node_angles, node_position, position_of};
pub use topology::{wrap, CellNeighborhood};
