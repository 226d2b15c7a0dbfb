//! Structural checks for generated lattices.

pub mod audit;

pub use audit::{audit_lattice, AuditError, LatticeAudit};
