//! Topology hierarchy for sphtopo
//!
//! Boundary-representation objects (vertices, edges, faces, ...) are related
//! by "inferior" and "superior" links. This crate stores those objects in an
//! arena and maintains the links, both as two-way pairs and as deliberately
//! one-sided entries.

pub mod hierarchy;

pub use hierarchy::*;
