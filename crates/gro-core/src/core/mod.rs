//! # Core Module
//!
//! The building blocks of the codec: the in-memory molecular system, the geometry
//! of periodic boxes, and file format I/O.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, unit cell and system
//! - **File I/O** ([`io`]) - The `MolecularFile` trait and the GRO implementation
//! - **Geometry** ([`utils`]) - Conversions between box lengths/angles and lattice vectors

pub mod io;
pub mod models;
pub mod utils;
