//! Provides input/output functionality for molecular file formats.
//!
//! The [`traits::MolecularFile`] trait gives every format the same reader/writer
//! API, and [`gro`] implements it for the fixed-column GROMACS GRO format.

pub mod gro;
pub mod traits;
