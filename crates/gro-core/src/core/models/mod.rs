//! # Core Models Module
//!
//! This module contains the data structures used to represent a molecular system in
//! memory: atoms with their coordinates and optional velocities, the residues that
//! group them, and the periodic box.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation with coordinates and velocity
//! - [`residue`] - Ordered group of atoms sharing a residue number and name
//! - [`cell`] - Periodic box in lengths-and-angles form
//! - [`system`] - Complete molecular system with all components
//! - [`builder`] - Incremental construction of a system in file order
//! - [`ids`] - Unique identifier types for atoms and residues
//!
//! ## Usage
//!
//! ```
//! use grocodec::core::models::builder::MolecularSystemBuilder;
//! use nalgebra::Point3;
//!
//! let mut builder = MolecularSystemBuilder::new();
//! builder.add_atom(1, "SOL", "OW", 1, Point3::new(10.0, 20.0, 30.0), None);
//! let system = builder.build();
//! assert_eq!(system.atom_count(), 1);
//! ```

pub mod atom;
pub mod builder;
pub mod cell;
pub mod ids;
pub mod residue;
pub mod system;
