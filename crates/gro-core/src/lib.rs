//! # grocodec
//!
//! Reading and writing of GROMACS GRO coordinate files.
//!
//! A GRO file is a fixed-column text format holding a title, atom records with
//! positions and optional velocities, and an optional periodic box. This crate
//! decodes it into a [`core::models::system::MolecularSystem`] and encodes such a
//! system back, converting between the nanometers on disk and Angstroms in memory.
//!
//! ```
//! use grocodec::core::io::gro::GroFile;
//! use grocodec::core::io::traits::MolecularFile;
//! use std::io::Cursor;
//!
//! let content = "Water\n    1\n    1SOL     OW    1   0.126   1.624   1.679\n   1.86206   1.86206   1.86206\n";
//! assert!(GroFile::probe(&mut Cursor::new(content)));
//!
//! let (system, metadata) = GroFile::read_from(&mut Cursor::new(content)).unwrap();
//! assert_eq!(metadata.title, "Water");
//! assert_eq!(system.atom_count(), 1);
//!
//! let mut output = Vec::new();
//! GroFile::write_to(&system, &metadata, &mut output).unwrap();
//! assert!(String::from_utf8(output).unwrap().ends_with("   1.86206   1.86206   1.86206\n"));
//! ```
//!
//! - [`core::models`] - The molecular system container and its builder
//! - [`core::io`] - File format traits and the GRO codec
//! - [`core::utils`] - Box geometry: lengths/angles, lattice vectors, reduction

pub mod core;
