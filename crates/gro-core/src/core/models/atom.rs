use super::ids::ResidueId;
use nalgebra::{Point3, Vector3};

/// Represents a single particle of a coordinate file.
///
/// Positions are stored in Angstroms and velocities in Angstroms per picosecond,
/// regardless of the units used by the file the atom was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "OW", "CA").
    pub name: String,
    /// The serial number as it appeared in the source file.
    pub serial: usize,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The velocity of the atom in Angstroms per picosecond, if known.
    pub velocity: Option<Vector3<f64>>,
}

impl Atom {
    /// Creates a new `Atom` without a velocity.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `serial` - The serial number from the source file.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, serial: usize, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            serial,
            residue_id,
            position,
            velocity: None,
        }
    }

    /// Attaches a velocity to the atom.
    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = Some(velocity);
        self
    }
}
