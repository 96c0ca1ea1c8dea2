use super::atom::Atom;
use super::cell::UnitCell;
use super::ids::ResidueId;
use super::system::MolecularSystem;
use nalgebra::{Point3, Vector3};

/// Incrementally assembles a [`MolecularSystem`] from atoms listed in file order.
///
/// Consecutive atoms that share a residue number and residue name are grouped into
/// one residue. A change in either starts a new residue, so repeated or wrapped
/// residue numbers further down a file still produce distinct residues.
pub struct MolecularSystemBuilder {
    system: MolecularSystem,

    // --- Builder-specific state for residue grouping ---
    current_residue: Option<(isize, String, ResidueId)>,
}

impl Default for MolecularSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MolecularSystemBuilder {
    pub fn new() -> Self {
        Self {
            system: MolecularSystem::new(),
            current_residue: None,
        }
    }

    fn residue_for(&mut self, number: isize, name: &str) -> ResidueId {
        match &self.current_residue {
            Some((current_number, current_name, id))
                if *current_number == number && current_name == name =>
            {
                *id
            }
            _ => {
                let id = self.system.add_residue(number, name);
                self.current_residue = Some((number, name.to_string(), id));
                id
            }
        }
    }

    pub fn add_atom(
        &mut self,
        residue_number: isize,
        residue_name: &str,
        name: &str,
        serial: usize,
        position: Point3<f64>,
        velocity: Option<Vector3<f64>>,
    ) -> &mut Self {
        let residue_id = self.residue_for(residue_number, residue_name);
        let mut atom = Atom::new(name, serial, residue_id, position);
        atom.velocity = velocity;
        let inserted = self.system.add_atom_to_residue(residue_id, atom);
        debug_assert!(inserted.is_some(), "builder residues always exist");
        self
    }

    pub fn cell(&mut self, cell: Option<UnitCell>) -> &mut Self {
        self.system.set_cell(cell);
        self
    }

    pub fn build(self) -> MolecularSystem {
        self.system
    }
}
