use super::atom::Atom;
use super::cell::UnitCell;
use super::ids::{AtomId, ResidueId};
use super::residue::Residue;
use slotmap::{SecondaryMap, SlotMap};

/// Represents a complete molecular system with atoms, residues, and an optional box.
///
/// Atoms and residues are stored in slot maps for stable IDs, while separate order
/// lists remember insertion order. Every iterator yields items in that order, which
/// is also the order in which coordinate files are written.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Atom IDs in insertion order.
    atom_order: Vec<AtomId>,
    /// Residue IDs in insertion order.
    residue_order: Vec<ResidueId>,
    /// The periodic box, if one is defined.
    cell: Option<UnitCell>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in insertion order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(AtomId, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order.iter().map(|&id| (id, &self.atoms[id]))
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in insertion order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ResidueId, &Residue)` pairs.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residue_order.iter().map(|&id| (id, &self.residues[id]))
    }

    /// Maps every residue ID to its zero-based position in insertion order.
    pub fn residue_indices(&self) -> SecondaryMap<ResidueId, usize> {
        self.residue_order
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect()
    }

    pub fn atom_count(&self) -> usize {
        self.atom_order.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residue_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_order.is_empty()
    }

    /// Appends a new residue to the system.
    ///
    /// Residue numbers are file-local and may repeat, so this always creates a new
    /// residue; grouping consecutive atoms is left to the caller.
    ///
    /// # Arguments
    ///
    /// * `number` - The residue number as found in the source file.
    /// * `name` - The name of the residue.
    ///
    /// # Return
    ///
    /// The ID of the newly created residue.
    pub fn add_residue(&mut self, number: isize, name: &str) -> ResidueId {
        let residue_id = self.residues.insert(Residue::new(number, name));
        self.residue_order.push(residue_id);
        residue_id
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Arguments
    ///
    /// * `residue_id` - The ID of the residue to add the atom to.
    /// * `atom` - The atom to add. Its `residue_id` field is overwritten.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (e.g., if residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;
        atom.residue_id = residue_id;
        let atom_id = self.atoms.insert(atom);
        residue.add_atom(atom_id);
        self.atom_order.push(atom_id);
        Some(atom_id)
    }

    /// Returns the periodic box, if one is defined.
    pub fn cell(&self) -> Option<&UnitCell> {
        self.cell.as_ref()
    }

    pub fn set_cell(&mut self, cell: Option<UnitCell>) {
        self.cell = cell;
    }

    /// Returns `true` if the system has atoms and every one of them carries a velocity.
    pub fn has_velocities(&self) -> bool {
        !self.is_empty() && self.atoms_iter().all(|(_, atom)| atom.velocity.is_some())
    }
}
