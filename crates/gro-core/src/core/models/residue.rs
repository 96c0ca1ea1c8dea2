use super::ids::AtomId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,             // Residue number as written in the source file
    pub name: String,              // Name of the residue (e.g., "SOL", "ALA")
    pub(crate) atoms: Vec<AtomId>, // Atoms of this residue in insertion order
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }
}
