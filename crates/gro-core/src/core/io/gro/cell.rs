use super::error::BoxTokenError;
use super::record::NM_TO_ANGSTROM;
use crate::core::models::cell::UnitCell;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::{
    BoxVectors, TINY, lengths_and_angles_to_vectors, reduce_box_vectors,
    vectors_to_lengths_and_angles,
};
use nalgebra::Vector3;
use tracing::warn;

/// Position of each value of a nine-value box line as `(vector, component)`.
///
/// GRO lists the diagonal first and the off-diagonal terms after it:
/// `v1x v2y v3z v1y v1z v2x v2z v3x v3y`.
pub const TRICLINIC_COMPONENT_ORDER: [(usize, usize); 9] = [
    (0, 0),
    (1, 1),
    (2, 2),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 2),
    (2, 0),
    (2, 1),
];

/// Clearance added to the atom extent, per axis, when a box has to be invented (Angstroms).
pub const ENCLOSING_BOX_PADDING: f64 = 5.0;

/// Arranges nine box-line values into lattice vectors.
pub fn vectors_from_components(values: &[f64; 9]) -> BoxVectors {
    let mut vectors = [Vector3::zeros(); 3];
    for (&(vector, component), &value) in TRICLINIC_COMPONENT_ORDER.iter().zip(values) {
        vectors[vector][component] = value;
    }
    vectors
}

/// Flattens lattice vectors into the nine values of a box line.
pub fn components_from_vectors(vectors: &BoxVectors) -> [f64; 9] {
    TRICLINIC_COMPONENT_ORDER.map(|(vector, component)| vectors[vector][component])
}

/// Decodes the trailing box line of a GRO file.
///
/// Three values describe a rectangular box and nine a triclinic one; both are in
/// nanometers. Any other number of values yields no box.
///
/// # Errors
///
/// Returns a [`BoxTokenError`] naming the first token that is not a number.
pub fn decode_box_line(line: &str) -> Result<Option<UnitCell>, BoxTokenError> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| BoxTokenError {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.len() {
        3 => Ok(Some(UnitCell::orthorhombic(
            values[0] * NM_TO_ANGSTROM,
            values[1] * NM_TO_ANGSTROM,
            values[2] * NM_TO_ANGSTROM,
        ))),
        9 => {
            let mut components = [0.0; 9];
            for (slot, value) in components.iter_mut().zip(&values) {
                *slot = value * NM_TO_ANGSTROM;
            }
            let (lengths, angles) =
                vectors_to_lengths_and_angles(&vectors_from_components(&components));
            Ok(Some(UnitCell::new(lengths, angles)))
        }
        n => {
            warn!("Ignoring box line with {} values (expected 3 or 9).", n);
            Ok(None)
        }
    }
}

/// Encodes a box as a GRO box line, without the trailing newline.
///
/// The cell is converted to reduced lattice vectors first. Rectangular boxes are
/// written as their three diagonal values, all others as nine values in
/// [`TRICLINIC_COMPONENT_ORDER`].
pub fn encode_box_line(cell: &UnitCell) -> String {
    let vectors = reduce_box_vectors(&lengths_and_angles_to_vectors(&cell.lengths, &cell.angles));
    let components = components_from_vectors(&vectors);
    let count = if cell.is_orthorhombic(TINY) { 3 } else { 9 };

    components[..count]
        .iter()
        .map(|value| format!("{:10.5}", value / NM_TO_ANGSTROM))
        .collect()
}

/// Computes a rectangular box that encloses every atom with
/// [`ENCLOSING_BOX_PADDING`] of clearance per axis.
///
/// Returns `None` for a system without atoms.
pub fn enclosing_cell(system: &MolecularSystem) -> Option<UnitCell> {
    let mut positions = system.atoms_iter().map(|(_, atom)| atom.position.coords);
    let first = positions.next()?;
    let (min, max) = positions.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
    let extent = max - min;

    Some(UnitCell::orthorhombic(
        extent.x + ENCLOSING_BOX_PADDING,
        extent.y + ENCLOSING_BOX_PADDING,
        extent.z + ENCLOSING_BOX_PADDING,
    ))
}
