//! Reader and writer for GROMACS GRO coordinate files.
//!
//! A GRO file holds a title line, an atom count, one fixed-column line per atom, and
//! an optional box line:
//!
//! ```text
//! Test
//!     2
//!     1SOL     OW    1   1.000   2.000   3.000
//!     1SOL    HW1    2   1.100   2.000   3.000
//!    3.00000   3.00000   3.00000
//! ```
//!
//! Coordinate field widths are not declared anywhere in the file. They are inferred
//! from the first atom line as a [`layout::ColumnLayout`] and reused for the rest of
//! the file. Values are nanometers on disk and Angstroms in memory.

pub mod cell;
pub mod error;
pub mod layout;
pub mod record;
mod sniff;

pub use error::{GroError, RecordErrorKind};
pub use layout::ColumnLayout;
pub use record::{AtomLineEncoder, AtomRecord, FixedWidthTruncate, IndexOverflow};

use crate::core::io::traits::MolecularFile;
use crate::core::models::builder::MolecularSystemBuilder;
use crate::core::models::system::MolecularSystem;
use cell::{decode_box_line, enclosing_cell, encode_box_line};
use record::decode_atom_line;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, instrument, trace, warn};

/// Title written when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "GROningen MAchine for Chemical Simulation";
pub const DEFAULT_PRECISION: usize = 3;
pub const MAX_PRECISION: usize = 10;

/// Largest residue number or serial that fits the five-column fields.
const MAX_INDEX: usize = 99_999;

/// File-level settings of a GRO file.
///
/// Reads fill in the title and the precision inferred from the coordinate columns;
/// writes use all fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroMetadata {
    pub title: String,
    /// Decimals of position fields; velocities get one more.
    pub precision: usize,
    /// Skip the box line when the system has no box, instead of writing one that
    /// encloses all atoms.
    pub omit_box: bool,
    pub index_overflow: IndexOverflow,
}

impl Default for GroMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            precision: DEFAULT_PRECISION,
            omit_box: false,
            index_overflow: IndexOverflow::default(),
        }
    }
}

pub struct GroFile;

/// The title must stay on line 1, so line breaks inside it become spaces.
fn single_line_title(title: &str) -> Cow<'_, str> {
    if title.contains(['\n', '\r']) {
        warn!("Title contains line breaks; writing them as spaces.");
        Cow::Owned(title.replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(title)
    }
}

impl MolecularFile for GroFile {
    type Metadata = GroMetadata;
    type Error = GroError;

    #[instrument(skip_all, name = "gro_read")]
    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();

        let title = lines.next().transpose()?.unwrap_or_default();
        let count_line = lines.next().transpose()?.unwrap_or_default();
        let atom_count: usize =
            count_line
                .trim()
                .parse()
                .map_err(|_| GroError::MalformedHeader {
                    line: 2,
                    value: count_line.trim().to_string(),
                })?;
        debug!("Reading {} atom records.", atom_count);

        let mut builder = MolecularSystemBuilder::new();
        let mut layout: Option<ColumnLayout> = None;

        for index in 0..atom_count {
            let line_num = index + 3;
            let line = lines.next().transpose()?.ok_or(GroError::Truncated {
                expected: atom_count,
                found: index,
            })?;

            let current = match layout {
                Some(layout) => layout,
                None => {
                    let derived =
                        ColumnLayout::derive(&line).map_err(|kind| GroError::MalformedRecord {
                            line: line_num,
                            kind,
                        })?;
                    debug!("Inferred column layout: {}", derived);
                    *layout.insert(derived)
                }
            };

            let record =
                decode_atom_line(&line, &current).map_err(|kind| GroError::MalformedRecord {
                    line: line_num,
                    kind,
                })?;
            trace!("Decoded atom record {:?}", record);

            builder.add_atom(
                record.residue_number,
                &record.residue_name,
                &record.atom_name,
                record.serial,
                record.position,
                record.velocity,
            );
        }

        let box_line_num = atom_count + 3;
        let cell = match lines.next().transpose()? {
            Some(line) if !line.trim().is_empty() => {
                decode_box_line(&line).map_err(|e| GroError::MalformedBox {
                    line: box_line_num,
                    token: e.token,
                })?
            }
            _ => None,
        };
        if cell.is_none() {
            debug!("No periodic box found.");
        }
        builder.cell(cell);

        let metadata = GroMetadata {
            title: title.trim_end_matches('\r').to_string(),
            precision: layout.map_or(DEFAULT_PRECISION, |l| l.decimals().clamp(1, MAX_PRECISION)),
            ..GroMetadata::default()
        };
        Ok((builder.build(), metadata))
    }

    #[instrument(skip_all, name = "gro_write")]
    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if !(1..=MAX_PRECISION).contains(&metadata.precision) {
            return Err(GroError::InvalidPrecision(metadata.precision));
        }
        if metadata.index_overflow == IndexOverflow::Wrap && system.atom_count() > MAX_INDEX {
            warn!(
                "System has {} atoms; serials and residue numbers above {} will wrap.",
                system.atom_count(),
                MAX_INDEX
            );
        }

        let encoder = AtomLineEncoder::new(metadata.precision, system.has_velocities())
            .index_overflow(metadata.index_overflow);

        writeln!(writer, "{}", single_line_title(&metadata.title))?;
        writeln!(writer, "{:>5}", system.atom_count())?;

        let residue_indices = system.residue_indices();
        for (index, (atom_id, atom)) in system.atoms_iter().enumerate() {
            let (residue_index, residue) = residue_indices
                .get(atom.residue_id)
                .zip(system.residue(atom.residue_id))
                .ok_or_else(|| {
                    GroError::Inconsistency(format!("Atom {:?} has no parent residue", atom_id))
                })?;

            let record = AtomRecord {
                residue_number: (*residue_index + 1) as isize,
                residue_name: residue.name.clone(),
                atom_name: atom.name.clone(),
                serial: index + 1,
                position: atom.position,
                velocity: atom.velocity,
            };
            writeln!(writer, "{}", encoder.encode(&record)?)?;
        }

        match system.cell() {
            Some(cell) => writeln!(writer, "{}", encode_box_line(cell))?,
            None if !metadata.omit_box => {
                if let Some(cell) = enclosing_cell(system) {
                    debug!("No box defined; writing one that encloses all atoms.");
                    writeln!(writer, "{}", encode_box_line(&cell))?;
                }
            }
            None => debug!("No box defined; omitting box line."),
        }

        writer.flush()?;
        Ok(())
    }

    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        Self::write_to(system, &GroMetadata::default(), writer)
    }

    fn create_destination(path: &Path) -> Result<File, Self::Error> {
        let invalid = |reason| GroError::InvalidDestination {
            path: path.to_path_buf(),
            reason,
        };
        if path.is_dir() {
            return Err(invalid("path is a directory"));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(invalid("parent directory does not exist"));
            }
        }
        Ok(File::create(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::MolecularSystemBuilder;
    use crate::core::models::cell::UnitCell;
    use nalgebra::{Point3, Vector3};
    use std::io::Cursor;
    use tempfile::tempdir;

    const EXAMPLE: &str = "Test
    2
    1SOL     OW    1   1.000   2.000   3.000
    1SOL    HW1    2   1.100   2.000   3.000
   3.00000   3.00000   3.00000
";

    fn read_str(content: &str) -> Result<(MolecularSystem, GroMetadata), GroError> {
        GroFile::read_from(&mut Cursor::new(content.as_bytes()))
    }

    fn write_string(system: &MolecularSystem, metadata: &GroMetadata) -> String {
        let mut buffer = Vec::new();
        GroFile::write_to(system, metadata, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn positions(system: &MolecularSystem) -> Vec<Point3<f64>> {
        system.atoms_iter().map(|(_, a)| a.position).collect()
    }

    fn assert_point_close(actual: &Point3<f64>, expected: &Point3<f64>, tol: f64) {
        assert!(
            (actual - expected).norm() < tol,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn solvated_system() -> MolecularSystem {
        let mut builder = MolecularSystemBuilder::new();
        builder
            .add_atom(1, "ALA", "N", 1, Point3::new(-1.234, 5.678, 9.012), None)
            .add_atom(1, "ALA", "CA", 2, Point3::new(0.456, 6.789, 10.123), None)
            .add_atom(1, "ALA", "HB1", 3, Point3::new(123.4567, -45.6789, 0.0004), None)
            .add_atom(2, "SOL", "OW", 4, Point3::new(15.5, 16.25, 17.125), None)
            .add_atom(2, "SOL", "HW1", 5, Point3::new(16.0, 16.5, 17.0), None)
            .add_atom(3, "NA", "NA", 6, Point3::new(-20.0, -30.0, -40.0), None);
        builder.build()
    }

    #[test]
    fn reads_two_atom_example() {
        let (system, metadata) = read_str(EXAMPLE).unwrap();

        assert_eq!(metadata.title, "Test");
        assert_eq!(metadata.precision, 3);
        assert_eq!(system.atom_count(), 2);
        assert_eq!(system.residue_count(), 1);

        let atoms: Vec<_> = system.atoms_iter().map(|(_, a)| a).collect();
        assert_eq!(atoms[0].name, "OW");
        assert_eq!(atoms[1].name, "HW1");
        assert_eq!(atoms[1].serial, 2);
        assert_point_close(&atoms[0].position, &Point3::new(10.0, 20.0, 30.0), 1e-9);
        assert_point_close(&atoms[1].position, &Point3::new(11.0, 20.0, 30.0), 1e-9);
        assert!(atoms.iter().all(|a| a.velocity.is_none()));

        let (_, residue) = system.residues_iter().next().unwrap();
        assert_eq!(residue.number, 1);
        assert_eq!(residue.name, "SOL");

        let cell = system.cell().unwrap();
        assert!((cell.lengths - Vector3::new(30.0, 30.0, 30.0)).norm() < 1e-9);
        assert_eq!(cell.angles, Vector3::new(90.0, 90.0, 90.0));
    }

    #[test]
    fn writes_two_atom_example() {
        let (system, _) = read_str(EXAMPLE).unwrap();
        let output = write_string(&system, &GroMetadata::default());
        assert_eq!(
            output,
            "GROningen MAchine for Chemical Simulation
    2
    1SOL     OW    1   1.000   2.000   3.000
    1SOL    HW1    2   1.100   2.000   3.000
   3.00000   3.00000   3.00000
"
        );
    }

    #[test]
    fn round_trip_preserves_names_order_and_positions() {
        let system = solvated_system();
        let output = write_string(&system, &GroMetadata::default());
        let (reread, metadata) = read_str(&output).unwrap();

        assert_eq!(metadata.title, DEFAULT_TITLE);
        assert_eq!(reread.atom_count(), system.atom_count());
        assert_eq!(reread.residue_count(), 3);

        for ((_, before), (_, after)) in system.atoms_iter().zip(reread.atoms_iter()) {
            assert_eq!(before.name, after.name);
            assert_eq!(
                system.residue(before.residue_id).unwrap().name,
                reread.residue(after.residue_id).unwrap().name
            );
            // Three decimals in nanometers leave at most 0.005 Angstrom of rounding.
            assert_point_close(&after.position, &before.position, 0.005 + 1e-9);
        }
    }

    #[test]
    fn round_trip_at_precision_three_is_exact_for_representable_positions() {
        let mut builder = MolecularSystemBuilder::new();
        builder
            .add_atom(1, "SOL", "OW", 1, Point3::new(1.23, -4.56, 78.9), None)
            .add_atom(1, "SOL", "HW1", 2, Point3::new(0.01, 0.02, -0.03), None);
        let system = builder.build();
        let (reread, _) = read_str(&write_string(&system, &GroMetadata::default())).unwrap();

        for (before, after) in positions(&system).iter().zip(positions(&reread)) {
            assert_point_close(&after, before, 1e-3);
        }
    }

    #[test]
    fn round_trip_keeps_velocities() {
        let mut builder = MolecularSystemBuilder::new();
        builder
            .add_atom(1, "AR", "AR", 1, Point3::new(1.0, 2.0, 3.0), Some(Vector3::new(1.227, -0.58, 0.434)))
            .add_atom(2, "AR", "AR", 2, Point3::new(4.0, 5.0, 6.0), Some(Vector3::new(0.0, 2.5, -3.75)));
        let system = builder.build();
        let output = write_string(&system, &GroMetadata::default());
        let (reread, _) = read_str(&output).unwrap();

        assert!(reread.has_velocities());
        for ((_, before), (_, after)) in system.atoms_iter().zip(reread.atoms_iter()) {
            let (b, a) = (before.velocity.unwrap(), after.velocity.unwrap());
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn velocities_are_written_only_when_every_atom_has_one() {
        let mut builder = MolecularSystemBuilder::new();
        builder
            .add_atom(1, "AR", "AR", 1, Point3::origin(), Some(Vector3::new(1.0, 0.0, 0.0)))
            .add_atom(2, "AR", "AR", 2, Point3::origin(), None);
        let output = write_string(&builder.build(), &GroMetadata::default());
        let atom_line = output.lines().nth(2).unwrap();
        assert_eq!(atom_line.len(), 44);
    }

    #[test]
    fn precision_is_inferred_and_reused_when_writing() {
        let content = "High precision
    1
    1SOL     OW    1   0.12600   1.62400   1.67900
";
        let (system, metadata) = read_str(content).unwrap();
        assert_eq!(metadata.precision, 5);
        let output = write_string(&system, &GroMetadata { omit_box: true, ..metadata });
        assert_eq!(
            output,
            "High precision
    1
    1SOL     OW    1   0.12600   1.62400   1.67900
"
        );
    }

    #[test]
    fn residues_are_renumbered_sequentially_on_write() {
        let mut builder = MolecularSystemBuilder::new();
        builder
            .add_atom(7, "SOL", "OW", 101, Point3::origin(), None)
            .add_atom(7, "SOL", "HW1", 102, Point3::origin(), None)
            .add_atom(42, "NA", "NA", 300, Point3::origin(), None);
        let output = write_string(&builder.build(), &GroMetadata::default());
        let ids: Vec<_> = output
            .lines()
            .skip(2)
            .take(3)
            .map(|l| (l[0..5].trim().to_string(), l[15..20].trim().to_string()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("1".to_string(), "1".to_string()),
                ("1".to_string(), "2".to_string()),
                ("2".to_string(), "3".to_string())
            ]
        );
    }

    #[test]
    fn missing_box_line_yields_no_box() {
        let content = "T\n    1\n    1SOL     OW    1   1.000   2.000   3.000\n";
        let (system, _) = read_str(content).unwrap();
        assert_eq!(system.atom_count(), 1);
        assert!(system.cell().is_none());

        let (system, _) = read_str(&format!("{}   \n", content)).unwrap();
        assert!(system.cell().is_none());
    }

    #[test]
    fn box_line_with_unexpected_value_count_is_ignored() {
        let content = "T\n    1\n    1SOL     OW    1   1.000   2.000   3.000\n 1.0 2.0 3.0 4.0\n";
        let (system, _) = read_str(content).unwrap();
        assert!(system.cell().is_none());
    }

    #[test]
    fn triclinic_box_round_trips_through_file() {
        let content = "T
    1
    1SOL     OW    1   1.000   2.000   3.000
   4.00000   3.80000   3.50000   0.00000   0.00000   1.20000   0.00000  -0.80000   1.10000
";
        let (system, metadata) = read_str(content).unwrap();
        let first = *system.cell().unwrap();
        let (reread, _) = read_str(&write_string(&system, &metadata)).unwrap();
        let second = reread.cell().unwrap();
        for (a, b) in first.as_array().iter().zip(second.as_array()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn enclosing_box_is_written_when_none_is_defined() {
        let mut system = read_str(EXAMPLE).unwrap().0;
        system.set_cell(None);
        let output = write_string(&system, &GroMetadata::default());
        assert_eq!(output.lines().last().unwrap(), "   0.60000   0.50000   0.50000");
    }

    #[test]
    fn box_line_is_omitted_on_request() {
        let mut system = read_str(EXAMPLE).unwrap().0;
        system.set_cell(None);
        let metadata = GroMetadata {
            omit_box: true,
            ..GroMetadata::default()
        };
        let output = write_string(&system, &metadata);
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn omit_box_does_not_drop_a_defined_box() {
        let (system, _) = read_str(EXAMPLE).unwrap();
        let metadata = GroMetadata {
            omit_box: true,
            ..GroMetadata::default()
        };
        let output = write_string(&system, &metadata);
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn empty_system_writes_header_only() {
        let output = write_string(&MolecularSystem::new(), &GroMetadata::default());
        assert_eq!(output, format!("{}\n    0\n", DEFAULT_TITLE));
        let (system, _) = read_str(&output).unwrap();
        assert!(system.is_empty());
    }

    #[test]
    fn custom_title_is_written() {
        let metadata = GroMetadata {
            title: "Protein in water".into(),
            ..GroMetadata::default()
        };
        let output = write_string(&solvated_system(), &metadata);
        assert!(output.starts_with("Protein in water\n    6\n"));
    }

    #[test]
    fn line_breaks_in_title_do_not_corrupt_the_file() {
        let metadata = GroMetadata {
            title: "Protein\nin water\r\n".into(),
            ..GroMetadata::default()
        };
        let output = write_string(&solvated_system(), &metadata);
        assert!(output.starts_with("Protein in water  \n    6\n"));

        let (reread, reread_metadata) = read_str(&output).unwrap();
        assert_eq!(reread_metadata.title, "Protein in water  ");
        assert_eq!(reread.atom_count(), 6);
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let content = EXAMPLE.replace('\n', "\r\n");
        let (system, metadata) = read_str(&content).unwrap();
        assert_eq!(metadata.title, "Test");
        assert_eq!(system.atom_count(), 2);
        assert!(system.cell().is_some());
    }

    #[test]
    fn bad_atom_count_is_a_header_error() {
        let err = read_str("T\n  two\n").unwrap_err();
        assert!(matches!(err, GroError::MalformedHeader { line: 2, ref value } if value == "two"));
        assert!(matches!(read_str("").unwrap_err(), GroError::MalformedHeader { .. }));
    }

    #[test]
    fn bad_record_aborts_with_line_number() {
        let content = "T
    2
    1SOL     OW    1   1.000   2.000   3.000
    1SOL    HW1    2   1.100   x.000   3.000
";
        let err = read_str(content).unwrap_err();
        assert!(matches!(
            err,
            GroError::MalformedRecord { line: 4, kind: RecordErrorKind::InvalidFloat { .. } }
        ));
    }

    #[test]
    fn first_record_without_decimal_points_is_rejected() {
        let err = read_str("T\n1\n    1SOL     OW    1\n").unwrap_err();
        assert!(matches!(
            err,
            GroError::MalformedRecord { line: 3, kind: RecordErrorKind::MissingDecimalPoint }
        ));
    }

    #[test]
    fn short_file_is_truncated() {
        let content = "T\n    3\n    1SOL     OW    1   1.000   2.000   3.000\n";
        assert!(matches!(
            read_str(content).unwrap_err(),
            GroError::Truncated { expected: 3, found: 1 }
        ));
    }

    #[test]
    fn non_numeric_box_is_an_error() {
        let content = "T\n    1\n    1SOL     OW    1   1.000   2.000   3.000\n 3.0 abc 3.0\n";
        assert!(matches!(
            read_str(content).unwrap_err(),
            GroError::MalformedBox { line: 4, ref token } if token == "abc"
        ));
    }

    #[test]
    fn invalid_precision_is_rejected() {
        let metadata = GroMetadata {
            precision: 0,
            ..GroMetadata::default()
        };
        let err = GroFile::write_to(&solvated_system(), &metadata, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, GroError::InvalidPrecision(0)));
    }

    #[test]
    fn strict_index_policy_surfaces_overflow() {
        let mut builder = MolecularSystemBuilder::new();
        for i in 0..=MAX_INDEX {
            builder.add_atom(1, "AR", "AR", i + 1, Point3::origin(), None);
        }
        let system = builder.build();
        let metadata = GroMetadata {
            index_overflow: IndexOverflow::Error,
            ..GroMetadata::default()
        };
        let err = GroFile::write_to(&system, &metadata, &mut std::io::sink()).unwrap_err();
        assert!(matches!(err, GroError::FieldOverflow { value: 100_000, .. }));
    }

    #[test]
    fn path_round_trip_works() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf.gro");
        let mut system = solvated_system();
        system.set_cell(Some(UnitCell::orthorhombic(30.0, 40.0, 50.0)));

        GroFile::write_system_to_path(&system, &path).unwrap();
        assert!(GroFile::probe_path(&path));

        let (reread, metadata) = GroFile::read_from_path(&path).unwrap();
        assert_eq!(metadata.title, DEFAULT_TITLE);
        assert_eq!(reread.atom_count(), 6);
        let cell = reread.cell().unwrap();
        assert!((cell.lengths - Vector3::new(30.0, 40.0, 50.0)).norm() < 1e-5);
    }

    #[test]
    fn writing_to_a_directory_is_an_invalid_destination() {
        let dir = tempdir().unwrap();
        let err = GroFile::write_system_to_path(&solvated_system(), dir.path()).unwrap_err();
        assert!(matches!(err, GroError::InvalidDestination { .. }));
    }

    #[test]
    fn writing_into_missing_directory_is_an_invalid_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("conf.gro");
        let err =
            GroFile::write_to_path(&solvated_system(), &GroMetadata::default(), &path).unwrap_err();
        assert!(matches!(
            err,
            GroError::InvalidDestination { reason: "parent directory does not exist", .. }
        ));
    }

    #[test]
    fn reading_missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = GroFile::read_from_path(dir.path().join("missing.gro")).unwrap_err();
        assert!(matches!(err, GroError::Io(_)));
    }
}
