use crate::core::models::system::MolecularSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A coordinate file format that maps to and from a [`MolecularSystem`].
///
/// Implementors supply the stream-level `read_from`, `write_to` and `write_system_to`.
/// The path-level methods are provided: each opens a single file, wraps it in a
/// buffered reader or writer, and closes it when the call returns, whether it
/// succeeded or not.
pub trait MolecularFile {
    /// File-level settings that accompany a system, such as a title or precision.
    type Metadata;

    type Error: Error + From<io::Error>;

    /// Parses a whole system from `reader`.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed record or on an I/O error.
    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error>;

    /// Serializes `system` with the settings in `metadata`.
    ///
    /// # Errors
    ///
    /// Fails if the settings cannot be honored or if writing fails.
    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Serializes `system` with the format's default settings.
    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Creates the file a path-level write goes to.
    ///
    /// Override this to reject unsuitable destinations before anything is created.
    fn create_destination(path: &Path) -> Result<File, Self::Error> {
        Ok(File::create(path)?)
    }

    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let mut writer = BufWriter::new(Self::create_destination(path.as_ref())?);
        Self::write_to(system, metadata, &mut writer)
    }

    fn write_system_to_path<P: AsRef<Path>>(
        system: &MolecularSystem,
        path: P,
    ) -> Result<(), Self::Error> {
        let mut writer = BufWriter::new(Self::create_destination(path.as_ref())?);
        Self::write_system_to(system, &mut writer)
    }
}
