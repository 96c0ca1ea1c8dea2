use crate::cli::InfoArgs;
use crate::error::{CliError, Result as CliResult};
use grocodec::core::io::gro::{GroFile, GroMetadata};
use grocodec::core::io::traits::MolecularFile;
use grocodec::core::models::system::MolecularSystem;
use std::fmt::{self, Write};
use tracing::info;

/// Renders the human-readable summary printed by `gro info`.
fn summarize(system: &MolecularSystem, metadata: &GroMetadata) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Title:      {}", metadata.title)?;
    writeln!(out, "Atoms:      {}", system.atom_count())?;
    writeln!(out, "Residues:   {}", system.residue_count())?;
    writeln!(out, "Precision:  {} decimals", metadata.precision)?;
    writeln!(
        out,
        "Velocities: {}",
        if system.has_velocities() { "yes" } else { "no" }
    )?;
    match system.cell() {
        Some(cell) => writeln!(
            out,
            "Box:        a={:.4} b={:.4} c={:.4} A, alpha={:.2} beta={:.2} gamma={:.2} deg",
            cell.lengths.x, cell.lengths.y, cell.lengths.z,
            cell.angles.x, cell.angles.y, cell.angles.z
        )?,
        None => writeln!(out, "Box:        none")?,
    }
    Ok(out)
}

pub fn run(args: InfoArgs) -> CliResult<()> {
    info!("Loading structure from {:?}", &args.path);
    let (system, metadata) =
        GroFile::read_from_path(&args.path).map_err(|e| CliError::FileParsing {
            path: args.path.clone(),
            source: e.into(),
        })?;

    let summary = summarize(&system, &metadata).map_err(|e| CliError::Other(e.into()))?;
    print!("{}", summary);
    Ok(())
}
