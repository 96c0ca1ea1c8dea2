use crate::cli::ConvertArgs;
use crate::config::PartialConvertConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::Spinner;
use grocodec::core::io::gro::GroFile;
use grocodec::core::io::traits::MolecularFile;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialConvertConfig::from_file(path)?,
        None => PartialConvertConfig::default(),
    };

    let spinner = Spinner::new(format!("Reading {}...", args.input.display()));
    info!("Loading input structure from {:?}", &args.input);
    let (system, input_metadata) =
        GroFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    info!(
        "Read {} atoms in {} residues.",
        system.atom_count(),
        system.residue_count()
    );

    info!("Merging write settings from input, configuration file and CLI arguments...");
    let metadata = partial_config.merge_with_cli(&args, input_metadata)?;

    spinner.set_message(format!("Writing {}...", args.output.display()));
    info!("Writing structure to {:?}", &args.output);
    GroFile::write_to_path(&system, &metadata, &args.output)?;

    spinner.finish(format!(
        "✓ Wrote {} atoms to {}",
        system.atom_count(),
        args.output.display()
    ));
    Ok(())
}
