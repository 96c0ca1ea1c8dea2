use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use grocodec::core::io::gro::GroFile;
use std::path::Path;
use tracing::info;

fn report_line(path: &Path, is_gro: bool) -> String {
    format!(
        "{}: {}",
        path.display(),
        if is_gro { "gro" } else { "not gro" }
    )
}

pub fn run(args: CheckArgs) -> Result<()> {
    let total = args.paths.len();
    let mut rejected = 0;

    for path in &args.paths {
        let is_gro = GroFile::probe_path(path);
        info!("Probed {:?}: {}", path, is_gro);
        if !is_gro {
            rejected += 1;
        }
        println!("{}", report_line(path, is_gro));
    }

    if rejected > 0 {
        return Err(CliError::NotGro {
            count: rejected,
            total,
        });
    }
    Ok(())
}
