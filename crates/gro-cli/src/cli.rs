use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "gro - Inspect, validate and rewrite GROMACS GRO coordinate files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether files look like GRO files without parsing them fully.
    Check(CheckArgs),
    /// Parse a GRO file and print a summary of its contents.
    Info(InfoArgs),
    /// Read a GRO file and write it back with new output settings.
    Convert(ConvertArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files to probe.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// The GRO file to summarize.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input GRO file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output GRO file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the number of decimals written for coordinates.
    #[arg(short, long, value_name = "INT")]
    pub precision: Option<usize>,

    /// Override the title line.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Do not write an enclosing box when the input has none.
    #[arg(long)]
    pub no_box: bool,

    /// Fail instead of wrapping residue numbers and serials above 99999.
    #[arg(long)]
    pub strict_indices: bool,
}
