use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use grocodec::core::io::gro::{GroMetadata, IndexOverflow, MAX_PRECISION};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialWriteConfig {
    precision: Option<usize>,
    omit_box: Option<bool>,
    title: Option<String>,
    index_overflow: Option<IndexOverflow>,
}

/// Output settings as read from a TOML file; every key is optional.
///
/// ```toml
/// [write]
/// precision = 3
/// omit-box = false
/// title = "Protein in water"
/// index-overflow = "wrap"
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialConvertConfig {
    write: Option<PartialWriteConfig>,
}

fn check_precision(precision: usize) -> bool {
    (1..=MAX_PRECISION).contains(&precision)
}

fn check_title(title: &str) -> bool {
    !title.contains(['\n', '\r'])
}

impl PartialConvertConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Layers file values and then command-line flags over `base`.
    ///
    /// `base` is normally the metadata of the file being converted, so its title and
    /// precision carry over unless overridden.
    pub fn merge_with_cli(self, args: &ConvertArgs, base: GroMetadata) -> Result<GroMetadata> {
        let write = self.write.unwrap_or_default();
        let mut metadata = base;

        if let Some(precision) = write.precision {
            if !check_precision(precision) {
                return Err(CliError::Config(format!(
                    "'write.precision' must be between 1 and {}, got {}",
                    MAX_PRECISION, precision
                )));
            }
            metadata.precision = precision;
        }
        if let Some(omit_box) = write.omit_box {
            metadata.omit_box = omit_box;
        }
        if let Some(title) = write.title {
            if !check_title(&title) {
                return Err(CliError::Config(
                    "'write.title' must be a single line".to_string(),
                ));
            }
            metadata.title = title;
        }
        if let Some(policy) = write.index_overflow {
            metadata.index_overflow = policy;
        }

        if let Some(precision) = args.precision {
            if !check_precision(precision) {
                return Err(CliError::Argument(format!(
                    "--precision must be between 1 and {}, got {}",
                    MAX_PRECISION, precision
                )));
            }
            metadata.precision = precision;
        }
        if let Some(title) = &args.title {
            if !check_title(title) {
                return Err(CliError::Argument(
                    "--title must be a single line".to_string(),
                ));
            }
            metadata.title = title.clone();
        }
        if args.no_box {
            metadata.omit_box = true;
        }
        if args.strict_indices {
            metadata.index_overflow = IndexOverflow::Error;
        }

        debug!("Final write settings: {:?}", metadata);
        Ok(metadata)
    }
}
