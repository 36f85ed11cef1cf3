//! Version 1 of the editor configuration file.

use std::io::ErrorKind;
use std::path::Path;

use query_engine_metadata::metadata::{Connective, Dialect};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const DEFAULT_RESOLVE_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_MIN_ATTRIBUTE_LENGTH: usize = 3;
pub const RESOLVE_DEBOUNCE_VARIABLE: &str = "FILTER_EDITOR_RESOLVE_DEBOUNCE_MS";
pub const MIN_ATTRIBUTE_LENGTH_VARIABLE: &str = "FILTER_EDITOR_MIN_ATTRIBUTE_LENGTH";

/// The configuration as written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: u32,
    /// Milliseconds an attribute field must stay unchanged before its type is resolved
    #[serde(default = "resolve_debounce_ms_default")]
    pub resolve_debounce_ms: u64,
    /// Attribute names shorter than this are never resolved
    #[serde(default = "min_attribute_length_default")]
    pub min_attribute_length: usize,
    /// The dialect new editors offer operators for
    #[serde(default)]
    pub default_dialect: Dialect,
    /// How newly added groups are joined to the previous one
    #[serde(default)]
    pub default_inter_group_connective: Connective,
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration::empty()
    }

    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            resolve_debounce_ms: DEFAULT_RESOLVE_DEBOUNCE_MS,
            min_attribute_length: DEFAULT_MIN_ATTRIBUTE_LENGTH,
            default_dialect: Dialect::default(),
            default_inter_group_connective: Connective::default(),
        }
    }
}

impl Default for ParsedConfiguration {
    fn default() -> Self {
        Self::empty()
    }
}

// for serde default //
fn resolve_debounce_ms_default() -> u64 {
    DEFAULT_RESOLVE_DEBOUNCE_MS
}
fn min_attribute_length_default() -> usize {
    DEFAULT_MIN_ATTRIBUTE_LENGTH
}

/// Parse the configuration format from a directory.
///
/// A directory without a configuration file yields the defaults.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents = match fs::read_to_string(&configuration_file).await {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!(
                path = %configuration_file.display(),
                "no configuration file, using defaults"
            );
            return Ok(ParsedConfiguration::empty());
        }
        Err(error) => return Err(error.into()),
    };

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            found: parsed_config.version,
            expected: CURRENT_VERSION,
        });
    }

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )
    .await?;

    Ok(())
}
