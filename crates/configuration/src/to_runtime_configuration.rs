//! Convert a parsed configuration into the runtime configuration, applying
//! environment overrides.

use std::str::FromStr;
use std::time::Duration;

use crate::configuration::{Configuration, EditorSettings};
use crate::environment::{self, Environment, Variable};
use crate::error::MakeRuntimeConfigurationError;
use crate::version1::{
    ParsedConfiguration, MIN_ATTRIBUTE_LENGTH_VARIABLE, RESOLVE_DEBOUNCE_VARIABLE,
};

/// Produce the runtime configuration from a parsed one.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let resolve_debounce_ms = read_override(
        &environment,
        RESOLVE_DEBOUNCE_VARIABLE,
        parsed_config.resolve_debounce_ms,
    )?;
    let min_attribute_length = read_override(
        &environment,
        MIN_ATTRIBUTE_LENGTH_VARIABLE,
        parsed_config.min_attribute_length,
    )?;
    if min_attribute_length == 0 {
        return Err(MakeRuntimeConfigurationError::ZeroMinimumAttributeLength);
    }

    Ok(Configuration {
        editor: EditorSettings {
            resolve_debounce: Duration::from_millis(resolve_debounce_ms),
            min_attribute_length,
            dialect: parsed_config.default_dialect,
            default_inter_group_connective: parsed_config.default_inter_group_connective,
        },
    })
}

/// Read a variable that overrides a configured value. An unset variable keeps the value.
fn read_override<T>(
    environment: &impl Environment,
    name: &str,
    configured: T,
) -> Result<T, MakeRuntimeConfigurationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let variable = Variable::from(name);
    match environment.read(&variable) {
        Ok(value) => value.trim().parse::<T>().map_err(|error| {
            MakeRuntimeConfigurationError::InvalidEnvironmentValue {
                variable: variable.clone(),
                value: value.clone(),
                message: error.to_string(),
            }
        }),
        Err(environment::Error::VariableNotPresent(_)) => Ok(configured),
        Err(error) => Err(MakeRuntimeConfigurationError::Environment(error)),
    }
}
