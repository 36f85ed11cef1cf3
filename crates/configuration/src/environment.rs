//! Access to environment variables, abstracted so tests can supply their own.

use std::collections::HashMap;

/// The name of an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(pub String);

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Variable(value.to_string())
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Variable(value)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Variable(name) = self;
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("the environment variable {0} is not set")]
    VariableNotPresent(Variable),
    #[error("the environment variable {0} does not contain valid unicode")]
    NonUnicodeValue(Variable),
}

/// A source of environment variables.
pub trait Environment {
    fn read(&self, variable: &Variable) -> Result<String, Error>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        std::env::var(&variable.0).map_err(|error| match error {
            std::env::VarError::NotPresent => Error::VariableNotPresent(variable.clone()),
            std::env::VarError::NotUnicode(_) => Error::NonUnicodeValue(variable.clone()),
        })
    }
}

/// A fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment(HashMap<Variable, String>);

impl<const N: usize> From<[(Variable, String); N]> for FixedEnvironment {
    fn from(value: [(Variable, String); N]) -> Self {
        FixedEnvironment(HashMap::from(value))
    }
}

impl Environment for FixedEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        self.0.read(variable)
    }
}

impl Environment for HashMap<Variable, String> {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        self.get(variable)
            .cloned()
            .ok_or_else(|| Error::VariableNotPresent(variable.clone()))
    }
}

/// An empty environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        Err(Error::VariableNotPresent(variable.clone()))
    }
}
