//! Compile a FilterGroupSequence into dialect output.
//!
//! Compilation is a pure function of its input: the same sequence always renders to
//! byte-identical output.

pub mod filtering;
pub mod rest;
pub mod values;
pub mod xml;

use query_engine_dialects::rest::convert::expression_to_filter;
use query_engine_dialects::xml::ast::XmlFragment;
use query_engine_metadata::metadata::{Dialect, FilterGroupSequence};

use crate::translation::error::Error;

/// The output of compiling a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledFilter {
    /// A `$filter` expression; empty when there is nothing to filter on.
    Rest(String),
    Xml(XmlFragment),
}

impl CompiledFilter {
    pub fn dialect(&self) -> Dialect {
        match self {
            CompiledFilter::Rest(_) => Dialect::Rest,
            CompiledFilter::Xml(_) => Dialect::Xml,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CompiledFilter::Rest(filter) => filter.is_empty(),
            CompiledFilter::Xml(fragment) => fragment.filter.is_none(),
        }
    }
}

impl std::fmt::Display for CompiledFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CompiledFilter::Rest(filter) => f.write_str(filter),
            CompiledFilter::Xml(fragment) => write!(f, "{fragment}"),
        }
    }
}

/// Compile a sequence of filter groups into the given dialect.
pub fn compile(sequence: &FilterGroupSequence, dialect: Dialect) -> Result<CompiledFilter, Error> {
    let compiled = match dialect {
        Dialect::Rest => CompiledFilter::Rest(
            rest::translate_sequence(sequence)?
                .map(|expression| expression_to_filter(&expression).text)
                .unwrap_or_default(),
        ),
        Dialect::Xml => CompiledFilter::Xml(XmlFragment {
            filter: xml::translate_sequence(sequence)?,
        }),
    };

    tracing::debug!(%dialect, compiled = %compiled, "compiled filter");
    Ok(compiled)
}
