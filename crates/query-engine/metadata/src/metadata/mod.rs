//! Metadata information regarding comparison operators, attribute types and the
//! canonical filter model.

pub mod attributes;
pub mod dialect;
pub mod filter;
pub mod operators;

// re-export without modules
pub use attributes::*;
pub use dialect::*;
pub use filter::*;
pub use operators::*;
