//! Operator catalogue, attribute type information and the canonical filter model
//! shared by the editor and the query compiler.

pub mod metadata;
