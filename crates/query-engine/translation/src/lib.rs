//! Compile the canonical filter model into either query dialect.

pub mod translation;
