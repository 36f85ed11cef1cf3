//! Syntax trees for the two target query dialects and their conversion to text.

pub mod rest;
pub mod xml;
