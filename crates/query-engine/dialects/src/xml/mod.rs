//! The XML `<filter>` dialect.

pub mod ast;
pub mod convert;
pub mod string;
