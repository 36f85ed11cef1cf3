//! Translate a FilterGroupSequence to a REST `$filter` string or an XML `<filter>` fragment.

pub mod error;
pub mod query;
