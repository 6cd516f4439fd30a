//! Response parser for the scope-of-work pipeline
//!
//! The single chokepoint converting untrusted, semi-structured model output
//! into the closed set of typed draft sections. No other component ever sees
//! untyped data.
//!
//! Structural validity and semantic completeness are deliberately separated:
//! a schema-valid document with zero RIBA stages parses successfully and is
//! flagged downstream by validation; only payloads that cannot be located or
//! do not satisfy the schema produce a [`ParseError`].

pub mod coerce;
pub mod error;
pub mod extract;
mod parser;
pub mod schema;

pub use error::ParseError;
pub use parser::parse;
