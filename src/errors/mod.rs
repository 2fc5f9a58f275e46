//! Diagnostics produced by the lexer and parser.
//!
//! Diagnostics are values, not control flow: the parser appends them to its
//! own list and keeps going.

pub mod errors;
