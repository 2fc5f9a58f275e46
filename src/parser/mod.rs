//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! Statements are dispatched through a lookup table keyed on the current
//! token kind. Expressions use a Pratt parser: NUD (null denotation) handlers
//! for tokens that start an expression and LED (left denotation) handlers
//! plus binding powers for infix operators.
//!
//! Errors never stop the parse. They are collected on the `Parser` and the
//! offending statement is skipped.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
