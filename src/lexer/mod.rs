//! Lexical analysis.
//!
//! Converts source text into tokens for the parser. The parser only relies
//! on the `TokenSource` contract; `Lexer` is the regex-driven implementation
//! and `TokenStream` replays an already built token list.

pub mod lexer;
pub mod tokens;
