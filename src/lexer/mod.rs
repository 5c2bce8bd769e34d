//! Lexical analysis module for the Amime language.
//!
//! This module is responsible for tokenizing Amime source code into a stream of tokens.
//! Whitespace, newlines and `//` comments are skipped; every token carries its byte
//! range together with a 1-based line and column.

mod lexer;
mod literal_parser;
mod token;

pub use lexer::{format_tokens, tokenize, Lexer, TokenWithPosition};
pub use token::Token;
