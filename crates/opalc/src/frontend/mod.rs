//! Opal front end: source text to syntax tree
//!
//! The semantic core only consumes [`ast::Module`]; this module exists so
//! that the core can be driven from source text.

pub mod lexer;
pub mod ast;
pub mod parser;

pub use lexer::Lexer;
pub use parser::Parser;
