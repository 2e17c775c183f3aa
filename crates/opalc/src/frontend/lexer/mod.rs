//! Opal lexer module

mod token;
mod scanner;

pub use token::{Token, TokenKind};
pub use scanner::Lexer;
