/// Parser for tinyts
///
/// Hand-written recursive descent parser for the TypeScript-like surface
/// syntax of both dialects.
mod lexer;
mod parse;

pub use lexer::{Lexer, Token, TokenKind};
pub use parse::{ParseError, Parser};
