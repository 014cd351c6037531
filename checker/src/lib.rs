/// tinyts - a static type checker for a small TypeScript-like language
///
/// This crate implements:
/// - Terms and types for the arithmetic and extended dialects
/// - A lexer and recursive descent parser for the surface syntax
/// - One syntax-directed type checker per dialect
/// - A driver that parses and checks source text
pub mod ast;
pub mod driver;
pub mod parser;
pub mod typechecker;

pub use ast::{Param, Term, Type};
pub use driver::{CheckError, CheckedType, Dialect, check_source};
pub use typechecker::{Context, TypeError, TypeResult};
