/**
Parse-and-check driver

Connects the surface parser to the checker of the selected dialect.
*/
use crate::ast::{arith, basic};
use crate::parser::{ParseError, Parser};
use crate::typechecker::{self, TypeError};
use std::fmt;
use tracing::debug;

/// Which language the source is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Booleans, numbers, addition, conditionals
    Arith,

    /// Arithmetic plus variables, functions, calls, sequencing and `const`
    #[default]
    Basic,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Arith => write!(f, "arith"),
            Dialect::Basic => write!(f, "basic"),
        }
    }
}

/// The type of a successfully checked program
#[derive(Debug, Clone, PartialEq)]
pub enum CheckedType {
    Arith(arith::Type),
    Basic(basic::Type),
}

impl fmt::Display for CheckedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckedType::Arith(ty) => write!(f, "{}", ty),
            CheckedType::Basic(ty) => write!(f, "{}", ty),
        }
    }
}

/// Failure to parse or to type check a program
#[derive(Debug, Clone, PartialEq)]
pub enum CheckError {
    Parse(ParseError),
    Type(TypeError),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Parse(err) => write!(f, "{}", err),
            CheckError::Type(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Parse(err) => Some(err),
            CheckError::Type(err) => Some(err),
        }
    }
}

impl From<ParseError> for CheckError {
    fn from(err: ParseError) -> Self {
        CheckError::Parse(err)
    }
}

impl From<TypeError> for CheckError {
    fn from(err: TypeError) -> Self {
        CheckError::Type(err)
    }
}

/// Parse `source` in `dialect` and type check it
pub fn check_source(source: &str, dialect: Dialect) -> Result<CheckedType, CheckError> {
    debug!(%dialect, bytes = source.len(), "checking source");
    let mut parser = Parser::with_dialect(source, dialect);
    match dialect {
        Dialect::Arith => {
            let term = parser.parse_arith()?;
            Ok(CheckedType::Arith(typechecker::arith::typecheck(&term)?))
        }
        Dialect::Basic => {
            let term = parser.parse()?;
            Ok(CheckedType::Basic(typechecker::basic::typecheck_closed(
                &term,
            )?))
        }
    }
}
