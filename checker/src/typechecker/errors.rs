/**
Type checking errors for tinyts

Every error displays as a fixed message; callers match on that text. The
fields carry extra detail for logging and programmatic inspection but never
change the message.
*/
use std::fmt;

pub type TypeResult<T> = Result<T, TypeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// An operand of `+` is not a number
    NumberExpected,

    /// The condition of an extended-dialect conditional is not a boolean
    BooleanExpected,

    /// The branches of a conditional have different types
    BranchMismatch,

    /// Reference to a name with no binding in scope
    UnknownVariable { name: String },

    /// The callee of an application is not a function
    FunctionExpected,

    /// Argument count differs from the callee's parameter count
    WrongArgumentCount { expected: usize, actual: usize },

    /// Argument at `position` (0-based) does not match its parameter type
    ArgumentMismatch { position: usize },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::NumberExpected => write!(f, "number expected"),
            TypeError::BooleanExpected => write!(f, "boolean expected"),
            TypeError::BranchMismatch => write!(f, "then and else have different types"),
            TypeError::UnknownVariable { name } => write!(f, "unknown variable: {}", name),
            TypeError::FunctionExpected => write!(f, "function type expected"),
            TypeError::WrongArgumentCount { .. } => write!(f, "wrong number of arguments"),
            TypeError::ArgumentMismatch { .. } => write!(f, "argument type mismatch"),
        }
    }
}

impl std::error::Error for TypeError {}
