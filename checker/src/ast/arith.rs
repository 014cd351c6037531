/**
Arithmetic dialect: booleans, numbers, addition and conditionals
*/
use super::basic;
use std::fmt;

/// A type in the arithmetic dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Boolean,
    Number,
}

/// A term of the arithmetic dialect
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    True,
    False,
    Number(f64),
    If {
        cond: Box<Term>,
        thn: Box<Term>,
        els: Box<Term>,
    },
    Add {
        left: Box<Term>,
        right: Box<Term>,
    },
}

impl Term {
    pub fn number(n: f64) -> Self {
        Term::Number(n)
    }

    pub fn cond(cond: Term, thn: Term, els: Term) -> Self {
        Term::If {
            cond: Box::new(cond),
            thn: Box::new(thn),
            els: Box::new(els),
        }
    }

    pub fn add(left: Term, right: Term) -> Self {
        Term::Add {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// An extended-dialect construct with no arithmetic counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedTerm {
    pub construct: &'static str,
}

impl fmt::Display for UnsupportedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not part of the arithmetic dialect",
            self.construct
        )
    }
}

impl std::error::Error for UnsupportedTerm {}

impl TryFrom<basic::Term> for Term {
    type Error = UnsupportedTerm;

    fn try_from(term: basic::Term) -> Result<Self, Self::Error> {
        match term {
            basic::Term::True => Ok(Term::True),
            basic::Term::False => Ok(Term::False),
            basic::Term::Number(n) => Ok(Term::Number(n)),
            basic::Term::If { cond, thn, els } => Ok(Term::cond(
                Term::try_from(*cond)?,
                Term::try_from(*thn)?,
                Term::try_from(*els)?,
            )),
            basic::Term::Add { left, right } => Ok(Term::add(
                Term::try_from(*left)?,
                Term::try_from(*right)?,
            )),
            basic::Term::Variable(_) => Err(UnsupportedTerm {
                construct: "variable",
            }),
            basic::Term::Function { .. } => Err(UnsupportedTerm {
                construct: "function",
            }),
            basic::Term::Call { .. } => Err(UnsupportedTerm {
                construct: "function call",
            }),
            basic::Term::Seq { .. } => Err(UnsupportedTerm {
                construct: "statement sequence",
            }),
            basic::Term::Const { .. } => Err(UnsupportedTerm {
                construct: "const binding",
            }),
        }
    }
}

impl From<Term> for basic::Term {
    fn from(term: Term) -> Self {
        match term {
            Term::True => basic::Term::True,
            Term::False => basic::Term::False,
            Term::Number(n) => basic::Term::Number(n),
            Term::If { cond, thn, els } => {
                basic::Term::cond((*cond).into(), (*thn).into(), (*els).into())
            }
            Term::Add { left, right } => basic::Term::add((*left).into(), (*right).into()),
        }
    }
}

impl From<Type> for basic::Type {
    fn from(ty: Type) -> Self {
        match ty {
            Type::Boolean => basic::Type::Boolean,
            Type::Number => basic::Type::Number,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => write!(f, "boolean"),
            Type::Number => write!(f, "number"),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::True => write!(f, "true"),
            Term::False => write!(f, "false"),
            Term::Number(n) => write!(f, "{}", n),
            Term::If { cond, thn, els } => write!(f, "({} ? {} : {})", cond, thn, els),
            Term::Add { left, right } => write!(f, "({} + {})", left, right),
        }
    }
}
