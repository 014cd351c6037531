/**
Extended dialect: variables, first-class functions, application and bindings

Types here are compared structurally. Two function types are the same type
when their parameter types and return types agree position by position;
parameter names are carried along for display only.
*/
use super::write_comma_separated;
use std::fmt;

/// A type in the extended dialect
#[derive(Debug, Clone)]
pub enum Type {
    Boolean,

    Number,

    /// Function type `(params) => ret`
    Function { params: Vec<Param>, ret: Box<Type> },
}

/// A named, typed function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Param {
            name: name.into(),
            ty,
        }
    }
}

impl Type {
    /// Build a function type
    pub fn function(params: Vec<Param>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    /// Structural type equality
    ///
    /// Parameter names are ignored; parameter types are compared in order and
    /// the return types must agree. Nested function types are compared
    /// recursively to any depth.
    pub fn structurally_eq(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Boolean, Type::Boolean) => true,
            (Type::Number, Type::Number) => true,
            (
                Type::Function {
                    params: params1,
                    ret: ret1,
                },
                Type::Function {
                    params: params2,
                    ret: ret2,
                },
            ) => {
                params1.len() == params2.len()
                    && params1
                        .iter()
                        .zip(params2)
                        .all(|(p1, p2)| p1.ty.structurally_eq(&p2.ty))
                    && ret1.structurally_eq(ret2)
            }
            _ => false,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Eq for Type {}

/// A term of the extended dialect
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    True,

    False,

    /// Numeric literal
    Number(f64),

    /// Conditional expression `cond ? thn : els`
    If {
        cond: Box<Term>,
        thn: Box<Term>,
        els: Box<Term>,
    },

    /// Addition `left + right`
    Add { left: Box<Term>, right: Box<Term> },

    /// Variable reference
    Variable(String),

    /// Function literal `(params) => body`
    Function { params: Vec<Param>, body: Box<Term> },

    /// Application `callee(args)`
    Call { callee: Box<Term>, args: Vec<Term> },

    /// Statements evaluated for effect, followed by the result term
    Seq { statements: Vec<Term>, rest: Box<Term> },

    /// `const name = init; rest`
    Const {
        name: String,
        init: Box<Term>,
        rest: Box<Term>,
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

    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn func(params: Vec<Param>, body: Term) -> Self {
        Term::Function {
            params,
            body: Box::new(body),
        }
    }

    pub fn call(callee: Term, args: Vec<Term>) -> Self {
        Term::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn seq(statements: Vec<Term>, rest: Term) -> Self {
        Term::Seq {
            statements,
            rest: Box::new(rest),
        }
    }

    pub fn constant(name: impl Into<String>, init: Term, rest: Term) -> Self {
        Term::Const {
            name: name.into(),
            init: Box::new(init),
            rest: Box::new(rest),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => write!(f, "boolean"),
            Type::Number => write!(f, "number"),
            Type::Function { params, ret } => {
                write!(f, "(")?;
                write_comma_separated(f, params)?;
                write!(f, ") => {}", ret)
            }
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
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
            Term::Variable(name) => write!(f, "{}", name),
            Term::Function { params, body } => {
                write!(f, "((")?;
                write_comma_separated(f, params)?;
                write!(f, ") => {})", body)
            }
            Term::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_comma_separated(f, args)?;
                write!(f, ")")
            }
            Term::Seq { statements, rest } => {
                for statement in statements {
                    write!(f, "{}; ", statement)?;
                }
                write!(f, "{}", rest)
            }
            Term::Const { name, init, rest } => {
                write!(f, "const {} = {}; {}", name, init, rest)
            }
        }
    }
}
