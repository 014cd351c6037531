/**
Type checker for the arithmetic dialect

Syntax-directed, one rule per term, no context. The condition of a
conditional is checked for errors but its type is not constrained here; the
extended dialect is the one that requires a boolean.
*/
use crate::ast::arith::{Term, Type};
use crate::typechecker::errors::{TypeError, TypeResult};
use tracing::{debug, trace};

/// Type check an arithmetic term
pub fn typecheck(term: &Term) -> TypeResult<Type> {
    debug!(%term, "checking arithmetic term");
    let result = check(term);
    match &result {
        Ok(ty) => debug!(%ty, "arithmetic term is well typed"),
        Err(err) => debug!(%err, "arithmetic term is ill typed"),
    }
    result
}

fn check(term: &Term) -> TypeResult<Type> {
    trace!(%term, "check");
    match term {
        Term::True | Term::False => Ok(Type::Boolean),

        Term::Number(_) => Ok(Type::Number),

        Term::If { cond, thn, els } => {
            check(cond)?;
            let thn_ty = check(thn)?;
            let els_ty = check(els)?;
            if thn_ty != els_ty {
                return Err(TypeError::BranchMismatch);
            }
            Ok(thn_ty)
        }

        Term::Add { left, right } => {
            expect_number(check(left)?)?;
            expect_number(check(right)?)?;
            Ok(Type::Number)
        }
    }
}

fn expect_number(ty: Type) -> TypeResult<()> {
    match ty {
        Type::Number => Ok(()),
        Type::Boolean => Err(TypeError::NumberExpected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Term {
        Term::number(n)
    }

    #[test]
    fn test_literals() {
        assert_eq!(typecheck(&Term::True), Ok(Type::Boolean));
        assert_eq!(typecheck(&Term::False), Ok(Type::Boolean));
        assert_eq!(typecheck(&num(42.0)), Ok(Type::Number));
        assert_eq!(typecheck(&num(-0.5)), Ok(Type::Number));
    }

    #[test]
    fn test_addition() {
        assert_eq!(typecheck(&Term::add(num(1.0), num(2.0))), Ok(Type::Number));

        // 1 + (2 + 3)
        let nested = Term::add(num(1.0), Term::add(num(2.0), num(3.0)));
        assert_eq!(typecheck(&nested), Ok(Type::Number));
    }

    #[test]
    fn test_addition_requires_numbers() {
        let result = typecheck(&Term::add(num(1.0), Term::True));
        assert_eq!(result, Err(TypeError::NumberExpected));

        let result = typecheck(&Term::add(Term::False, num(1.0)));
        assert_eq!(result.unwrap_err().to_string(), "number expected");
    }

    #[test]
    fn test_conditional() {
        let numbers = Term::cond(Term::True, num(1.0), num(2.0));
        assert_eq!(typecheck(&numbers), Ok(Type::Number));

        let booleans = Term::cond(Term::False, Term::True, Term::False);
        assert_eq!(typecheck(&booleans), Ok(Type::Boolean));
    }

    #[test]
    fn test_condition_type_is_unconstrained() {
        // (1 ? true : false)
        let term = Term::cond(num(1.0), Term::True, Term::False);
        assert_eq!(typecheck(&term), Ok(Type::Boolean));
    }

    #[test]
    fn test_errors_inside_condition_propagate() {
        // ((1 + true) ? true : false)
        let term = Term::cond(Term::add(num(1.0), Term::True), Term::True, Term::False);
        assert_eq!(typecheck(&term), Err(TypeError::NumberExpected));
    }

    #[test]
    fn test_branch_mismatch() {
        let term = Term::cond(Term::True, num(1.0), Term::True);
        let err = typecheck(&term).unwrap_err();
        assert_eq!(err, TypeError::BranchMismatch);
        assert_eq!(err.to_string(), "then and else have different types");
    }

    #[test]
    fn test_first_violation_wins() {
        // The then-branch error is reached before the branch comparison
        let term = Term::cond(Term::True, Term::add(Term::True, num(1.0)), Term::False);
        assert_eq!(typecheck(&term), Err(TypeError::NumberExpected));
    }
}
