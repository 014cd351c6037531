/**
Type checker for the extended dialect

Terms are checked under a typing context. Function literals and `const`
bindings check their bodies under a fresh scope layered over the current
context; the current context itself is never modified, so a binding is only
visible inside the subterm that introduced it.
*/
use crate::ast::basic::{Term, Type};
use crate::typechecker::context::Context;
use crate::typechecker::errors::{TypeError, TypeResult};
use tracing::{debug, trace};

/// Type check a closed term (empty context)
pub fn typecheck_closed(term: &Term) -> TypeResult<Type> {
    debug!(%term, "checking term");
    let result = typecheck(term, &Context::new());
    match &result {
        Ok(ty) => debug!(%ty, "term is well typed"),
        Err(err) => debug!(%err, "term is ill typed"),
    }
    result
}

/// Type check a term under `context`
pub fn typecheck(term: &Term, context: &Context<'_>) -> TypeResult<Type> {
    trace!(%term, depth = context.depth(), "check");
    match term {
        Term::True | Term::False => Ok(Type::Boolean),

        Term::Number(_) => Ok(Type::Number),

        Term::If { cond, thn, els } => {
            if typecheck(cond, context)? != Type::Boolean {
                return Err(TypeError::BooleanExpected);
            }
            let thn_ty = typecheck(thn, context)?;
            let els_ty = typecheck(els, context)?;
            if !type_eq(&thn_ty, &els_ty) {
                return Err(TypeError::BranchMismatch);
            }
            Ok(thn_ty)
        }

        Term::Add { left, right } => {
            if typecheck(left, context)? != Type::Number {
                return Err(TypeError::NumberExpected);
            }
            if typecheck(right, context)? != Type::Number {
                return Err(TypeError::NumberExpected);
            }
            Ok(Type::Number)
        }

        Term::Variable(name) => context
            .lookup(name)
            .cloned()
            .ok_or_else(|| TypeError::UnknownVariable { name: name.clone() }),

        Term::Function { params, body } => {
            let scope = context.extend_params(params);
            trace!(params = params.len(), "entering function body");
            let ret = typecheck(body, &scope)?;
            Ok(Type::function(params.clone(), ret))
        }

        Term::Call { callee, args } => {
            let Type::Function { params, ret } = typecheck(callee, context)? else {
                return Err(TypeError::FunctionExpected);
            };
            if params.len() != args.len() {
                return Err(TypeError::WrongArgumentCount {
                    expected: params.len(),
                    actual: args.len(),
                });
            }
            for (position, (arg, param)) in args.iter().zip(&params).enumerate() {
                let arg_ty = typecheck(arg, context)?;
                if !type_eq(&arg_ty, &param.ty) {
                    return Err(TypeError::ArgumentMismatch { position });
                }
            }
            Ok(*ret)
        }

        Term::Seq { statements, rest } => {
            for statement in statements {
                typecheck(statement, context)?;
            }
            typecheck(rest, context)
        }

        Term::Const { name, init, rest } => {
            let init_ty = typecheck(init, context)?;
            trace!(%name, ty = %init_ty, "binding const");
            let scope = context.bind(name.clone(), init_ty);
            typecheck(rest, &scope)
        }
    }
}

/// Structural type equality; parameter names do not take part
pub fn type_eq(ty1: &Type, ty2: &Type) -> bool {
    ty1.structurally_eq(ty2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::basic::Param;

    fn num(n: f64) -> Term {
        Term::number(n)
    }

    fn identity_on_number() -> Term {
        // (x: number) => x
        Term::func(vec![Param::new("x", Type::Number)], Term::var("x"))
    }

    #[test]
    fn test_literals_and_addition() {
        assert_eq!(typecheck_closed(&Term::True), Ok(Type::Boolean));
        assert_eq!(typecheck_closed(&num(7.0)), Ok(Type::Number));
        assert_eq!(
            typecheck_closed(&Term::add(num(1.0), Term::add(num(2.0), num(3.0)))),
            Ok(Type::Number)
        );
        assert_eq!(
            typecheck_closed(&Term::add(num(1.0), Term::True)),
            Err(TypeError::NumberExpected)
        );
    }

    #[test]
    fn test_condition_must_be_boolean() {
        let term = Term::cond(num(1.0), Term::True, Term::False);
        let err = typecheck_closed(&term).unwrap_err();
        assert_eq!(err.to_string(), "boolean expected");
    }

    #[test]
    fn test_branches_compared_structurally() {
        // true ? ((x: number) => x) : ((y: number) => 1)
        let term = Term::cond(
            Term::True,
            identity_on_number(),
            Term::func(vec![Param::new("y", Type::Number)], num(1.0)),
        );
        let ty = typecheck_closed(&term).unwrap();
        assert_eq!(
            ty,
            Type::function(vec![Param::new("x", Type::Number)], Type::Number)
        );

        let term = Term::cond(Term::True, num(1.0), Term::True);
        assert_eq!(typecheck_closed(&term), Err(TypeError::BranchMismatch));
    }

    #[test]
    fn test_function_literal_type() {
        // (x: boolean) => 42
        let term = Term::func(vec![Param::new("x", Type::Boolean)], num(42.0));
        let ty = typecheck_closed(&term).unwrap();
        match &ty {
            Type::Function { params, ret } => {
                assert_eq!(params.len(), 1);
                assert_eq!(params[0].name, "x");
                assert_eq!(params[0].ty, Type::Boolean);
                assert_eq!(**ret, Type::Number);
            }
            other => panic!("Expected function type, got {}", other),
        }
        assert_eq!(ty.to_string(), "(x: boolean) => number");
    }

    #[test]
    fn test_call() {
        let call = Term::call(identity_on_number(), vec![num(42.0)]);
        assert_eq!(typecheck_closed(&call), Ok(Type::Number));

        let call = Term::call(identity_on_number(), vec![Term::True]);
        assert_eq!(
            typecheck_closed(&call),
            Err(TypeError::ArgumentMismatch { position: 0 })
        );
    }

    #[test]
    fn test_arity_checked_before_argument_types() {
        // Zero arguments
        let call = Term::call(identity_on_number(), vec![]);
        assert_eq!(
            typecheck_closed(&call),
            Err(TypeError::WrongArgumentCount {
                expected: 1,
                actual: 0
            })
        );

        // Two arguments, both ill typed; the count is still reported first
        let call = Term::call(
            identity_on_number(),
            vec![Term::add(Term::True, num(1.0)), Term::var("nope")],
        );
        assert_eq!(
            typecheck_closed(&call).unwrap_err().to_string(),
            "wrong number of arguments"
        );
    }

    #[test]
    fn test_first_mismatching_argument_reported() {
        // ((a: number, b: boolean, c: number) => a)(1, 2, true)
        let func = Term::func(
            vec![
                Param::new("a", Type::Number),
                Param::new("b", Type::Boolean),
                Param::new("c", Type::Number),
            ],
            Term::var("a"),
        );
        let call = Term::call(func, vec![num(1.0), num(2.0), Term::True]);
        assert_eq!(
            typecheck_closed(&call),
            Err(TypeError::ArgumentMismatch { position: 1 })
        );
    }

    #[test]
    fn test_callee_must_be_function() {
        let call = Term::call(num(1.0), vec![]);
        assert_eq!(typecheck_closed(&call), Err(TypeError::FunctionExpected));
    }

    #[test]
    fn test_higher_order_argument() {
        // ((f: (x: number) => number) => f(1))((y: number) => y)
        let apply = Term::func(
            vec![Param::new(
                "f",
                Type::function(vec![Param::new("x", Type::Number)], Type::Number),
            )],
            Term::call(Term::var("f"), vec![num(1.0)]),
        );
        let identity = Term::func(vec![Param::new("y", Type::Number)], Term::var("y"));
        let call = Term::call(apply, vec![identity]);
        assert_eq!(typecheck_closed(&call), Ok(Type::Number));
    }

    #[test]
    fn test_unknown_variable() {
        let err = typecheck_closed(&Term::var("y")).unwrap_err();
        assert_eq!(
            err,
            TypeError::UnknownVariable {
                name: "y".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown variable: y");

        // (x: number) => y
        let term = Term::func(vec![Param::new("x", Type::Number)], Term::var("y"));
        assert_eq!(typecheck_closed(&term).unwrap_err().to_string(), "unknown variable: y");
    }

    #[test]
    fn test_params_do_not_leak_into_outer_context() {
        let outer = Context::new();
        let func = Term::func(vec![Param::new("x", Type::Number)], Term::var("x"));
        assert!(typecheck(&func, &outer).is_ok());

        let err = typecheck(&Term::var("x"), &outer).unwrap_err();
        assert_eq!(err.to_string(), "unknown variable: x");
    }

    #[test]
    fn test_params_do_not_leak_into_sibling_argument() {
        // ((x: number) => 1)(x)
        let call = Term::call(
            Term::func(vec![Param::new("x", Type::Number)], num(1.0)),
            vec![Term::var("x")],
        );
        assert_eq!(
            typecheck_closed(&call).unwrap_err().to_string(),
            "unknown variable: x"
        );
    }

    #[test]
    fn test_params_shadow_outer_bindings() {
        let outer = Context::with_bindings([("x".to_string(), Type::Boolean)]);
        let func = Term::func(vec![Param::new("x", Type::Number)], Term::var("x"));
        let ty = typecheck(&func, &outer).unwrap();
        assert_eq!(
            ty,
            Type::function(vec![Param::new("x", Type::Number)], Type::Number)
        );
        assert_eq!(typecheck(&Term::var("x"), &outer), Ok(Type::Boolean));
    }

    #[test]
    fn test_const_binding() {
        // const x = 1; x + 1
        let term = Term::constant("x", num(1.0), Term::add(Term::var("x"), num(1.0)));
        assert_eq!(typecheck_closed(&term), Ok(Type::Number));

        // const f = (x: number) => x; f(true)
        let term = Term::constant(
            "f",
            identity_on_number(),
            Term::call(Term::var("f"), vec![Term::True]),
        );
        assert_eq!(
            typecheck_closed(&term),
            Err(TypeError::ArgumentMismatch { position: 0 })
        );
    }

    #[test]
    fn test_const_is_scoped_to_rest() {
        // (const x = true; x) ? x : x, where only the condition binds x
        let term = Term::cond(
            Term::constant("x", Term::True, Term::var("x")),
            Term::var("x"),
            Term::var("x"),
        );
        assert_eq!(
            typecheck_closed(&term),
            Err(TypeError::UnknownVariable {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn test_const_init_cannot_see_its_own_name() {
        let term = Term::constant("x", Term::var("x"), num(1.0));
        assert_eq!(typecheck_closed(&term).unwrap_err().to_string(), "unknown variable: x");
    }

    #[test]
    fn test_seq() {
        // true; 1 + 1; false
        let term = Term::seq(vec![Term::True, Term::add(num(1.0), num(1.0))], Term::False);
        assert_eq!(typecheck_closed(&term), Ok(Type::Boolean));

        // Errors in discarded statements still propagate
        let term = Term::seq(vec![Term::add(Term::True, num(1.0))], Term::False);
        assert_eq!(typecheck_closed(&term), Err(TypeError::NumberExpected));
    }

    #[test]
    fn test_type_eq_is_symmetric_for_functions() {
        let f = Type::function(vec![Param::new("a", Type::Number)], Type::Boolean);
        let g = Type::function(vec![Param::new("b", Type::Number)], Type::Boolean);
        assert!(type_eq(&f, &g));
        assert!(type_eq(&g, &f));
        assert!(!type_eq(&f, &Type::Boolean));
        assert!(!type_eq(&Type::Boolean, &f));
    }
}
