/**
Typing context for the extended dialect

A context is a chain of scopes. Extending a context creates a new scope that
borrows its parent and never writes to it, so bindings introduced for a
function body or the rest of a `const` are unreachable once that subterm has
been checked.
*/
use crate::ast::basic::{Param, Type};
use std::collections::HashMap;

/// Variable name -> type, layered over an optional parent scope
#[derive(Debug, Default)]
pub struct Context<'a> {
    bindings: HashMap<String, Type>,
    parent: Option<&'a Context<'a>>,
}

impl<'a> Context<'a> {
    /// Create an empty top-level context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a top-level context with the given bindings
    pub fn with_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (String, Type)>,
    {
        Context {
            bindings: bindings.into_iter().collect(),
            parent: None,
        }
    }

    /// New scope over `self`; later bindings of the same name win
    pub fn extend<I>(&self, bindings: I) -> Context<'_>
    where
        I: IntoIterator<Item = (String, Type)>,
    {
        Context {
            bindings: bindings.into_iter().collect(),
            parent: Some(self),
        }
    }

    /// New scope over `self` holding a function's parameters
    pub fn extend_params(&self, params: &[Param]) -> Context<'_> {
        self.extend(params.iter().map(|p| (p.name.clone(), p.ty.clone())))
    }

    /// New scope over `self` holding a single binding
    pub fn bind(&self, name: String, ty: Type) -> Context<'_> {
        self.extend(std::iter::once((name, ty)))
    }

    /// Look up a name, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(ty) = current.bindings.get(name) {
                return Some(ty);
            }
            scope = current.parent;
        }
        None
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of scopes in the chain, including this one
    pub fn depth(&self) -> usize {
        1 + self.parent.map_or(0, |parent| parent.depth())
    }
}
