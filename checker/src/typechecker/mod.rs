pub mod arith;
pub mod basic;
/**
Type checkers for tinyts

Two independent checkers, one per dialect:
- `arith`: booleans, numbers, addition, conditionals; no context
- `basic`: adds variables, functions, application, sequencing and `const`
  under a layered typing context with structural type equality
*/
pub mod context;
pub mod errors;

pub use context::Context;
pub use errors::{TypeError, TypeResult};
