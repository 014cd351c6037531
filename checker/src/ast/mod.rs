/**
Abstract Syntax Tree definitions for tinyts

Terms and types for the two dialects. The arithmetic dialect is a strict
subset of the extended one, so every arithmetic term embeds into an extended
term and an extended term that only uses arithmetic constructs converts back.
*/
pub mod arith;
pub mod basic;

pub use basic::{Param, Term, Type};

/// Write `items` separated by `", "`
pub(crate) fn write_comma_separated<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: &[T],
) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
