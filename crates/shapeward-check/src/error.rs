//! Declaration-time and call-check errors
//!
//! Declaration errors are fatal to the declaration and never swallowed; a
//! runtime shape mismatch is not an error at all (the matcher returns
//! `false`), so the only runtime type here is [`CallError`], produced by
//! the per-call orchestrator when it aggregates match results.

use thiserror::Error;

use shapeward_parse::parser::ParseError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Overwriting constraint field(s): {fields}")]
    FieldConflict { fields: String },
}

pub type DeclResult<T> = Result<T, DeclError>;

/// Aggregate violation for one checked call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("argument {index} does not satisfy {expected}: found shape ({found})")]
    ArgumentMismatch {
        index: usize,
        expected: String,
        found: String,
    },
}
