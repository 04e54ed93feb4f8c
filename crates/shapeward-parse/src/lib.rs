//! # Shapeward Parse
//!
//! Turns a raw constraint expression into a [`PartialSpec`]: an ordered
//! dimension-descriptor sequence, or an element-kind or storage-layout
//! constraint.
//!
//! Two input surfaces share one grammar:
//!
//! - programmatic [`SpecItem`] sequences, with `From` conversions so plain
//!   integers and strings read like the constraint they denote;
//! - a textual DSL (`"batch: ..., a: 3, -1"`), lexed with logos.
//!
//! ## Example
//!
//! ```rust
//! use shapeward_parse::prelude::*;
//!
//! let from_items = parse_items(&[ellipsis(), dim("a", 3), (-1).into()]).unwrap();
//! let from_text = parse_dsl("..., a: 3, -1").unwrap();
//! assert_eq!(from_items, from_text);
//! ```

pub mod item;
pub mod lexer;
pub mod parser;

pub use item::{dim, ellipsis, named_ellipsis, SpecItem};
pub use parser::{parse_dsl, parse_items, ParseError, ParseResult, PartialSpec};

/// Prelude - common imports
pub mod prelude {
    pub use crate::item::{dim, ellipsis, named_ellipsis, SpecItem};
    pub use crate::parser::{parse_dsl, parse_items, ParseError, ParseResult, PartialSpec};
}
