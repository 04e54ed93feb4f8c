//! # Shapeward AST
//!
//! Data model for the shapeward constraint language.
//!
//! A shape constraint is an ordered sequence of dimension descriptors
//! ([`Dim`]), optionally combined with an element kind ([`Kind`]) and a
//! storage layout ([`Layout`]). The values being checked are anything that
//! implements [`TensorInfo`], the boundary trait for the host array
//! library.
//!
//! ## Example
//!
//! ```rust
//! use shapeward_ast::prelude::*;
//!
//! // The descriptor sequence for "..., a: 3, -1"
//! let dims = vec![
//!     Dim::group(),
//!     Dim::exact(3).with_name("a"),
//!     Dim::any(),
//! ];
//!
//! let rendered: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
//! assert_eq!(rendered.join(", "), "..., a: 3, -1");
//! ```

pub mod dim;
pub mod kind;
pub mod tensor;

/// Prelude - common imports
pub mod prelude {
    pub use crate::dim::{Dim, SizeSpec};
    pub use crate::kind::{Kind, Layout};
    pub use crate::tensor::{TensorInfo, TensorMeta};
}
