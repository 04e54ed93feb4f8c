//! Programmatic constraint tokens
//!
//! [`SpecItem`] is one element of a subscript-style constraint expression,
//! before validation. `From` conversions cover the common shorthands: a
//! bare integer is a size (`-1` meaning any), a bare string is a named
//! unconstrained axis, a [`Kind`] or [`Layout`] is the corresponding
//! non-shape constraint.

use shapeward_ast::kind::{Kind, Layout};

/// One raw element of a constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecItem {
    /// Bare size: `n >= 0` exact, `-1` any
    Size(i64),
    /// Named axis of any size
    Name(String),
    /// Name bound to a size (`-1` for any)
    NamedSize(String, i64),
    /// Unnamed variable-length group of leading axes
    Ellipsis,
    /// Named variable-length group, cross-checked between arguments
    NamedEllipsis(String),
    /// Element-kind constraint
    Kind(Kind),
    /// Storage-layout constraint
    Layout(Layout),
}

/// Name bound to a size: `dim("a", 3)` reads as `a: 3`
pub fn dim(name: impl Into<String>, size: i64) -> SpecItem {
    SpecItem::NamedSize(name.into(), size)
}

/// Unnamed group marker, `...`
pub fn ellipsis() -> SpecItem {
    SpecItem::Ellipsis
}

/// Named group marker, `name: ...`
pub fn named_ellipsis(name: impl Into<String>) -> SpecItem {
    SpecItem::NamedEllipsis(name.into())
}

impl From<i64> for SpecItem {
    fn from(size: i64) -> Self {
        SpecItem::Size(size)
    }
}

impl From<i32> for SpecItem {
    fn from(size: i32) -> Self {
        SpecItem::Size(size as i64)
    }
}

impl From<&str> for SpecItem {
    fn from(name: &str) -> Self {
        SpecItem::Name(name.to_owned())
    }
}

impl From<String> for SpecItem {
    fn from(name: String) -> Self {
        SpecItem::Name(name)
    }
}

impl From<Kind> for SpecItem {
    fn from(kind: Kind) -> Self {
        SpecItem::Kind(kind)
    }
}

impl From<Layout> for SpecItem {
    fn from(layout: Layout) -> Self {
        SpecItem::Layout(layout)
    }
}
