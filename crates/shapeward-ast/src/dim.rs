//! Dimension descriptors
//!
//! A [`Dim`] constrains a single axis (or, for groups, a run of leading
//! axes): an optional symbolic name plus a [`SizeSpec`]. Named descriptors
//! let the same logical dimension be cross-checked between the arguments
//! of one call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size constraint for one descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeSpec {
    /// Axis must have exactly this size
    Exact(u64),
    /// Axis may have any size
    Any,
    /// Zero or more axes collapse here; only valid in leading position
    Group,
}

/// One axis constraint: optional name, and exact/any/group size
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dim {
    pub name: Option<Box<str>>,
    pub size: SizeSpec,
}

impl Dim {
    /// Unnamed axis of exactly `n` elements
    pub fn exact(n: u64) -> Self {
        Dim { name: None, size: SizeSpec::Exact(n) }
    }

    /// Unnamed axis of any size
    pub fn any() -> Self {
        Dim { name: None, size: SizeSpec::Any }
    }

    /// Unnamed variable-length group of leading axes
    pub fn group() -> Self {
        Dim { name: None, size: SizeSpec::Group }
    }

    /// Attach a symbolic name
    pub fn with_name(mut self, name: impl Into<Box<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.size, SizeSpec::Group)
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.size) {
            (None, SizeSpec::Exact(n)) => write!(f, "{}", n),
            (None, SizeSpec::Any) => write!(f, "-1"),
            (None, SizeSpec::Group) => write!(f, "..."),
            (Some(name), SizeSpec::Exact(n)) => write!(f, "{}: {}", name, n),
            (Some(name), SizeSpec::Any) => write!(f, "{}", name),
            (Some(name), SizeSpec::Group) => write!(f, "{}: ...", name),
        }
    }
}
