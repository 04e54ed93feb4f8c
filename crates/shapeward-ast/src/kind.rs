//! Element kinds and storage layouts
//!
//! [`Kind`] is the element storage kind a checked value reports; the
//! constraint language also accepts the class sentinels `int`, `float`
//! and `bool`, which resolve to [`Kind::DEFAULT_INT`],
//! [`Kind::DEFAULT_FLOAT`] and [`Kind::Bool`] respectively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element storage kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    F64,
    F32,
    I64,
    I32,
    I16,
    I8,
    U8,
    Bool,
}

impl Kind {
    /// What the `int` class sentinel resolves to
    pub const DEFAULT_INT: Kind = Kind::I64;

    /// What the `float` class sentinel resolves to
    pub const DEFAULT_FLOAT: Kind = Kind::F32;

    pub fn is_float(&self) -> bool {
        matches!(self, Kind::F64 | Kind::F32)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Kind::I64 | Kind::I32 | Kind::I16 | Kind::I8 | Kind::U8)
    }

    /// Canonical lowercase spelling, also the DSL keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::F64 => "f64",
            Kind::F32 => "f32",
            Kind::I64 => "i64",
            Kind::I32 => "i32",
            Kind::I16 => "i16",
            Kind::I8 => "i8",
            Kind::U8 => "u8",
            Kind::Bool => "bool",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Memory layout tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    Strided,
    Sparse,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Strided => "strided",
            Layout::Sparse => "sparse",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
