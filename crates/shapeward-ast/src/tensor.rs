//! Boundary with the host array library
//!
//! The matcher never touches array storage; it only needs the structural
//! facts listed in [`TensorInfo`]. Any array type can participate by
//! implementing this trait. [`TensorMeta`] is the canned implementation
//! used throughout the test-suite.

use serde::{Deserialize, Serialize};

use crate::kind::{Kind, Layout};

/// Structural introspection required of a checked value
pub trait TensorInfo {
    /// Number of axes
    fn rank(&self) -> usize;

    /// Concrete size of one axis
    fn size(&self, axis: usize) -> u64;

    /// Symbolic axis name, if the array format supports named axes
    fn axis_name(&self, _axis: usize) -> Option<&str> {
        None
    }

    /// Element storage kind
    fn kind(&self) -> Kind;

    /// Memory layout tag
    fn layout(&self) -> Layout {
        Layout::Strided
    }

    /// Full shape as a vector, rightmost axis last
    fn shape(&self) -> Vec<u64> {
        (0..self.rank()).map(|axis| self.size(axis)).collect()
    }
}

/// Canned tensor metadata
///
/// Carries exactly the facts [`TensorInfo`] exposes, nothing else. Defaults
/// to unnamed axes, `f32` elements and strided layout, the common case for
/// freshly allocated tensors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorMeta {
    shape: Vec<u64>,
    names: Vec<Option<Box<str>>>,
    kind: Kind,
    layout: Layout,
}

impl TensorMeta {
    pub fn new(shape: impl IntoIterator<Item = u64>) -> Self {
        let shape: Vec<u64> = shape.into_iter().collect();
        let names = vec![None; shape.len()];
        TensorMeta {
            shape,
            names,
            kind: Kind::DEFAULT_FLOAT,
            layout: Layout::Strided,
        }
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Name every axis, left to right; must cover the full rank
    pub fn with_names<S: Into<Box<str>>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<Option<Box<str>>> = names.into_iter().map(|n| Some(n.into())).collect();
        assert_eq!(
            names.len(),
            self.shape.len(),
            "axis names must cover every axis"
        );
        self.names = names;
        self
    }
}

impl TensorInfo for TensorMeta {
    fn rank(&self) -> usize {
        self.shape.len()
    }

    fn size(&self, axis: usize) -> u64 {
        self.shape[axis]
    }

    fn axis_name(&self, axis: usize) -> Option<&str> {
        self.names[axis].as_deref()
    }

    fn kind(&self) -> Kind {
        self.kind
    }

    fn layout(&self) -> Layout {
        self.layout
    }
}
