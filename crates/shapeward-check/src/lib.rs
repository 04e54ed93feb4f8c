//! # Shapeward Check
//!
//! Canonical constraint specs and the engine that enforces them.
//!
//! A [`Spec`] is built by specializing one of the two base variants
//! ([`Spec::tensor`], [`Spec::named_tensor`]) with constraint items or the
//! textual DSL. Construction goes through a process-wide intern cache, so
//! structurally equal declarations are the same object: spec equality is
//! identity, and specs work as map keys.
//!
//! Matching never errors - a mismatch is `false`. Cross-argument
//! constraints (same-named dimensions, named group counts) are resolved
//! through a [`ResolveCtx`] owned by the caller for the duration of one
//! checked call; [`check_call`] is the reference orchestrator.
//!
//! ## Example
//!
//! ```rust
//! use shapeward_check::Spec;
//! use shapeward_parse::prelude::*;
//! use shapeward_ast::prelude::*;
//!
//! // "..., a, 4": any leading axes, then some size `a`, then exactly 4.
//! let spec = Spec::tensor().with([ellipsis(), dim("a", -1), 4.into()]).unwrap();
//! assert_eq!(spec.to_string(), "Tensor[..., a, 4]");
//!
//! assert!(spec.matches(&TensorMeta::new([2, 3, 4])));
//! assert!(!spec.matches(&TensorMeta::new([2, 3, 5])));
//!
//! // Equal declarations are the identical spec.
//! assert_eq!(spec, Spec::tensor().with_dsl("..., a, 4").unwrap());
//! ```

pub mod call;
pub mod context;
pub mod error;

mod cache;
mod matcher;

pub use call::check_call;
pub use context::ResolveCtx;
pub use error::{CallError, DeclError, DeclResult};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;

use shapeward_ast::dim::Dim;
use shapeward_ast::kind::{Kind, Layout};
use shapeward_ast::tensor::TensorInfo;
use shapeward_parse::item::SpecItem;
use shapeward_parse::parser::{parse_dsl, parse_items};

/// Root base variant of a spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum BaseKind {
    Tensor,
    NamedTensor,
}

impl BaseKind {
    fn name(self) -> &'static str {
        match self {
            BaseKind::Tensor => "Tensor",
            BaseKind::NamedTensor => "NamedTensor",
        }
    }
}

/// Interned spec payload; immutable once constructed
#[derive(Debug)]
pub(crate) struct SpecData {
    pub(crate) base: BaseKind,
    pub(crate) name: String,
    pub(crate) dims: Option<Vec<Dim>>,
    pub(crate) kind: Option<Kind>,
    pub(crate) layout: Option<Layout>,
}

impl SpecData {
    pub(crate) fn validates_names(&self) -> bool {
        self.base == BaseKind::NamedTensor
    }
}

/// A canonical, shared-ownership constraint spec
///
/// Equality and hashing are by identity; the intern cache guarantees that
/// structurally equal specs are identical, so identity comparison is
/// structural comparison.
#[derive(Debug, Clone)]
pub struct Spec(Arc<SpecData>);

static TENSOR: Lazy<Spec> = Lazy::new(|| Spec::base(BaseKind::Tensor));
static NAMED_TENSOR: Lazy<Spec> = Lazy::new(|| Spec::base(BaseKind::NamedTensor));

impl Spec {
    fn base(base: BaseKind) -> Spec {
        Spec(Arc::new(SpecData {
            base,
            name: base.name().to_string(),
            dims: None,
            kind: None,
            layout: None,
        }))
    }

    pub(crate) fn from_data(data: SpecData) -> Spec {
        Spec(Arc::new(data))
    }

    pub(crate) fn data(&self) -> &SpecData {
        &self.0
    }

    /// The unconstrained base; axis names are not validated
    pub fn tensor() -> Spec {
        TENSOR.clone()
    }

    /// Base variant that additionally validates per-axis names against the
    /// descriptor names
    pub fn named_tensor() -> Spec {
        NAMED_TENSOR.clone()
    }

    /// Specialize with a sequence of constraint items
    pub fn with<I>(&self, items: I) -> DeclResult<Spec>
    where
        I: IntoIterator,
        I::Item: Into<SpecItem>,
    {
        let items: Vec<SpecItem> = items.into_iter().map(Into::into).collect();
        cache::specialize(self, parse_items(&items)?)
    }

    /// Specialize with the textual DSL, e.g. `"batch: ..., a: 3, -1"`
    pub fn with_dsl(&self, src: &str) -> DeclResult<Spec> {
        cache::specialize(self, parse_dsl(src)?)
    }

    /// Constrain the element kind
    pub fn with_kind(&self, kind: Kind) -> DeclResult<Spec> {
        cache::specialize(self, parse_items(&[SpecItem::Kind(kind)])?)
    }

    /// Constrain the storage layout
    pub fn with_layout(&self, layout: Layout) -> DeclResult<Spec> {
        cache::specialize(self, parse_items(&[SpecItem::Layout(layout)])?)
    }

    pub fn dims(&self) -> Option<&[Dim]> {
        self.0.dims.as_deref()
    }

    pub fn kind(&self) -> Option<Kind> {
        self.0.kind
    }

    pub fn layout(&self) -> Option<Layout> {
        self.0.layout
    }

    pub fn validates_names(&self) -> bool {
        self.0.validates_names()
    }

    /// Canonical display name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Check one value, without cross-argument resolution
    pub fn matches<T: TensorInfo + ?Sized>(&self, value: &T) -> bool {
        matcher::matches(&self.0, value, None)
    }

    /// Check one value within a call, threading the call's shared
    /// resolution context
    pub fn matches_in<T: TensorInfo + ?Sized>(&self, value: &T, ctx: &mut ResolveCtx) -> bool {
        matcher::matches(&self.0, value, Some(ctx))
    }
}

impl PartialEq for Spec {
    fn eq(&self, other: &Spec) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Spec {}

impl Hash for Spec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}
