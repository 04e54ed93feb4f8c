//! Canonicalization and the process-wide spec cache
//!
//! Specializing a base spec merges its accumulated constraint fields with
//! a newly parsed fragment, then interns the result: structurally equal
//! declarations anywhere in the process share one canonical instance, so
//! spec equality is pointer equality and specs are cheap map keys.
//!
//! The cache is append-only for the process lifetime; entries are bounded
//! by the number of distinct declarations a program makes, not by call
//! volume. Insert-or-fetch is atomic per key via the map's entry API, so
//! racing writers converge on the first inserted instance.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use shapeward_ast::dim::Dim;
use shapeward_ast::kind::{Kind, Layout};
use shapeward_parse::parser::PartialSpec;

use crate::error::{DeclError, DeclResult};
use crate::{BaseKind, Spec, SpecData};

/// Canonical identity of a spec: root base variant plus the merged fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SpecKey {
    base: BaseKind,
    dims: Option<Vec<Dim>>,
    kind: Option<Kind>,
    layout: Option<Layout>,
}

static CACHE: Lazy<DashMap<SpecKey, Spec>> = Lazy::new(DashMap::new);

pub(crate) fn specialize(base: &Spec, partial: PartialSpec) -> DeclResult<Spec> {
    let data = base.data();

    // A field may be set once across the whole specialization chain.
    let mut conflicts = Vec::new();
    if data.dims.is_some() && partial.dims.is_some() {
        conflicts.push("dims");
    }
    if data.kind.is_some() && partial.kind.is_some() {
        conflicts.push("kind");
    }
    if data.layout.is_some() && partial.layout.is_some() {
        conflicts.push("layout");
    }
    if !conflicts.is_empty() {
        return Err(DeclError::FieldConflict {
            fields: conflicts.join(", "),
        });
    }

    let key = SpecKey {
        base: data.base,
        dims: data.dims.clone().or(partial.dims),
        kind: data.kind.or(partial.kind),
        layout: data.layout.or(partial.layout),
    };

    if let Some(existing) = CACHE.get(&key) {
        return Ok(existing.clone());
    }

    let name = canonical_name(&key);
    debug!(%name, "interning new spec");
    let spec = Spec::from_data(SpecData {
        base: key.base,
        name,
        dims: key.dims.clone(),
        kind: key.kind,
        layout: key.layout,
    });
    // First writer wins; a racing loser discards its instance and takes
    // the cached one.
    Ok(CACHE.entry(key).or_insert(spec).value().clone())
}

/// Display name: base name, then each set field rendered as `[value]` in
/// fixed field order
fn canonical_name(key: &SpecKey) -> String {
    let mut name = key.base.name().to_string();
    if let Some(dims) = &key.dims {
        let rendered: Vec<String> = dims.iter().map(ToString::to_string).collect();
        name.push('[');
        name.push_str(&rendered.join(", "));
        name.push(']');
    }
    if let Some(kind) = key.kind {
        name.push('[');
        name.push_str(kind.as_str());
        name.push(']');
    }
    if let Some(layout) = key.layout {
        name.push('[');
        name.push_str(layout.as_str());
        name.push(']');
    }
    name
}
