//! The matching engine
//!
//! Evaluates a canonical spec against a concrete value's structure. Never
//! errors: any mismatch is `false`. Gates run in order - element kind,
//! layout, then the shape walk.
//!
//! The shape walk is two-phase. First, named descriptors are resolved
//! through the call's [`ResolveCtx`]: a named unconstrained axis whose
//! name was pinned earlier in the call becomes an exact size, and a named
//! group with a known axis count expands into that many unnamed
//! unconstrained axes. Second, descriptors and axes are compared from the
//! rightmost end; reaching a still-unresolved group marker while walking
//! leftward satisfies the remaining leading axes. Right-to-left is the
//! only direction compatible with a single leading group of unknown width,
//! which is why the parser pins groups to the leading positions.

use tracing::trace;

use shapeward_ast::dim::{Dim, SizeSpec};
use shapeward_ast::tensor::TensorInfo;

use crate::context::ResolveCtx;
use crate::SpecData;

pub(crate) fn matches<T: TensorInfo + ?Sized>(
    spec: &SpecData,
    value: &T,
    ctx: Option<&mut ResolveCtx>,
) -> bool {
    if let Some(kind) = spec.kind {
        if value.kind() != kind {
            trace!(expected = %kind, found = %value.kind(), "element kind mismatch");
            return false;
        }
    }
    if let Some(layout) = spec.layout {
        if value.layout() != layout {
            trace!(expected = %layout, found = %value.layout(), "layout mismatch");
            return false;
        }
    }
    match &spec.dims {
        Some(dims) => check_dims(dims, spec.validates_names(), value, ctx),
        None => true,
    }
}

/// Shape and axis-name walk; `dims` is in declaration (left-to-right) order
fn check_dims<T: TensorInfo + ?Sized>(
    dims: &[Dim],
    validate_names: bool,
    value: &T,
    mut ctx: Option<&mut ResolveCtx>,
) -> bool {
    // Phase 1: resolve named sizes and group counts through the context.
    // Built right-to-left, the order the comparison consumes it in.
    let mut resolved: Vec<Dim> = Vec::with_capacity(dims.len());
    for dim in dims.iter().rev() {
        match (&dim.name, dim.size) {
            (Some(name), SizeSpec::Any) => {
                let size = match ctx.as_deref().and_then(|c| c.get(name)) {
                    Some(pinned) => SizeSpec::Exact(pinned),
                    None => SizeSpec::Any,
                };
                resolved.push(Dim { name: dim.name.clone(), size });
            }
            (Some(name), SizeSpec::Group) => match ctx.as_deref().and_then(|c| c.get(name)) {
                // A pinned group expands to that many unnamed, unconstrained axes.
                Some(count) => resolved.extend((0..count).map(|_| Dim::any())),
                None => resolved.push(dim.clone()),
            },
            _ => resolved.push(dim.clone()),
        }
    }

    // Phase 2: consume axes right-to-left.
    let mut remaining = value.rank();
    for (i, dim) in resolved.iter().enumerate() {
        if dim.is_group() {
            // Arbitrary leading axes: everything leftward is satisfied. A
            // named group's axis count is only unambiguous when the group
            // is the leftmost remaining descriptor.
            if let (Some(name), Some(ctx)) = (&dim.name, ctx.as_deref_mut()) {
                if i == resolved.len() - 1 && !ctx.record(name, remaining as u64) {
                    trace!(name = %name, "group axis count disagrees within call");
                    return false;
                }
            }
            return true;
        }

        if remaining == 0 {
            return false;
        }
        let axis = remaining - 1;
        let observed = value.size(axis);

        if validate_names {
            if let Some(name) = &dim.name {
                if value.axis_name(axis) != Some(name.as_ref()) {
                    trace!(axis, expected = %name, "axis name mismatch");
                    return false;
                }
            }
        }
        if let SizeSpec::Exact(n) = dim.size {
            if n != observed {
                trace!(axis, expected = n, observed, "axis size mismatch");
                return false;
            }
        }
        // Named non-group descriptors pin their observed size for the rest
        // of the call; a disagreeing prior observation fails the match.
        if let (Some(name), Some(ctx)) = (&dim.name, ctx.as_deref_mut()) {
            if !ctx.record(name, observed) {
                trace!(name = %name, observed, "dimension size disagrees within call");
                return false;
            }
        }
        remaining -= 1;
    }

    remaining == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseKind;
    use shapeward_ast::kind::{Kind, Layout};
    use shapeward_ast::tensor::TensorMeta;

    fn spec(dims: Option<Vec<Dim>>) -> SpecData {
        SpecData {
            base: BaseKind::Tensor,
            name: "Tensor".into(),
            dims,
            kind: None,
            layout: None,
        }
    }

    fn named_spec(dims: Vec<Dim>) -> SpecData {
        SpecData {
            base: BaseKind::NamedTensor,
            name: "NamedTensor".into(),
            dims: Some(dims),
            kind: None,
            layout: None,
        }
    }

    // ============ Shape-only checks, no context ============

    #[test]
    fn test_exact_shape() {
        let s = spec(Some(vec![Dim::exact(3), Dim::exact(4)]));
        assert!(matches(&s, &TensorMeta::new([3, 4]), None));
        assert!(!matches(&s, &TensorMeta::new([3]), None));
        assert!(!matches(&s, &TensorMeta::new([4, 3]), None));
        assert!(!matches(&s, &TensorMeta::new([3, 4, 1]), None));
    }

    #[test]
    fn test_any_axis() {
        let s = spec(Some(vec![Dim::any(), Dim::exact(4)]));
        assert!(matches(&s, &TensorMeta::new([1, 4]), None));
        assert!(matches(&s, &TensorMeta::new([999, 4]), None));
        assert!(!matches(&s, &TensorMeta::new([3, 5]), None));
    }

    #[test]
    fn test_no_dims_matches_any_rank() {
        let s = spec(None);
        assert!(matches(&s, &TensorMeta::new([]), None));
        assert!(matches(&s, &TensorMeta::new([7, 8, 9]), None));
    }

    #[test]
    fn test_empty_dims_matches_only_rank_zero() {
        let s = spec(Some(vec![]));
        assert!(matches(&s, &TensorMeta::new([]), None));
        assert!(!matches(&s, &TensorMeta::new([1]), None));
    }

    #[test]
    fn test_leading_group() {
        let s = spec(Some(vec![Dim::group(), Dim::exact(4), Dim::exact(5)]));
        assert!(matches(&s, &TensorMeta::new([4, 5]), None));
        assert!(matches(&s, &TensorMeta::new([1, 4, 5]), None));
        assert!(matches(&s, &TensorMeta::new([9, 9, 9, 4, 5]), None));
        assert!(!matches(&s, &TensorMeta::new([4, 6]), None));
        assert!(!matches(&s, &TensorMeta::new([5]), None));
    }

    #[test]
    fn test_lone_group_matches_anything() {
        let s = spec(Some(vec![Dim::group()]));
        assert!(matches(&s, &TensorMeta::new([]), None));
        assert!(matches(&s, &TensorMeta::new([2, 3, 4]), None));
    }

    #[test]
    fn test_named_dims_without_context_are_unconstrained() {
        let s = spec(Some(vec![
            Dim::any().with_name("a"),
            Dim::any().with_name("a"),
        ]));
        // No context: the two `a`s need not agree.
        assert!(matches(&s, &TensorMeta::new([3, 5]), None));
    }

    // ============ Kind and layout gates ============

    #[test]
    fn test_kind_gate() {
        let mut s = spec(Some(vec![Dim::exact(3)]));
        s.kind = Some(Kind::I64);
        assert!(matches(&s, &TensorMeta::new([3]).with_kind(Kind::I64), None));
        assert!(!matches(&s, &TensorMeta::new([3]).with_kind(Kind::F32), None));
    }

    #[test]
    fn test_layout_gate() {
        let mut s = spec(None);
        s.layout = Some(Layout::Sparse);
        assert!(matches(&s, &TensorMeta::new([3]).with_layout(Layout::Sparse), None));
        assert!(!matches(&s, &TensorMeta::new([3]), None));
    }

    // ============ Axis-name validation ============

    #[test]
    fn test_names_validated_only_for_named_base() {
        let dims = vec![Dim::any().with_name("a"), Dim::any().with_name("b")];
        let plain = spec(Some(dims.clone()));
        let named = named_spec(dims);

        let right = TensorMeta::new([3, 4]).with_names(["a", "b"]);
        let wrong = TensorMeta::new([3, 4]).with_names(["x", "b"]);

        assert!(matches(&plain, &wrong, None));
        assert!(matches(&named, &right, None));
        assert!(!matches(&named, &wrong, None));
    }

    #[test]
    fn test_unnamed_descriptor_ignores_axis_name() {
        let named = named_spec(vec![Dim::any(), Dim::any().with_name("b")]);
        let t = TensorMeta::new([3, 4]).with_names(["anything", "b"]);
        assert!(matches(&named, &t, None));
    }

    // ============ Context-driven resolution ============

    #[test]
    fn test_named_any_pinned_by_context() {
        let s = spec(Some(vec![Dim::any().with_name("a"), Dim::exact(4)]));
        let mut ctx = ResolveCtx::new();
        assert!(ctx.record("a", 3));
        assert!(matches(&s, &TensorMeta::new([3, 4]), Some(&mut ctx)));
        assert!(!matches(&s, &TensorMeta::new([5, 4]), Some(&mut ctx)));
    }

    #[test]
    fn test_named_any_records_observation() {
        let s = spec(Some(vec![Dim::any().with_name("a"), Dim::exact(4)]));
        let mut ctx = ResolveCtx::new();
        assert!(matches(&s, &TensorMeta::new([3, 4]), Some(&mut ctx)));
        assert_eq!(ctx.get("a"), Some(3));
    }

    #[test]
    fn test_named_exact_conflicts_with_context() {
        // The declared size matches the value, but the call already pinned
        // `a` to a different size elsewhere.
        let s = spec(Some(vec![Dim::exact(5).with_name("a")]));
        let mut ctx = ResolveCtx::new();
        assert!(ctx.record("a", 3));
        assert!(!matches(&s, &TensorMeta::new([5]), Some(&mut ctx)));
    }

    #[test]
    fn test_named_group_count_recorded_when_leftmost() {
        let s = spec(Some(vec![Dim::group().with_name("batch"), Dim::exact(4)]));
        let mut ctx = ResolveCtx::new();
        assert!(matches(&s, &TensorMeta::new([2, 3, 4]), Some(&mut ctx)));
        assert_eq!(ctx.get("batch"), Some(2));
    }

    #[test]
    fn test_named_group_expanded_from_context() {
        let s = spec(Some(vec![Dim::group().with_name("batch"), Dim::exact(4)]));
        let mut ctx = ResolveCtx::new();
        assert!(ctx.record("batch", 2));
        assert!(matches(&s, &TensorMeta::new([2, 3, 4]), Some(&mut ctx)));
        assert!(!matches(&s, &TensorMeta::new([2, 4]), Some(&mut ctx)));
        assert!(!matches(&s, &TensorMeta::new([1, 2, 3, 4]), Some(&mut ctx)));
    }

    #[test]
    fn test_named_group_count_zero() {
        let s = spec(Some(vec![Dim::group().with_name("batch"), Dim::exact(4)]));
        let mut ctx = ResolveCtx::new();
        assert!(matches(&s, &TensorMeta::new([4]), Some(&mut ctx)));
        assert_eq!(ctx.get("batch"), Some(0));
    }

    #[test]
    fn test_named_group_after_unnamed_is_not_recorded() {
        // With an unnamed group further left the count is ambiguous.
        let s = spec(Some(vec![
            Dim::group(),
            Dim::group().with_name("batch"),
            Dim::exact(4),
        ]));
        let mut ctx = ResolveCtx::new();
        assert!(matches(&s, &TensorMeta::new([2, 3, 4]), Some(&mut ctx)));
        assert_eq!(ctx.get("batch"), None);
    }

    #[test]
    fn test_named_group_expands_under_unnamed_group() {
        let s = spec(Some(vec![
            Dim::group(),
            Dim::group().with_name("batch"),
            Dim::exact(4),
        ]));
        let mut ctx = ResolveCtx::new();
        assert!(ctx.record("batch", 2));
        // rank 4: one leading axis for the unnamed group, two for `batch`.
        assert!(matches(&s, &TensorMeta::new([9, 2, 3, 4]), Some(&mut ctx)));
        // rank 2: not enough axes left for the expanded `batch`.
        assert!(!matches(&s, &TensorMeta::new([2, 4]), Some(&mut ctx)));
    }
}
