//! Per-call orchestration
//!
//! The reference orchestrator for one checked call: activate a fresh
//! [`ResolveCtx`], run every (spec, value) pair through the matcher in
//! order, and turn the first `false` into a [`CallError`] naming the
//! argument. Argument order does not affect acceptance - the context
//! accumulates observations monotonically - only which argument gets
//! blamed for a disagreement.

use shapeward_ast::tensor::TensorInfo;

use crate::context::ResolveCtx;
use crate::error::CallError;
use crate::Spec;

/// Check all arguments of one logical call against their declared specs
pub fn check_call(args: &[(&Spec, &dyn TensorInfo)]) -> Result<(), CallError> {
    let mut ctx = ResolveCtx::new();
    for (index, (spec, value)) in args.iter().enumerate() {
        if !spec.matches_in(*value, &mut ctx) {
            return Err(CallError::ArgumentMismatch {
                index,
                expected: spec.to_string(),
                found: render_shape(*value),
            });
        }
    }
    Ok(())
}

fn render_shape(value: &dyn TensorInfo) -> String {
    let axes: Vec<String> = value.shape().iter().map(u64::to_string).collect();
    axes.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeward_ast::tensor::TensorMeta;
    use shapeward_parse::item::dim;

    #[test]
    fn test_failure_names_the_argument() {
        let ab = Spec::tensor().with([dim("a", -1), dim("b", -1)]).unwrap();
        let ac = Spec::tensor().with([dim("a", -1), dim("c", -1)]).unwrap();

        let x = TensorMeta::new([3, 4]);
        let y = TensorMeta::new([5, 4]);

        let err = check_call(&[(&ab, &x), (&ac, &y)]).unwrap_err();
        assert_eq!(
            err,
            CallError::ArgumentMismatch {
                index: 1,
                expected: "Tensor[a, b]".into(),
                found: "5, 4".into(),
            }
        );
    }

    #[test]
    fn test_agreeing_call_passes() {
        let ab = Spec::tensor().with([dim("a", -1), dim("b", -1)]).unwrap();
        let ac = Spec::tensor().with([dim("a", -1), dim("c", -1)]).unwrap();

        let x = TensorMeta::new([3, 4]);
        let y = TensorMeta::new([3, 9]);

        assert!(check_call(&[(&ab, &x), (&ac, &y)]).is_ok());
    }

    #[test]
    fn test_context_is_per_call() {
        let a = Spec::tensor().with([dim("a", -1)]).unwrap();
        // Two separate calls may give `a` different sizes.
        assert!(check_call(&[(&a, &TensorMeta::new([3]))]).is_ok());
        assert!(check_call(&[(&a, &TensorMeta::new([5]))]).is_ok());
    }
}
